use super::*;

#[test]
fn claude_first_turn_has_no_resume_flag() {
    let args = turn_args(Vendor::Claude, None);
    assert_eq!(args, vec!["--print", "--output-format", "stream-json", "--verbose"]);
}

#[test]
fn claude_later_turn_resumes_by_session_id() {
    let args = turn_args(Vendor::Claude, Some("abc-123"));
    assert!(args.contains(&"--resume".to_string()));
    assert_eq!(args.last(), Some(&"abc-123".to_string()));
}

#[test]
fn codex_later_turn_uses_resume_subcommand() {
    let args = turn_args(Vendor::Codex, Some("sess-9"));
    assert_eq!(args, vec!["exec", "--json", "resume", "sess-9"]);
}

#[test]
fn pi_and_kimi_use_session_flag() {
    let args = turn_args(Vendor::Pi, Some("sess-1"));
    assert_eq!(args, vec!["--mode", "rpc", "--session", "sess-1"]);
    let args = turn_args(Vendor::Kimi, Some("sess-2"));
    assert_eq!(args, vec!["--mode", "rpc", "--session", "sess-2"]);
}

#[test]
fn extracts_session_id_from_either_key_spelling() {
    let snake = serde_json::json!({"session_id": "a"});
    let camel = serde_json::json!({"sessionId": "b"});
    let neither = serde_json::json!({"type": "assistant"});
    assert_eq!(extract_session_id(&snake), Some("a".to_string()));
    assert_eq!(extract_session_id(&camel), Some("b".to_string()));
    assert_eq!(extract_session_id(&neither), None);
}
