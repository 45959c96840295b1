use super::*;

#[test]
fn scenario_1_codex_resume_parsing() {
    let args = vec![
        "--dangerously-bypass-approvals-and-sandbox".to_string(),
        "resume".to_string(),
        "019c56ac-417b-7180-bd3f-2ed6e25885e3".to_string(),
    ];
    let parsed = parse_codex_resume_args(&args);
    assert_eq!(parsed.resume_id.as_deref(), Some("019c56ac-417b-7180-bd3f-2ed6e25885e3"));
    assert!(!parsed.use_resume_last);
    assert_eq!(parsed.base_args, vec!["--dangerously-bypass-approvals-and-sandbox".to_string()]);
}

#[test]
fn resume_last_flag_is_recognized() {
    let args = vec!["resume".to_string(), "--last".to_string()];
    let parsed = parse_codex_resume_args(&args);
    assert!(parsed.use_resume_last);
    assert_eq!(parsed.resume_id, None);
    assert!(parsed.base_args.is_empty());
}

#[test]
fn no_resume_subcommand_is_all_base_args() {
    let args = vec!["--model".to_string(), "gpt-5".to_string()];
    let parsed = parse_codex_resume_args(&args);
    assert_eq!(parsed.resume_id, None);
    assert!(!parsed.use_resume_last);
    assert_eq!(parsed.base_args, args);
}

#[test]
fn trailing_args_after_resume_id_land_in_base_args() {
    let args = vec!["resume".to_string(), "abc123".to_string(), "--foo".to_string()];
    let parsed = parse_codex_resume_args(&args);
    assert_eq!(parsed.resume_id.as_deref(), Some("abc123"));
    assert_eq!(parsed.base_args, vec!["--foo".to_string()]);
}
