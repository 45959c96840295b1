use super::*;
use chrono::{NaiveDate, Weekday};

#[test]
fn load_workflow_text_reads_relative_to_cwd_workflows_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("workflows")).unwrap();
    std::fs::write(dir.path().join("workflows/email-check.md"), "Review unread mail and summarize.").unwrap();

    let text = load_workflow_text(dir.path(), "email-check").unwrap();
    assert_eq!(text, "Review unread mail and summarize.");
}

#[test]
fn load_workflow_text_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_workflow_text(dir.path(), "missing").unwrap_err();
    assert!(matches!(err, HeartbeatError::WorkflowNotFound(_)));
}

#[test]
fn scenario_4_heartbeat_due_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("workflows")).unwrap();
    std::fs::write(dir.path().join("workflows/email-check.md"), "Review unread mail and summarize.").unwrap();

    let agents_md = "<agent-heartbeat interval=\"15\">Shared context\n<run workflow=\"email-check\" always=\"true\"/></agent-heartbeat>";
    let block = parse_heartbeat_block(agents_md).unwrap();

    let mut state = SessionHeartbeatState::new();
    let today = NaiveDate::from_ymd_opt(2026, 2, 13).unwrap();
    let due = state.resolve_tick(&block, 0, today, Weekday::Fri, 0);
    assert_eq!(due, vec![DueWorkflow { workflow: Some("email-check".to_string()) }]);

    let workflow_text = load_workflow_text(dir.path(), "email-check").unwrap();
    let context = build_context(&block.text, &workflow_text);
    assert_eq!(context, "Shared context\n\nReview unread mail and summarize.");

    let prompt = format_heartbeat_prompt("email-check", "2026-02-13T10:00:00", &context);
    assert!(prompt.contains("Shared context\n\nReview unread mail and summarize."));
}
