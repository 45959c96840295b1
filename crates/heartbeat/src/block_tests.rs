use super::*;
use crate::trigger::Trigger;

#[test]
fn scenario_4_parses_interval_and_always_run() {
    let agents_md = r#"<agent-heartbeat interval="15">Shared context
<run workflow="email-check" always="true"/></agent-heartbeat>"#;
    let block = parse_heartbeat_block(agents_md).unwrap();
    assert_eq!(block.interval_minutes, 15);
    assert_eq!(block.text, "Shared context");
    assert_eq!(block.runs.len(), 1);
    assert_eq!(block.runs[0].workflow, "email-check");
    assert_eq!(block.runs[0].trigger, Trigger::Always);
}

#[test]
fn missing_interval_falls_back_to_15() {
    let agents_md = "<agent-heartbeat>text<run workflow=\"w\"/></agent-heartbeat>";
    let block = parse_heartbeat_block(agents_md).unwrap();
    assert_eq!(block.interval_minutes, DEFAULT_INTERVAL_MINUTES);
}

#[test]
fn no_block_returns_none() {
    assert!(parse_heartbeat_block("just some markdown").is_none());
}

#[test]
fn block_with_no_runs_keeps_plain_text() {
    let block = parse_heartbeat_block("<agent-heartbeat>hello there</agent-heartbeat>").unwrap();
    assert!(block.runs.is_empty());
    assert_eq!(block.text, "hello there");
}

#[test]
fn comment_only_block_has_empty_text() {
    let block = parse_heartbeat_block("<agent-heartbeat><!-- nothing to see --></agent-heartbeat>").unwrap();
    assert!(block.runs.is_empty());
    assert!(block.text.is_empty());
}

#[test]
fn on_attribute_is_captured() {
    let agents_md = r#"<agent-heartbeat><run workflow="w" every="30m" on="weekdays"/></agent-heartbeat>"#;
    let block = parse_heartbeat_block(agents_md).unwrap();
    assert_eq!(block.runs[0].on.as_deref(), Some("weekdays"));
}
