use super::*;
use touchgrass_core::ChatId;
use touchgrass_wire::ChannelSummary;

#[test]
fn busy_channels_are_flagged_in_the_rendered_line() {
    let c = ChannelSummary {
        chat_id: ChatId::new("telegram:1"),
        title: "ops".to_string(),
        kind: "group".to_string(),
        busy: true,
        busy_label: None,
    };
    assert!(render_line(&c).contains("(busy)"));
}

#[test]
fn idle_channels_have_no_busy_suffix() {
    let c = ChannelSummary {
        chat_id: ChatId::new("telegram:1"),
        title: "ops".to_string(),
        kind: "group".to_string(),
        busy: false,
        busy_label: None,
    };
    assert!(!render_line(&c).contains("busy"));
}
