use super::*;
use touchgrass_core::ChatId;

fn summary(chat_id: &str, title: &str) -> ChannelSummary {
    ChannelSummary {
        chat_id: ChatId::new(chat_id),
        title: title.to_string(),
        kind: "group".to_string(),
        busy: false,
        busy_label: None,
    }
}

#[test]
fn single_channel_is_picked_without_a_filter() {
    let channels = vec![summary("telegram:1", "ops")];
    let picked = pick_channel(&channels, None).unwrap();
    assert_eq!(picked.chat_id.as_str(), "telegram:1");
}

#[test]
fn no_channels_is_a_config_error() {
    let channels: Vec<ChannelSummary> = vec![];
    assert!(pick_channel(&channels, None).is_err());
}

#[test]
fn ambiguous_channels_require_a_filter() {
    let channels = vec![summary("telegram:1", "ops"), summary("telegram:2", "dev")];
    assert!(pick_channel(&channels, None).is_err());
    let picked = pick_channel(&channels, Some("dev")).unwrap();
    assert_eq!(picked.chat_id.as_str(), "telegram:2");
}

#[test]
fn unknown_filter_is_rejected() {
    let channels = vec![summary("telegram:1", "ops")];
    assert!(pick_channel(&channels, Some("nope")).is_err());
}
