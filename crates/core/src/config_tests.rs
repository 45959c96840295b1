// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_round_trip_through_json() {
    let config = Config::default();
    let json = serde_json::to_string(&config).expect("serialize");
    let back: Config = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.settings.max_sessions, config.settings.max_sessions);
}

#[test]
fn preference_falls_back_to_defaults() {
    let config = Config::default();
    let pref = config.preference(&ChatId::new("telegram:1"));
    assert_eq!(pref.output_mode_or_default(), OutputMode::Compact);
    assert!(!pref.thinking_or_default());
    assert!(!pref.muted_or_default());
}

#[test]
fn is_paired_checks_all_channels() {
    let mut config = Config::default();
    let mut channel = ChannelConfig::default();
    channel.paired_users.push(PairedUser { user_id: UserId::new("telegram:1"), paired_at: 0, username: None });
    config.channels.insert("telegram".into(), channel);
    assert!(config.is_paired(&UserId::new("telegram:1")));
    assert!(!config.is_paired(&UserId::new("telegram:2")));
}

#[test]
fn unset_preferences_are_not_persisted() {
    let pref = ChatPreference::default();
    let json = serde_json::to_string(&pref).expect("serialize");
    assert_eq!(json, "{}");
}
