use super::*;
use touchgrass_core::{ChannelConfig, LinkedGroup, PairedUser};

fn paired_config() -> Config {
    let mut config = Config::default();
    config.channels.insert(
        "telegram".to_string(),
        ChannelConfig {
            channel_type: "telegram".to_string(),
            paired_users: vec![PairedUser { user_id: user("1"), paired_at: 0, username: None }],
            linked_groups: vec![LinkedGroup { chat_id: chat_group(), title: None, linked_at: 0 }],
            ..Default::default()
        },
    );
    config
}

fn chat_dm() -> ChatId {
    ChatId::new("telegram:1")
}

fn chat_group() -> ChatId {
    ChatId::new("telegram:-100987")
}

fn user(n: &str) -> UserId {
    UserId::new(format!("telegram:{n}"))
}

#[test]
fn slash_command_with_bot_suffix_normalizes() {
    assert_eq!(normalize_command("/kill@touchgrass_bot", "touchgrass_bot"), Command::Kill);
}

#[test]
fn tg_alias_normalizes_same_as_slash() {
    assert_eq!(normalize_command("tg kill", "touchgrass_bot"), Command::Kill);
}

#[test]
fn plain_text_is_not_a_command() {
    assert_eq!(normalize_command("hello there", "bot"), Command::PlainText("hello there".to_string()));
}

#[test]
fn pair_is_always_allowed_even_when_unpaired() {
    let sessions = SessionManager::new();
    let config = Config::default();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("9"), "/pair");
    assert!(matches!(outcome, RouterOutcome::Reply(_)));
}

#[test]
fn unpaired_user_is_told_to_pair() {
    let sessions = SessionManager::new();
    let config = Config::default();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("9"), "/files");
    assert_eq!(outcome, RouterOutcome::NeedsPairing);
}

#[test]
fn unlinked_group_rejects_non_exempt_commands() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let unlinked_group = ChatId::new("telegram:-999");
    let outcome = router.route(&unlinked_group, &user("1"), "/files");
    assert_eq!(outcome, RouterOutcome::GroupNotLinked);
}

#[test]
fn unlinked_group_allows_start_and_kill() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let unlinked_group = ChatId::new("telegram:-999");
    let outcome = router.route(&unlinked_group, &user("1"), "/kill");
    assert_eq!(outcome, RouterOutcome::NoSessionAttached);
}

#[test]
fn kill_with_no_attached_session_reports_none_attached() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("1"), "/kill");
    assert_eq!(outcome, RouterOutcome::NoSessionAttached);
}

#[test]
fn kill_with_attached_session_enqueues_kill() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let session = sessions.register_remote("claude", chat_dm(), user("1"), "/tmp", None);
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("1"), "/kill");
    assert_eq!(
        outcome,
        RouterOutcome::EnqueueControl { session_id: session.id, action: RemoteControlAction::Kill }
    );
}

#[test]
fn start_with_no_session_reports_camp_inactive() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("1"), "/start");
    assert_eq!(outcome, RouterOutcome::CampInactive);
}

#[test]
fn plain_text_with_attached_session_becomes_input() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let session = sessions.register_remote("claude", chat_dm(), user("1"), "/tmp", None);
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("1"), "go ahead");
    assert_eq!(
        outcome,
        RouterOutcome::EnqueueInput { session_id: session.id, text: "go ahead".to_string() }
    );
}

#[test]
fn thinking_toggle_flips_current_preference() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("1"), "/thinking");
    assert_eq!(outcome, RouterOutcome::SetThinking { chat_id: chat_dm(), on: true });
}

#[test]
fn output_mode_explicit_argument_wins() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let router = CommandRouter::new(&sessions, &config, "bot");
    let outcome = router.route(&chat_dm(), &user("1"), "/output_mode verbose");
    assert_eq!(outcome, RouterOutcome::SetOutputMode { chat_id: chat_dm(), mode: OutputMode::Verbose });
}
