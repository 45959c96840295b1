use super::*;
use parking_lot::RwLock;
use touchgrass_adapters::fake::FakeChatAdapter;
use touchgrass_core::{PairedUser, Settings};

fn paired_config() -> RwLock<Config> {
    let mut config = Config { settings: Settings::new_default(), ..Default::default() };
    config.channels.insert(
        "telegram".to_string(),
        touchgrass_core::ChannelConfig {
            channel_type: "telegram".to_string(),
            paired_users: vec![PairedUser { user_id: UserId::new("telegram:1"), paired_at: 0, username: None }],
            ..Default::default()
        },
    );
    RwLock::new(config)
}

#[tokio::test]
async fn unpaired_user_gets_a_pairing_reply() {
    let sessions = SessionManager::new();
    let config = RwLock::new(Config::default());
    let pairing_codes = PairingCodes::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");

    handle_inbound_message(&sessions, &config, &pairing_codes, &adapter, "tgbot", &chat_id, &user_id, "/help", 0)
        .await;

    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
}

#[tokio::test]
async fn plain_text_with_attached_session_enqueues_input() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let pairing_codes = PairingCodes::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");
    let session = sessions.register_remote("claude", chat_id.clone(), user_id.clone(), "/tmp", None);

    handle_inbound_message(
        &sessions,
        &config,
        &pairing_codes,
        &adapter,
        "tgbot",
        &chat_id,
        &user_id,
        "hello there",
        0,
    )
    .await;

    let input = sessions.drain_remote_input(&session.id);
    assert_eq!(input, vec!["hello there".to_string()]);
    assert!(adapter.calls().is_empty());
}

#[tokio::test]
async fn output_mode_command_updates_config_and_replies() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let pairing_codes = PairingCodes::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");

    handle_inbound_message(
        &sessions,
        &config,
        &pairing_codes,
        &adapter,
        "tgbot",
        &chat_id,
        &user_id,
        "/output_mode verbose",
        0,
    )
    .await;

    assert_eq!(config.read().preference(&chat_id).output_mode_or_default(), touchgrass_core::OutputMode::Verbose);
    assert_eq!(adapter.calls().len(), 1);
}

#[tokio::test]
async fn valid_pairing_code_pairs_the_sender() {
    let sessions = SessionManager::new();
    let config = RwLock::new(Config::default());
    let pairing_codes = PairingCodes::new();
    let (code, _) = pairing_codes.generate("telegram", 0);
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");

    handle_inbound_message(
        &sessions,
        &config,
        &pairing_codes,
        &adapter,
        "tgbot",
        &chat_id,
        &user_id,
        &format!("/pair {code}"),
        0,
    )
    .await;

    assert!(config.read().is_paired(&user_id));
}

#[tokio::test]
async fn single_select_poll_answer_enqueues_token_and_closes_picker() {
    let sessions = SessionManager::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");
    let session = sessions.register_remote("claude", chat_id.clone(), user_id.clone(), "/tmp", None);
    sessions.create_picker(touchgrass_core::PickerState::new(
        "poll-1",
        session.id.clone(),
        chat_id.clone(),
        user_id.clone(),
        touchgrass_core::PickerKind::Question,
        vec!["yes".to_string(), "no".to_string()],
        5,
    ));

    handle_poll_answer(
        &sessions,
        &adapter,
        touchgrass_wire::PollAnswer {
            poll_id: "poll-1".to_string(),
            chat_id,
            user_id,
            selected_indices: vec![0],
            free_text: None,
        },
    )
    .await;

    assert_eq!(sessions.drain_remote_input(&session.id), vec!["\x1b[POLL:0:0]".to_string()]);
    assert!(sessions.get_picker("poll-1").is_none());
}

#[tokio::test]
async fn file_picker_toggle_stays_open_and_sets_pending_mention() {
    let sessions = SessionManager::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");
    let session = sessions.register_remote("claude", chat_id.clone(), user_id.clone(), "/tmp", None);
    sessions.create_picker(touchgrass_core::PickerState::new(
        "poll-2",
        session.id.clone(),
        chat_id.clone(),
        user_id.clone(),
        touchgrass_core::PickerKind::ResumeFile,
        vec!["a.txt".to_string(), "b.txt".to_string()],
        5,
    ));

    handle_poll_answer(
        &sessions,
        &adapter,
        touchgrass_wire::PollAnswer {
            poll_id: "poll-2".to_string(),
            chat_id: chat_id.clone(),
            user_id: user_id.clone(),
            selected_indices: vec![1],
            free_text: None,
        },
    )
    .await;

    // the toggle redraws under a fresh poll id; the old slot is gone
    assert!(sessions.get_picker("poll-2").is_none());
    assert_eq!(adapter.calls().len(), 1);
    assert_eq!(
        sessions.take_pending_file_mentions(&session.id, &chat_id, &user_id),
        Some(vec!["b.txt".to_string()])
    );
}

#[tokio::test]
async fn file_picker_more_redraws_with_next_page() {
    let sessions = SessionManager::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");
    let session = sessions.register_remote("claude", chat_id.clone(), user_id.clone(), "/tmp", None);
    let options = vec!["a.txt".to_string(), "b.txt".to_string(), "c.txt".to_string()];
    sessions.create_picker(touchgrass_core::PickerState::new(
        "poll-3",
        session.id.clone(),
        chat_id.clone(),
        user_id.clone(),
        touchgrass_core::PickerKind::ResumeFile,
        options,
        2,
    ));

    // page is ["a.txt", "b.txt"], then "➡️ More" at index 2
    handle_poll_answer(
        &sessions,
        &adapter,
        touchgrass_wire::PollAnswer {
            poll_id: "poll-3".to_string(),
            chat_id,
            user_id,
            selected_indices: vec![2],
            free_text: None,
        },
    )
    .await;

    assert!(sessions.get_picker("poll-3").is_none(), "the old poll slot closes");
    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
}

#[tokio::test]
async fn file_picker_cancel_discards_picker() {
    let sessions = SessionManager::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");
    let session = sessions.register_remote("claude", chat_id.clone(), user_id.clone(), "/tmp", None);
    sessions.create_picker(touchgrass_core::PickerState::new(
        "poll-4",
        session.id.clone(),
        chat_id.clone(),
        user_id.clone(),
        touchgrass_core::PickerKind::ResumeFile,
        vec!["a.txt".to_string()],
        5,
    ));

    // only option is "a.txt", so "❌ Cancel" sits at index 1
    handle_poll_answer(
        &sessions,
        &adapter,
        touchgrass_wire::PollAnswer {
            poll_id: "poll-4".to_string(),
            chat_id,
            user_id,
            selected_indices: vec![1],
            free_text: None,
        },
    )
    .await;

    assert!(sessions.get_picker("poll-4").is_none());
    assert!(adapter.calls().is_empty());
}

#[tokio::test]
async fn pending_file_mention_prepends_to_next_plain_text() {
    let sessions = SessionManager::new();
    let config = paired_config();
    let pairing_codes = PairingCodes::new();
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:1");
    let user_id = UserId::new("telegram:1");
    let session = sessions.register_remote("claude", chat_id.clone(), user_id.clone(), "/tmp", None);
    sessions.set_pending_file_mentions(session.id, chat_id.clone(), user_id.clone(), vec!["a.txt".to_string()]);

    handle_inbound_message(
        &sessions,
        &config,
        &pairing_codes,
        &adapter,
        "tgbot",
        &chat_id,
        &user_id,
        "look at this",
        0,
    )
    .await;

    assert_eq!(sessions.drain_remote_input(&session.id), vec!["@a.txt look at this".to_string()]);
    assert_eq!(sessions.take_pending_file_mentions(&session.id, &chat_id, &user_id), None);
}
