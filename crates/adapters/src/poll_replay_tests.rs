use super::*;

#[test]
fn scenario_2_bracketed_paste() {
    assert_eq!(bracketed_paste("hello @"), b"\x1b[200~hello @\x1b[201~".to_vec());
}

#[test]
fn detects_upload_path() {
    assert!(is_upload_path("/home/user/.touchgrass/uploads/screenshot.png"));
    assert!(!is_upload_path("just some text"));
}

#[test]
fn parses_single_select_token() {
    let token = parse_poll_token("\x1b[POLL:2:0]").unwrap();
    assert_eq!(token, PollToken::Select { option_indices: vec![2], multi: false });
}

#[test]
fn parses_multi_select_token_with_several_indices() {
    let token = parse_poll_token("\x1b[POLL:0,2,3:1]").unwrap();
    assert_eq!(token, PollToken::Select { option_indices: vec![0, 2, 3], multi: true });
}

#[test]
fn parses_next_token() {
    let token = parse_poll_token("\x1b[POLL_NEXT:4:9]").unwrap();
    assert_eq!(token, PollToken::Next { last_position: 4, count: 9 });
}

#[test]
fn parses_submit_token() {
    assert_eq!(parse_poll_token("\x1b[POLL_SUBMIT]"), Some(PollToken::Submit));
}

#[test]
fn parses_other_token() {
    assert_eq!(parse_poll_token("\x1b[POLL_OTHER]"), Some(PollToken::Other));
}

#[test]
fn ordinary_text_is_not_a_token() {
    assert_eq!(parse_poll_token("hello @"), None);
    assert_eq!(parse_poll_token(""), None);
}

#[test]
fn select_replay_steps_down_then_enters() {
    let token = PollToken::Select { option_indices: vec![2], multi: false };
    assert_eq!(
        replay_keystrokes(&token),
        vec![Keystroke::Down, Keystroke::Down, Keystroke::Enter]
    );
}

#[test]
fn multi_select_replay_enters_at_each_option_without_resetting_position() {
    let token = PollToken::Select { option_indices: vec![1, 3], multi: true };
    assert_eq!(
        replay_keystrokes(&token),
        vec![Keystroke::Down, Keystroke::Enter, Keystroke::Down, Keystroke::Down, Keystroke::Enter]
    );
}

#[test]
fn next_replay_steps_to_the_next_button() {
    let token = PollToken::Next { last_position: 2, count: 5 };
    assert_eq!(
        replay_keystrokes(&token),
        vec![Keystroke::Down, Keystroke::Down, Keystroke::Down, Keystroke::Enter]
    );
}

#[test]
fn submit_replay_is_a_single_enter() {
    assert_eq!(replay_keystrokes(&PollToken::Submit), vec![Keystroke::Enter]);
}

#[test]
fn other_replay_has_no_keystrokes() {
    assert_eq!(replay_keystrokes(&PollToken::Other), Vec::new());
}
