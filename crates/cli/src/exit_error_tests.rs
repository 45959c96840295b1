use super::*;

#[test]
fn config_uses_exit_code_one() {
    let err = ExitError::config("missing TOUCHGRASS_STATE_DIR");
    assert_eq!(err.code, 1);
    assert_eq!(err.message, "missing TOUCHGRASS_STATE_DIR");
}

#[test]
fn display_prints_message_only() {
    let err = ExitError::new(137, "killed");
    assert_eq!(err.to_string(), "killed");
}
