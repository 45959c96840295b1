use super::*;
use touchgrass_core::Config;

#[test]
fn sets_known_numeric_key() {
    let mut config = Config::default();
    set_dotted_key(&mut config, "settings.max_sessions", "4").unwrap();
    assert_eq!(config.settings.max_sessions, 4);
}

#[test]
fn sets_default_shell_string() {
    let mut config = Config::default();
    set_dotted_key(&mut config, "settings.default_shell", "/bin/zsh").unwrap();
    assert_eq!(config.settings.default_shell.as_deref(), Some("/bin/zsh"));
}

#[test]
fn rejects_unknown_key() {
    let mut config = Config::default();
    assert!(set_dotted_key(&mut config, "settings.nope", "1").is_err());
}

#[test]
fn rejects_non_numeric_value_for_numeric_key() {
    let mut config = Config::default();
    assert!(set_dotted_key(&mut config, "settings.max_sessions", "not-a-number").is_err());
}
