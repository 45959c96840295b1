use super::*;

#[test]
fn creates_and_reuses_auth_token() {
    let dir = tempfile::tempdir().unwrap();
    let first = read_or_create_auth_token(dir.path()).unwrap();
    assert_eq!(first.len(), env::AUTH_TOKEN_LEN);
    let second = read_or_create_auth_token(dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn falls_back_to_path_lookup_when_no_sibling_binary() {
    let binary = find_tgd_binary();
    assert!(!binary.as_os_str().is_empty());
}

#[test]
fn newest_binary_mtime_is_nonzero_under_test() {
    assert!(newest_binary_mtime() > 0);
}
