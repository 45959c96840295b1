use super::*;

#[test]
fn vendor_binary_names_match_their_cli_tools() {
    assert_eq!(vendor_binary(Vendor::Claude), "claude");
    assert_eq!(vendor_binary(Vendor::Codex), "codex");
    assert_eq!(vendor_binary(Vendor::Pi), "pi");
    assert_eq!(vendor_binary(Vendor::Kimi), "kimi");
}
