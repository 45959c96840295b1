// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn generated_ids_match_shape() {
    for _ in 0..100 {
        let id = SessionId::generate();
        let s = id.as_str();
        assert!(s.starts_with("r-"));
        assert_eq!(s.len(), 8);
        assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn parse_round_trips() {
    let id = SessionId::generate();
    let parsed = SessionId::parse(id.as_str()).expect("round trip");
    assert_eq!(id, parsed);
}

#[test]
fn parse_rejects_bad_shape() {
    assert!(SessionId::parse("r-abc").is_none());
    assert!(SessionId::parse("x-abcdef").is_none());
    assert!(SessionId::parse("r-abcdeg").is_none());
    assert!(SessionId::parse("r-ABCDEF").is_none());
}

#[test]
fn short_truncates() {
    assert_eq!(short("hello world", 5), "hello");
    assert_eq!(short("hi", 5), "hi");
}
