use super::*;

#[test]
fn push_then_read_round_trips() {
    let mut ring = PtyRing::new();
    ring.push(b"hello");
    assert_eq!(ring.as_text(), "hello");
}

#[test]
fn caps_at_2kb_dropping_oldest() {
    let mut ring = PtyRing::new();
    ring.push(&[b'a'; CAPACITY]);
    ring.push(b"tail");
    let text = ring.as_text();
    assert_eq!(text.len(), CAPACITY);
    assert!(text.ends_with("tail"));
}

#[test]
fn empty_ring_is_empty_text() {
    let ring = PtyRing::new();
    assert_eq!(ring.as_text(), "");
}
