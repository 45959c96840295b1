use super::*;
use touchgrass_core::ChatId;

#[tokio::test]
async fn send_is_recorded() {
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:42");
    adapter.send(&chat_id, "hello").await.unwrap();

    let calls = adapter.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        RecordedCall::Send { chat_id: id, text } => {
            assert_eq!(id, &chat_id);
            assert_eq!(text, "hello");
        }
        other => panic!("unexpected call: {other:?}"),
    }
}

#[tokio::test]
async fn dead_chat_fails_every_call() {
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:42");
    adapter.mark_dead(chat_id.clone());

    let err = adapter.send(&chat_id, "hello").await.unwrap_err();
    assert!(matches!(err, ChatAdapterError::DeadChat(_)));
    assert!(adapter.calls().is_empty());
}

#[tokio::test]
async fn send_poll_returns_distinct_ids() {
    let adapter = FakeChatAdapter::new();
    let chat_id = ChatId::new("telegram:42");
    let first = adapter.send_poll(&chat_id, "q1", &["a".to_string()]).await.unwrap();
    let second = adapter.send_poll(&chat_id, "q2", &["b".to_string()]).await.unwrap();
    assert_ne!(first, second);
}
