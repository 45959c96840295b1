use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use parking_lot::RwLock;
use tower::ServiceExt;
use touchgrass_adapters::fake::FakeChatAdapter;
use touchgrass_core::Config;
use touchgrass_storage::BoardStore;

use super::*;
use crate::board_tracker::BoardTracker;
use crate::pairing::PairingCodes;
use crate::session_manager::SessionManager;

fn test_state() -> AppState {
    AppState {
        sessions: Arc::new(SessionManager::new()),
        boards: Arc::new(BoardTracker::new()),
        board_store: Arc::new(BoardStore::new(std::env::temp_dir().join("touchgrass-test-boards.json"))),
        config: Arc::new(RwLock::new(Config::default())),
        config_path: Arc::new(std::env::temp_dir().join("touchgrass-test-config.json")),
        pairing_codes: Arc::new(PairingCodes::new()),
        chat_adapter: Arc::new(FakeChatAdapter::new()),
        auth_token: Arc::new("s3cret".to_string()),
        started_at: 0,
        bot_name: Arc::new("tgbot".to_string()),
        shutdown: Arc::new(tokio::sync::Notify::new()),
    }
}

#[tokio::test]
async fn health_answers_without_auth() {
    let app = build_router(test_state());
    let response = app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_route_rejects_missing_token() {
    let app = build_router(test_state());
    let response = app.oneshot(Request::get("/status").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_rejects_wrong_token() {
    let app = build_router(test_state());
    let request =
        Request::get("/status").header("x-touchgrass-auth", "wrong").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_accepts_correct_token() {
    let app = build_router(test_state());
    let request =
        Request::get("/status").header("x-touchgrass-auth", "s3cret").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_falls_through_to_not_found() {
    let app = build_router(test_state());
    let request =
        Request::get("/nope").header("x-touchgrass-auth", "s3cret").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
