// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The control server (spec §4.6): the HTTP surface CLI adapters and
//! `tg` subcommands speak to, authenticated by a fixed-length token in
//! the `x-touchgrass-auth` header. Split the way the teacher's listener
//! splits by concern — auth middleware, route handlers, and shared state
//! each in their own module.

mod auth;
mod routes;
mod state;

pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the full router: every route behind the auth middleware except
/// the liveness probe, which must answer before a caller can know the
/// token is even correct.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/status", axum::routing::get(routes::status))
        .route("/shutdown", axum::routing::post(routes::shutdown))
        .route("/generate-code", axum::routing::post(routes::generate_code))
        .route("/channels", axum::routing::get(routes::channels))
        .route("/remote/register", axum::routing::post(routes::register))
        .route("/remote/bind-chat", axum::routing::post(routes::bind_chat))
        .route("/remote/{id}/input", axum::routing::get(routes::get_input))
        .route("/remote/{id}/send-input", axum::routing::post(routes::send_input))
        .route("/remote/{id}/exit", axum::routing::post(routes::exit_session))
        .route("/remote/{id}/subscribed-groups", axum::routing::get(routes::subscribed_groups))
        .route("/remote/{id}/tool-call", axum::routing::post(routes::tool_call))
        .route("/remote/{id}/tool-result", axum::routing::post(routes::tool_result))
        .route("/remote/{id}/approval-needed", axum::routing::post(routes::approval_needed))
        .route("/remote/{id}/question", axum::routing::post(routes::question))
        .route("/remote/{id}/thinking", axum::routing::post(routes::thinking))
        .route("/remote/{id}/assistant", axum::routing::post(routes::assistant))
        .route("/remote/{id}/typing", axum::routing::post(routes::typing))
        .route("/remote/{id}/background-job", axum::routing::post(routes::background_job))
        .route("/metrics", axum::routing::get(routes::metrics))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth::require_token));

    Router::new()
        .route("/health", axum::routing::get(routes::health))
        .merge(protected)
        .fallback(routes::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
