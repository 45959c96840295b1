// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Auth middleware: every protected route requires the fixed-length token
//! in `x-touchgrass-auth`, compared in constant time.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use touchgrass_wire::{ApiError, AUTH_HEADER};

use crate::env::tokens_match;

use super::state::AppState;

pub async fn require_token(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    let supplied = req.headers().get(AUTH_HEADER).and_then(|v| v.to_str().ok()).unwrap_or("");
    if !tokens_match(&state.auth_token, supplied) {
        return api_error(ApiError::Unauthorized);
    }
    next.run(req).await
}

pub fn api_error(err: ApiError) -> Response {
    let status = axum::http::StatusCode::from_u16(err.status()).unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(touchgrass_wire::error::ApiErrorBody::from(&err))).into_response()
}
