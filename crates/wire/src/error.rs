// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `{ok: false, error, status}` response shape, and the error enum
//! control-server handlers return before it's mapped to an HTTP status.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("unknown session")]
    UnknownSession,
    #[error("forbidden: not the session owner")]
    Forbidden,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized => 401,
            ApiError::UnknownSession => 404,
            ApiError::Forbidden => 403,
            ApiError::BadRequest(_) => 400,
            ApiError::Internal(_) => 500,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub ok: bool,
    pub error: String,
    pub status: u16,
}

impl From<&ApiError> for ApiErrorBody {
    fn from(err: &ApiError) -> Self {
        Self { ok: false, error: err.to_string(), status: err.status() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_spec_taxonomy() {
        assert_eq!(ApiError::Unauthorized.status(), 401);
        assert_eq!(ApiError::UnknownSession.status(), 404);
        assert_eq!(ApiError::Forbidden.status(), 403);
    }

    #[test]
    fn body_shape_is_ok_false_error_status() {
        let err = ApiError::BadRequest("missing field".into());
        let body = ApiErrorBody::from(&err);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["status"], 400);
        assert_eq!(json["error"], "bad request: missing field");
    }
}
