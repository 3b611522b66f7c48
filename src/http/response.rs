//! Response construction.
//!
//! Errors become `{ "type": "error", "message": ... }` with the status the
//! error maps to. A 200 upstream body is passed through untouched when it is
//! JSON, and wrapped as a JSON string when it is not.
//!
//! `Access-Control-Allow-Origin` and `Content-Type` are not set here; the
//! server stamps them on every response, including ones Axum builds itself.

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::RelayError;

/// Wire shape of every error the relay reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: "error".to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody::new(self.to_string()));
        match self {
            RelayError::MethodNotAllowed(_) => {
                (status, [(header::ALLOW, "POST")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

/// Build the 200 response for an upstream body.
pub fn passthrough(body: Bytes) -> Response {
    if serde_json::from_slice::<serde::de::IgnoredAny>(&body).is_ok() {
        (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    } else {
        let text = String::from_utf8_lossy(&body).into_owned();
        (StatusCode::OK, Json(Value::String(text))).into_response()
    }
}
