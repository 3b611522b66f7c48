//! Relay error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can end a relayed request early.
///
/// Each variant maps to exactly one HTTP status and one message for the
/// `{ "type": "error", "message": ... }` body.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound method was not POST.
    #[error("Method {0} Not Allowed")]
    MethodNotAllowed(String),

    /// Inbound body was not valid JSON.
    #[error("Invalid JSON in request body.")]
    InvalidJson,

    /// `url` was absent or falsy.
    #[error("Missing \"my-url\" in request body.")]
    MissingUrl,

    /// Inbound body exceeded `security.max_body_size`.
    #[error("Request body too large.")]
    PayloadTooLarge,

    /// Upstream answered with something other than 200.
    #[error("{text}")]
    UpstreamStatus { status: StatusCode, text: String },

    /// The outbound call could not be made or completed.
    #[error("{0}")]
    UpstreamTransport(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidJson | RelayError::MissingUrl => StatusCode::BAD_REQUEST,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::UpstreamStatus { status, .. } => *status,
            RelayError::UpstreamTransport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for the `outcome` metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MethodNotAllowed(_) => "method_not_allowed",
            RelayError::InvalidJson => "invalid_json",
            RelayError::MissingUrl => "missing_url",
            RelayError::PayloadTooLarge => "payload_too_large",
            RelayError::UpstreamStatus { .. } => "upstream_status",
            RelayError::UpstreamTransport(_) => "upstream_transport",
        }
    }

    /// Build a transport error from an error and everything beneath it.
    ///
    /// reqwest's top-level message ("error sending request for url ...")
    /// hides the actual cause, so the source chain is appended.
    pub fn transport(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        RelayError::UpstreamTransport(message)
    }
}
