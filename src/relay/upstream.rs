//! Outbound call to the caller-chosen upstream.

use std::time::Instant;

use axum::body::Bytes;
use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};

use crate::observability::metrics;
use crate::relay::error::RelayError;
use crate::relay::payload::RelayRequest;

/// Thin wrapper over a pooled `reqwest::Client`.
///
/// No timeout and no retries are configured: a request either completes,
/// or fails with whatever the client reports.
#[derive(Clone, Default)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// POST `request.data` to `request.url` and return the body of a 200 reply.
    pub async fn post(&self, request: &RelayRequest) -> Result<Bytes, RelayError> {
        let headers = header_map(&request.headers)?;
        let start = Instant::now();

        // Caller headers go in before `.json()` so an explicit Content-Type wins.
        let result = self.client
            .post(&request.url)
            .headers(headers)
            .json(&request.data)
            .send()
            .await;
        metrics::record_upstream_latency(start);

        let response = result.map_err(|e| RelayError::transport(&e))?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RelayError::UpstreamStatus {
                status,
                text: status_text(status, response.extensions().get::<ReasonPhrase>()),
            });
        }

        response.bytes().await.map_err(|e| RelayError::transport(&e))
    }
}

/// The upstream's own reason phrase.
///
/// hyper only records a `ReasonPhrase` when it differs from the canonical
/// one, so its absence means the canonical text (or the bare code) applies.
fn status_text(status: StatusCode, reason: Option<&ReasonPhrase>) -> String {
    match reason {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string()),
    }
}

fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap, RelayError> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            RelayError::UpstreamTransport(format!("Invalid header name \"{}\"", name))
        })?;
        let value = HeaderValue::from_str(value).map_err(|_| {
            RelayError::UpstreamTransport(format!("Invalid value for header \"{}\"", name))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}
