//! The relay pipeline for one inbound request.

use axum::body::Bytes;
use axum::http::Method;

use crate::relay::error::RelayError;
use crate::relay::payload::RelayRequest;
use crate::relay::upstream::UpstreamClient;

/// Relay one inbound request.
///
/// `body` is whatever the hosting layer managed to buffer; a read failure is
/// only reported once the method gate has passed. Returns the upstream's
/// 200 body, or the error that ended the pipeline.
pub async fn relay(
    client: &UpstreamClient,
    method: &Method,
    body: Result<Bytes, RelayError>,
) -> Result<Bytes, RelayError> {
    if *method != Method::POST {
        return Err(RelayError::MethodNotAllowed(method.to_string()));
    }

    let request = RelayRequest::from_body(&body?)?;

    tracing::debug!(url = %request.url, headers = request.headers.len(), "Relaying request");

    client.post(&request).await
}
