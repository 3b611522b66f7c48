//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the relay handler on every path
//! - Wire up middleware (request ID, tracing, body limit, CORS framing)
//! - Bind server to listener and shut down gracefully
//! - Translate relay outcomes into responses, with logs and metrics

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, FailedToBufferBody},
        DefaultBodyLimit, State,
    },
    http::{header, HeaderMap, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::response::passthrough;
use crate::observability::metrics;
use crate::relay::{relay, RelayError, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        Self::with_client(config, UpstreamClient::default())
    }

    /// Create a server that relays through the given client.
    pub fn with_client(config: RelayConfig, upstream: UpstreamClient) -> Self {
        let state = AppState { upstream };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(relay_handler))
            .route("/{*path}", any(relay_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_body_size = self.config.security.max_body_size,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Relay handler, mounted on every path.
async fn relay_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    let body = body.map_err(|rejection| match rejection {
        BytesRejection::FailedToBufferBody(FailedToBufferBody::LengthLimitError(_)) => {
            RelayError::PayloadTooLarge
        }
        _ => RelayError::InvalidJson,
    });

    match relay(&state.upstream, &method, body).await {
        Ok(bytes) => {
            tracing::debug!(
                request_id = %request_id,
                bytes = bytes.len(),
                "Relayed upstream response"
            );
            metrics::record_request("relayed", 200, start_time);
            passthrough(bytes)
        }
        Err(err) => {
            match &err {
                RelayError::UpstreamTransport(message) => {
                    tracing::error!(
                        request_id = %request_id,
                        error = %message,
                        "Upstream request failed"
                    );
                }
                RelayError::UpstreamStatus { status, .. } => {
                    tracing::warn!(
                        request_id = %request_id,
                        status = %status,
                        "Upstream returned non-200"
                    );
                }
                other => {
                    tracing::debug!(
                        request_id = %request_id,
                        method = %method,
                        reason = %other,
                        "Rejected request"
                    );
                }
            }
            metrics::record_request(err.kind(), err.status().as_u16(), start_time);
            err.into_response()
        }
    }
}
