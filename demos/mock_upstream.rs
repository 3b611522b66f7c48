//! A pretend third-party API to point the relay at.
//!
//! ```text
//! cargo run --example mock_upstream
//! curl -s localhost:8080 -d '{"url":"http://127.0.0.1:8081/echo","data":{"hi":1}}'
//! ```

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route(
            "/echo",
            post(|Json(body): Json<Value>| async move { Json(json!({ "echo": body })) }),
        )
        .route("/missing", post(|| async { (StatusCode::NOT_FOUND, "gone") }));

    let addr = SocketAddr::from(([127, 0, 0, 1], 8081));
    println!("Mock upstream listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
