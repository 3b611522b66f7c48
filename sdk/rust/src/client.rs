use std::collections::HashMap;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One call to be relayed: the upstream target plus what to send it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayCall {
    pub url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RelayCall {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            data: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Error body the relay sends on every failure path.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Outcome of a relayed call as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayReply {
    /// Upstream answered 200; this is its body.
    Ok(Value),
    /// The relay (or the upstream, via the relay) reported an error.
    Err { status: StatusCode, message: String },
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self::with_client(Client::new(), relay_url)
    }

    /// Use a preconfigured `reqwest::Client` (proxies, TLS roots, ...).
    pub fn with_client(client: Client, relay_url: &str) -> Self {
        Self {
            client,
            relay_url: relay_url.to_string(),
        }
    }

    /// Send a call through the relay.
    pub async fn relay(&self, call: &RelayCall) -> Result<RelayReply, Box<dyn std::error::Error>> {
        let resp = self.client
            .post(&self.relay_url)
            .json(call)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if status == StatusCode::OK {
            return Ok(RelayReply::Ok(serde_json::from_str(&text)?));
        }

        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) if body.kind == "error" => Ok(RelayReply::Err {
                status,
                message: body.message,
            }),
            _ => Err(format!(
                "Relay returned status {} with unexpected body: {}",
                status, text
            )
            .into()),
        }
    }
}
