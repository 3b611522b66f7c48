//! CORS relay.
//!
//! ```text
//!     Browser                  ┌───────────────────────────────┐
//!     POST {url,headers,data}  │           RELAY               │
//!     ─────────────────────────┼─▶ method gate → parse/validate│
//!                              │         │                     │
//!                              │         ▼                     │      POST data
//!                              │   upstream client ────────────┼────────────────▶ Upstream
//!                              │         │                     │
//!     ◀────────────────────────┼── JSON body / JSON error ◀────┼──────────────── response
//!     + Access-Control-Allow-  │                               │
//!       Origin: *              └───────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use cors_relay::config::{load_config, RelayConfig};
use cors_relay::lifecycle;

#[derive(Parser)]
#[command(name = "cors-relay")]
#[command(
    about = "Relay JSON POST requests to third-party URLs with CORS enabled",
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    lifecycle::start(config).await?;
    Ok(())
}
