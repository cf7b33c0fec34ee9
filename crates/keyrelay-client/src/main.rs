//! keyrelay client: entry point.
//!
//! Connects to a keyrelay server and sends every line typed at the prompt,
//! one keystroke per character followed by Enter.
//!
//! ```text
//! keyrelay-client [--server HOST:PORT]
//! ```
//!
//! `KEYRELAY_SERVER` sets the server when `--server` is not given.  End
//! input with Ctrl+D (Ctrl+Z on Windows) or stop with Ctrl+C.

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyrelay_client::config::DEFAULT_SERVER;
use keyrelay_client::{forward_lines, ClientConfig};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// keyrelay interactive client.
#[derive(Debug, Parser)]
#[command(
    name = "keyrelay-client",
    about = "Types lines from this terminal on a remote keyrelay server",
    version
)]
struct Cli {
    /// Server address as `host:port`.
    #[arg(long, default_value = DEFAULT_SERVER, env = "KEYRELAY_SERVER")]
    server: String,
}

impl Cli {
    /// Validates the arguments and builds a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if `--server` has no port or the port is not a
    /// number.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let (host, port) = self
            .server
            .rsplit_once(':')
            .with_context(|| format!("invalid server address '{}': expected host:port", self.server))?;
        anyhow::ensure!(!host.is_empty(), "invalid server address '{}': empty host", self.server);
        port.parse::<u16>()
            .with_context(|| format!("invalid server address '{}': bad port", self.server))?;

        Ok(ClientConfig {
            server: self.server,
            ..ClientConfig::default()
        })
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_client_config()?;

    let mut conn = TcpStream::connect(&config.server)
        .await
        .with_context(|| format!("failed to connect to server at {}", config.server))?;
    info!("connected to server at {}", config.server);
    info!("type characters and press Enter; they will be typed on the server");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    tokio::select! {
        result = forward_lines(stdin, &mut conn, &mut stdout, &config.prompt) => {
            let stats = result?;
            info!("sent {} record(s) for {} line(s)", stats.records, stats.lines);
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("received Ctrl+C");
        }
    }

    info!("client shutting down");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
