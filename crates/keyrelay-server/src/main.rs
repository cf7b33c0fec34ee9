//! keyrelay server: entry point.
//!
//! Listens for TCP clients and types whatever they send on this machine's
//! keyboard.
//!
//! # Usage
//!
//! ```text
//! keyrelay-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>              TOML config file
//!   --bind <IP>                  Interface to listen on [default: 0.0.0.0]
//!   --port <PORT>                TCP port [default: 9090]
//!   --max-record-bytes <BYTES>   Per-record size cap [default: 65536]
//!   --log-level <FILTER>         Log filter when RUST_LOG is unset [default: info]
//!   --dry-run                    Log keystrokes instead of injecting them
//! ```
//!
//! # Configuration precedence
//!
//! Built-in defaults, then the `--config` file, then environment variables,
//! then command-line flags.  `RUST_LOG` overrides the log level entirely.
//!
//! | Variable                    | Flag                 |
//! |-----------------------------|----------------------|
//! | `KEYRELAY_BIND`             | `--bind`             |
//! | `KEYRELAY_PORT`             | `--port`             |
//! | `KEYRELAY_MAX_RECORD_BYTES` | `--max-record-bytes` |
//! | `KEYRELAY_LOG_LEVEL`        | `--log-level`        |
//!
//! # Security
//!
//! Anyone who can reach the port can type on this machine.  There is no
//! authentication or encryption; bind to `127.0.0.1` unless the network is
//! trusted.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use keyrelay_server::application::inject_character::InjectionBackend;
use keyrelay_server::application::report::TracingReporter;
use keyrelay_server::domain::ServerConfig;
use keyrelay_server::infrastructure::config_file::ConfigFile;
use keyrelay_server::infrastructure::input_injection::{logging::LoggingBackend, platform_backend};
use keyrelay_server::infrastructure::network::run_server;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// keyrelay server.
///
/// Accepts TCP connections carrying newline-delimited `{"char":"..."}`
/// records and injects each character as a key press.
///
/// Every option is optional so that an unset flag falls through to the
/// config file and then to the built-in default.
#[derive(Debug, Parser)]
#[command(
    name = "keyrelay-server",
    about = "Injects keystrokes received over TCP into this machine",
    version
)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// IP address to listen on.
    ///
    /// `0.0.0.0` accepts connections from any interface; `127.0.0.1` only
    /// from this machine.
    #[arg(long, value_name = "IP", env = "KEYRELAY_BIND")]
    bind: Option<IpAddr>,

    /// TCP port to listen on.
    #[arg(long, env = "KEYRELAY_PORT")]
    port: Option<u16>,

    /// Largest accepted record in bytes, excluding the newline.
    #[arg(long, value_name = "BYTES", env = "KEYRELAY_MAX_RECORD_BYTES")]
    max_record_bytes: Option<usize>,

    /// Log filter used when `RUST_LOG` is not set (e.g. `debug`).
    #[arg(long, value_name = "FILTER", env = "KEYRELAY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log keystrokes at `info` instead of injecting them into the OS.
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Layers the config file and the parsed flags over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a value is
    /// out of range.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::load(path)
                .and_then(ConfigFile::into_server_config)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(ip) = self.bind {
            config.bind_addr.set_ip(ip);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(max) = self.max_record_bytes {
            anyhow::ensure!(max > 0, "--max-record-bytes must be greater than zero");
            config.max_record_bytes = max;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config.dry_run = self.dry_run;

        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration comes first so that its log level can seed the filter.
    let config = Cli::parse().into_server_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let backend: Arc<dyn InjectionBackend> = if config.dry_run {
        Arc::new(LoggingBackend)
    } else {
        platform_backend().context("failed to initialise keystroke injection")?
    };

    info!(
        "keyrelay server starting: bind={}, max_record_bytes={}, backend={}",
        config.bind_addr,
        config.max_record_bytes,
        backend.name()
    );
    if !config.bind_addr.ip().is_loopback() {
        warn!(
            "listening on {} without authentication; anyone who can reach it can type here",
            config.bind_addr
        );
    }

    tokio::select! {
        result = run_server(&config, backend, Arc::new(TracingReporter)) => result?,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("received Ctrl+C, shutting down");
        }
    }

    info!("keyrelay server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};
    use keyrelay_server::domain::{DEFAULT_MAX_RECORD_BYTES, DEFAULT_PORT};

    /// Parses `args` with every `env = "KEYRELAY_*"` fallback removed, so the
    /// caller's environment cannot leak into the result.
    fn try_cli(args: &[&str]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(std::iter::once("keyrelay-server").chain(args.iter().copied()))?;
        Cli::from_arg_matches(&matches)
    }

    fn cli(args: &[&str]) -> Cli {
        try_cli(args).unwrap()
    }

    #[test]
    fn test_cli_defaults_produce_default_config() {
        // Arrange / Act
        let config = cli(&[]).into_server_config().unwrap();

        // Assert
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_unset_options_yield_default_config() {
        // Arrange: build the struct directly, as if no flag or variable were set.
        let cli = Cli {
            config: None,
            bind: None,
            port: None,
            max_record_bytes: None,
            log_level: None,
            dry_run: false,
        };

        // Act
        let config = cli.into_server_config().unwrap();

        // Assert
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_env_fallbacks_are_declared() {
        let command = Cli::command();
        let port = command
            .get_arguments()
            .find(|a| a.get_id() == "port")
            .unwrap();
        assert_eq!(port.get_env(), Some(std::ffi::OsStr::new("KEYRELAY_PORT")));
    }

    #[test]
    fn test_cli_port_override() {
        let config = cli(&["--port", "9999"]).into_server_config().unwrap();
        assert_eq!(config.bind_addr.port(), 9999);
        assert!(config.bind_addr.ip().is_unspecified());
    }

    #[test]
    fn test_cli_bind_override() {
        let config = cli(&["--bind", "127.0.0.1"]).into_server_config().unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn test_cli_rejects_hostname_for_bind() {
        let result = try_cli(&["--bind", "localhost"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_max_record_bytes_override() {
        let config = cli(&["--max-record-bytes", "512"]).into_server_config().unwrap();
        assert_eq!(config.max_record_bytes, 512);
    }

    #[test]
    fn test_cli_zero_max_record_bytes_is_an_error() {
        let result = cli(&["--max-record-bytes", "0"]).into_server_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_dry_run_flag() {
        let config = cli(&["--dry-run"]).into_server_config().unwrap();
        assert!(config.dry_run);
        assert_eq!(config.max_record_bytes, DEFAULT_MAX_RECORD_BYTES);
    }

    #[test]
    fn test_cli_log_level_override() {
        let config = cli(&["--log-level", "debug"]).into_server_config().unwrap();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let path = std::env::temp_dir().join("keyrelay-missing-config.toml");
        let result = cli(&["--config", path.to_str().unwrap()]).into_server_config();
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        // Arrange: file sets port 7000 and a 1 KiB cap.
        let path = std::env::temp_dir().join(format!(
            "keyrelay-main-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[server]\nport = 7000\nmax_record_bytes = 1024\n").unwrap();

        // Act: the flag overrides the port only.
        let result = cli(&["--config", path.to_str().unwrap(), "--port", "7001"])
            .into_server_config();
        let _ = std::fs::remove_file(&path);
        let config = result.unwrap();

        // Assert
        assert_eq!(config.bind_addr.port(), 7001);
        assert_eq!(config.max_record_bytes, 1024);
    }
}
