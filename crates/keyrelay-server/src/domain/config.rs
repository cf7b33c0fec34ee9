//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for runtime settings.  It
//! is a plain struct: no environment reads, no file access.  `main.rs`
//! layers the config file, environment variables and CLI flags on top of
//! [`ServerConfig::default`] and passes the result down.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port the server listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 9090;

/// Largest accepted wire record, excluding the newline terminator.
///
/// A record that grows past this without a newline closes its session.
pub const DEFAULT_MAX_RECORD_BYTES: usize = 64 * 1024;

/// All runtime configuration for the keyrelay server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address and port the TCP listener binds to.
    ///
    /// `0.0.0.0` accepts connections on every interface.  There is no
    /// authentication, so binding `127.0.0.1` is the only access control.
    pub bind_addr: SocketAddr,

    /// Per-record size cap enforced by each session.
    pub max_record_bytes: usize,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Record keystrokes in memory instead of injecting them into the OS.
    pub dry_run: bool,
}

impl Default for ServerConfig {
    /// | Field            | Default        |
    /// |------------------|----------------|
    /// | bind_addr        | `0.0.0.0:9090` |
    /// | max_record_bytes | 65536          |
    /// | log_level        | `info`         |
    /// | dry_run          | `false`        |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
            log_level: "info".to_string(),
            dry_run: false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
