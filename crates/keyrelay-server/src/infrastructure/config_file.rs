//! Optional TOML configuration file for keyrelay-server.
//!
//! The file is only read when `--config <path>` is given.  Every key is
//! optional; missing keys take the built-in defaults.  Environment variables
//! and command-line flags are layered on top by `main.rs`.
//!
//! ```toml
//! [server]
//! bind_address = "127.0.0.1"
//! port = 9090
//! max_record_bytes = 65536
//! log_level = "debug"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{ServerConfig, DEFAULT_MAX_RECORD_BYTES, DEFAULT_PORT};

/// Error type for configuration file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid TOML or has the wrong shape.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address` is not an IP address.
    #[error("invalid bind_address {0:?}: expected an IPv4 or IPv6 address")]
    InvalidBindAddress(String),

    /// `max_record_bytes` is zero.
    #[error("max_record_bytes must be greater than zero")]
    ZeroRecordLimit,
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Top-level shape of the file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
}

/// The `[server]` table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_max_record_bytes() -> usize {
    DEFAULT_MAX_RECORD_BYTES
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            max_record_bytes: default_max_record_bytes(),
            log_level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl ConfigFile {
    /// Reads and parses the file at `path`.
    ///
    /// Unlike a per-user settings file, an explicitly named config that does
    /// not exist is an error.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`]
    /// if it is not valid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Converts the file into a full [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidBindAddress`] or [`ConfigError::ZeroRecordLimit`]
    /// for values that parse but cannot be used.
    pub fn into_server_config(self) -> Result<ServerConfig, ConfigError> {
        let ServerSection {
            bind_address,
            port,
            max_record_bytes,
            log_level,
        } = self.server;

        let ip: IpAddr = bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(bind_address.clone()))?;
        if max_record_bytes == 0 {
            return Err(ConfigError::ZeroRecordLimit);
        }

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(ip, port),
            max_record_bytes,
            log_level,
            ..ServerConfig::default()
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
