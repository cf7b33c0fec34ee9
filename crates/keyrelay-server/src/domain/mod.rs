//! Domain layer for keyrelay-server.
//!
//! Holds plain data with no I/O: the runtime configuration assembled by
//! `main.rs` from defaults, the optional TOML file, the environment and the
//! command line.

pub mod config;

pub use config::{ServerConfig, DEFAULT_MAX_RECORD_BYTES, DEFAULT_PORT};
