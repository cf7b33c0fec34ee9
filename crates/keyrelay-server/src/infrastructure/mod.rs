//! Infrastructure layer: OS keystroke injection, the TCP listener and the
//! TOML config file loader.

pub mod config_file;
pub mod input_injection;
pub mod network;
