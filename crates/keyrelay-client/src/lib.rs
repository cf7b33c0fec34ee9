//! keyrelay-client library.
//!
//! The client reads lines from a terminal and streams them to a keyrelay
//! server as one wire record per character.  The binary in `main.rs` only
//! wires stdin, stdout and a `TcpStream` into [`forward::forward_lines`];
//! everything it does can be exercised here against in-memory streams.

pub mod compose;
pub mod config;
pub mod forward;

pub use compose::records_for_line;
pub use config::ClientConfig;
pub use forward::{forward_lines, ForwardStats};
