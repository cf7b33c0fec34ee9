//! TCP transport for keyrelay-server.

pub mod listener;

pub use listener::{run_server, AcceptSource, Listener};
