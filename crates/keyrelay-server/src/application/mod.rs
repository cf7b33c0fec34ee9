//! Application layer for keyrelay-server.
//!
//! - [`inject_character`]: the [`InjectionBackend`](inject_character::InjectionBackend)
//!   capability and the shared key-resolution policy.
//! - [`session`]: the per-connection read/decode/inject loop.
//! - [`report`]: where session events and failures are reported.

pub mod inject_character;
pub mod report;
pub mod session;
