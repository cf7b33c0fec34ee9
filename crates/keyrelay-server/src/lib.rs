//! keyrelay-server library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does keyrelay-server do? (for beginners)
//!
//! The server is the machine whose keyboard is being *typed on* remotely.
//! Clients connect over TCP and stream one JSON record per character.  For
//! every record the server:
//!
//! 1. Decodes it into a [`keyrelay_core::CharacterEvent`].
//! 2. Resolves the character to a physical key position.
//! 3. Calls the platform input API (`SendInput` on Windows, XTest on Linux,
//!    CoreGraphics on macOS) to press and release that key, so the
//!    foreground application receives it as if typed locally.
//!
//! There is no authentication, no encryption and no reply traffic.  Every
//! failure stays on the server side as a log line.
//!
//! # Layers
//!
//! ```text
//! domain/          ServerConfig (plain data)
//! application/     InjectionBackend trait, SessionReporter, session loop
//! infrastructure/  OS input backends, TCP listener, TOML config file
//! ```

/// Domain layer: plain configuration types.
pub mod domain;

/// Application layer: the injection capability and the per-connection session.
pub mod application;

/// Infrastructure layer: OS adapters, network listener, and config file.
pub mod infrastructure;
