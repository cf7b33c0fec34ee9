//! # keyrelay-core
//!
//! Shared library for keyrelay containing the line-delimited wire codec and
//! the character-to-key translation tables.
//!
//! This crate is used by both the server and the interactive client.
//! It has zero dependencies on OS APIs or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! keyrelay is a remote keystroke relay: a client types characters, each one
//! travels over TCP as a tiny JSON record, and the server presses the matching
//! key on its own machine so the foreground application receives it.
//!
//! This crate (`keyrelay-core`) is the shared foundation.  It defines:
//!
//! - **`protocol`** – How one keystroke travels over the network.  Each
//!   character becomes one `{"char":"..."}` JSON object followed by `\n`.
//!
//! - **`keymap`** – Translation tables that turn a character into a physical
//!   key position (USB HID Usage ID) and then into the code each platform's
//!   input API expects (Windows VK codes, X11 KeySyms, macOS CGKeyCodes).

pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `keyrelay_core::CharacterEvent` instead of the full module path.
pub use keymap::{KeyMapper, KeyPosition};
pub use protocol::codec::{decode, encode, DecodeError, RECORD_TERMINATOR};
pub use protocol::event::CharacterEvent;
