//! Protocol module containing the character event type and the JSON line codec.

pub mod codec;
pub mod event;

pub use codec::{decode, encode, DecodeError, RECORD_TERMINATOR};
pub use event::CharacterEvent;
