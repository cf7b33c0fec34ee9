//! JSON line codec for keyrelay wire records.
//!
//! Wire format:
//! ```text
//! {"char":"<string>"}\n
//! ```
//! One record per keystroke.  Each record is self-contained: there is no
//! header, no sequence number, and no state carried between records.  The
//! newline is the only framing; the JSON string escaping performed by
//! `serde_json` is the only escaping.

use serde::Deserialize;
use thiserror::Error;

use crate::protocol::event::CharacterEvent;

/// Byte that terminates every wire record.
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Errors that can occur while decoding a wire record.
///
/// All variants are record-scoped: a session that receives a bad record
/// skips it and keeps reading.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a well-formed JSON record of the expected shape.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The record is valid JSON but has no `char` field.
    #[error("record has no \"char\" field")]
    MissingChar,

    /// The `char` field is present but empty.
    #[error("record has an empty \"char\" field")]
    EmptyChar,
}

impl DecodeError {
    /// Returns `true` for records that decode cleanly but carry nothing to
    /// inject.  Sessions treat these as no-ops rather than protocol errors.
    pub fn is_no_op(&self) -> bool {
        matches!(self, DecodeError::EmptyChar)
    }
}

/// Shape of one record on the wire.
///
/// `char` is optional here so that a missing field is reported as
/// [`DecodeError::MissingChar`] instead of a generic serde error.  Unknown
/// fields are ignored.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(rename = "char")]
    character: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`CharacterEvent`] as one newline-terminated wire record.
///
/// Encoding never fails for a valid event.
///
/// # Examples
///
/// ```rust
/// use keyrelay_core::{encode, CharacterEvent};
///
/// let event = CharacterEvent::new("A").unwrap();
/// assert_eq!(encode(&event), b"{\"char\":\"A\"}\n");
/// ```
pub fn encode(event: &CharacterEvent) -> Vec<u8> {
    let mut buf = serde_json::json!({ "char": event.as_str() })
        .to_string()
        .into_bytes();
    buf.push(RECORD_TERMINATOR);
    buf
}

/// Decodes one wire record (without its terminating `\n`).
///
/// A single trailing `\r` is tolerated so that clients sending CRLF line
/// endings are understood.  A carriage-return *character event* is always
/// JSON-escaped as `\r` inside the string, so it is never confused with this.
///
/// # Errors
///
/// Returns [`DecodeError`] if the record is malformed, lacks the `char`
/// field, or carries an empty string.
///
/// # Examples
///
/// ```rust
/// use keyrelay_core::{decode, DecodeError};
///
/// let event = decode(br#"{"char":"B"}"#).unwrap();
/// assert_eq!(event.as_str(), "B");
///
/// assert!(matches!(decode(b"not-json"), Err(DecodeError::Malformed(_))));
/// ```
pub fn decode(record: &[u8]) -> Result<CharacterEvent, DecodeError> {
    let record = record.strip_suffix(b"\r").unwrap_or(record);

    let wire: WireRecord = serde_json::from_slice(record)?;
    let text = wire.character.ok_or(DecodeError::MissingChar)?;
    CharacterEvent::new(text).ok_or(DecodeError::EmptyChar)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
