//! The [`CharacterEvent`] value type: one keystroke on its way to the injector.

use std::fmt;

/// One decoded keystroke character.
///
/// Holds a non-empty string: usually a single character (`"a"`, `"#"`), or a
/// short escape token such as `"\r"` for the Enter key.  The value is
/// immutable once constructed; the only way to build one is through
/// [`CharacterEvent::new`], which rejects the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterEvent {
    text: String,
}

impl CharacterEvent {
    /// Creates an event, or returns `None` when `text` is empty.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    /// The carriage-return event the interactive client sends after each line.
    pub fn carriage_return() -> Self {
        Self {
            text: "\r".to_string(),
        }
    }

    /// Returns the character (or escape token) carried by this event.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the first byte of the UTF-8 encoding.
    ///
    /// Multi-byte characters are truncated to their first code unit.  This is
    /// lossy: `"é"` yields `0xC3`, which no key table maps.
    pub fn first_code_unit(&self) -> u8 {
        // `text` is never empty, so index 0 always exists.
        self.text.as_bytes()[0]
    }
}

impl fmt::Display for CharacterEvent {
    /// Writes the character with control characters escaped (`\r`, `\t`, ...),
    /// so log lines stay on one line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text.escape_debug())
    }
}
