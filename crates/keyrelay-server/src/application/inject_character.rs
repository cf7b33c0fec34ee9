//! The injection capability: turn one character into a key press on the host.
//!
//! The session loop only ever talks to an [`InjectionBackend`] trait object.
//! The platform-specific implementations live in the infrastructure layer,
//! which keeps everything above them platform-neutral and testable with a
//! recording backend.

use keyrelay_core::{CharacterEvent, KeyMapper, KeyPosition};
use thiserror::Error;

/// Error type for injection operations.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The character's first byte has no key on the assumed layout.
    #[error("no key for byte 0x{byte:02X} (character {character:?})")]
    Unmapped { byte: u8, character: String },

    /// The OS rejected or only partially accepted the synthetic input.
    #[error("platform error: {0}")]
    Platform(String),

    /// The backend could not attach to the OS input subsystem.
    #[error("injector not initialized: {0}")]
    NotInitialized(String),
}

/// Platform-agnostic keystroke injection.
///
/// # Contract
///
/// `inject` submits a key-down followed by a key-up for the key that types
/// `event`.  The pair is atomic with respect to other `inject` calls on the
/// same backend: two sessions injecting concurrently never interleave their
/// down/up events.  Implementations achieve this by holding a lock for the
/// duration of one submission.
///
/// A returned error means the keystroke was dropped.  Callers report it and
/// carry on.
pub trait InjectionBackend: Send + Sync {
    /// Presses and releases the key for one character.
    fn inject(&self, event: &CharacterEvent) -> Result<(), InjectionError>;

    /// Short human-readable backend name for startup logs.
    fn name(&self) -> &'static str;
}

/// Resolves the key an event should press, or the error to report.
///
/// Shared by every backend so that the truncation and no-modifier policy is
/// identical on all platforms.
///
/// # Errors
///
/// Returns [`InjectionError::Unmapped`] when the event's first byte has no
/// key position.
pub fn resolve_key(event: &CharacterEvent) -> Result<KeyPosition, InjectionError> {
    KeyMapper::position_for(event).ok_or_else(|| InjectionError::Unmapped {
        byte: event.first_code_unit(),
        character: event.as_str().to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn event(text: &str) -> CharacterEvent {
        CharacterEvent::new(text).unwrap()
    }

    #[test]
    fn test_resolve_key_for_letter() {
        assert_eq!(resolve_key(&event("A")).unwrap(), KeyPosition::KeyA);
    }

    #[test]
    fn test_resolve_key_for_carriage_return() {
        assert_eq!(
            resolve_key(&CharacterEvent::carriage_return()).unwrap(),
            KeyPosition::Enter
        );
    }

    #[test]
    fn test_resolve_key_multibyte_reports_truncated_lead_byte() {
        // Arrange: 'ü' is 0xC3 0xBC.
        let ev = event("ü");

        // Act
        let err = resolve_key(&ev).unwrap_err();

        // Assert
        match err {
            InjectionError::Unmapped { byte, character } => {
                assert_eq!(byte, 0xC3);
                assert_eq!(character, "ü");
            }
            other => panic!("expected Unmapped, got {other:?}"),
        }
    }

    #[test]
    fn test_unmapped_error_message_names_the_byte() {
        let err = resolve_key(&event("\u{1}")).unwrap_err();
        assert!(err.to_string().contains("0x01"), "got: {err}");
    }
}
