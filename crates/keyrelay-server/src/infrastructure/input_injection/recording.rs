//! In-memory backend that records keystrokes instead of injecting them.
//!
//! Used by unit and integration tests.  Keystrokes are kept until the
//! backend is dropped, so it is not meant for a long-running server.  It
//! applies the same key resolution as the OS backends, so a character
//! with no key fails here exactly as it would on a real desktop.
//!
//! ```ignore
//! let backend = Arc::new(RecordingBackend::new());
//! // ... run a session against it ...
//! assert_eq!(backend.injected(), vec!["A".to_string(), "\r".to_string()]);
//! ```

use std::sync::{Mutex, MutexGuard};

use keyrelay_core::{CharacterEvent, KeyPosition};

use crate::application::inject_character::{resolve_key, InjectionBackend, InjectionError};

/// A backend that records every down/up pair it would have sent.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// `(character, key)` for each successful injection, in order.
    keystrokes: Mutex<Vec<(String, KeyPosition)>>,
    /// When `true`, every call fails with [`InjectionError::Platform`].
    should_fail: bool,
}

impl RecordingBackend {
    /// Creates a backend with an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend on which every injection fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Characters injected so far, in injection order.
    pub fn injected(&self) -> Vec<String> {
        self.lock().iter().map(|(c, _)| c.clone()).collect()
    }

    /// Key positions pressed so far, in injection order.
    pub fn keys(&self) -> Vec<KeyPosition> {
        self.lock().iter().map(|(_, k)| *k).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, KeyPosition)>> {
        self.keystrokes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl InjectionBackend for RecordingBackend {
    fn inject(&self, event: &CharacterEvent) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform(
                "recording backend set to fail".to_string(),
            ));
        }
        let key = resolve_key(event)?;
        self.lock().push((event.as_str().to_string(), key));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
