//! macOS keystroke injection via CoreGraphics events.
//!
//! Each keystroke is a pair of `CGEvent` keyboard events created from a
//! `HIDSystemState` event source and posted at the HID tap, the same level
//! physical keyboards enter the event stream.
//!
//! # Accessibility permission
//!
//! Posting at the HID tap requires the process to be granted Accessibility
//! access (System Settings → Privacy & Security → Accessibility).  Without it
//! macOS drops the events silently; there is no error to report.

#![cfg(target_os = "macos")]

use std::sync::Mutex;

use core_graphics::event::{CGEvent, CGEventTapLocation, CGKeyCode};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use keyrelay_core::{CharacterEvent, KeyMapper};

use crate::application::inject_character::{resolve_key, InjectionBackend, InjectionError};

/// Injects keystrokes by posting CoreGraphics keyboard events.
pub struct CoreGraphicsBackend {
    source: Mutex<CGEventSource>,
}

// SAFETY: the event source is a CoreFoundation object that is only touched
// while the mutex is held.
unsafe impl Send for CoreGraphicsBackend {}
unsafe impl Sync for CoreGraphicsBackend {}

impl CoreGraphicsBackend {
    /// Creates the HID-state event source.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError::NotInitialized`] if CoreGraphics refuses to
    /// create an event source.
    pub fn new() -> Result<Self, InjectionError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState).map_err(|()| {
            InjectionError::NotInitialized("CGEventSourceCreate failed".to_string())
        })?;
        Ok(Self {
            source: Mutex::new(source),
        })
    }

    fn key_event(
        source: &CGEventSource,
        code: CGKeyCode,
        down: bool,
    ) -> Result<CGEvent, InjectionError> {
        CGEvent::new_keyboard_event(source.clone(), code, down).map_err(|()| {
            InjectionError::Platform(format!(
                "CGEventCreateKeyboardEvent failed for keycode {code}"
            ))
        })
    }
}

impl InjectionBackend for CoreGraphicsBackend {
    fn inject(&self, event: &CharacterEvent) -> Result<(), InjectionError> {
        let key = resolve_key(event)?;
        let code = KeyMapper::to_macos_cgkeycode(key);

        let source = self.source.lock().unwrap_or_else(|p| p.into_inner());
        // Both events are built before either is posted, so a creation
        // failure never leaves a key held down.
        let down = Self::key_event(&source, code, true)?;
        let up = Self::key_event(&source, code, false)?;
        down.post(CGEventTapLocation::HID);
        up.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "macOS CoreGraphics"
    }
}
