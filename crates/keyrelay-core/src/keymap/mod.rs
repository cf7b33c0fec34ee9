//! Character to platform key code translation.
//!
//! The canonical representation is a [`KeyPosition`] (a USB HID Usage ID).
//! A character is resolved to a position once, then translated to the code
//! the host's input API expects at the injection boundary.
//!
//! # Mapping policy
//!
//! - Only the **first byte** of the character's UTF-8 encoding is used.
//!   Multi-byte characters are truncated; their lead byte (≥ 0xC2) has no
//!   key, so they end up unmapped.  This is a known, lossy limitation.
//! - No modifier keys are synthesised.  Characters that need Shift on the
//!   host's layout (`A`, `!`, `"`) press their base key only.
//! - The US ANSI layout is assumed; no layout-aware translation is done.

pub mod linux_x11;
pub mod macos_cg;
pub mod position;
pub mod windows_vk;

pub use position::KeyPosition;

use crate::protocol::event::CharacterEvent;

/// Unified key mapper providing every translation direction keyrelay needs.
pub struct KeyMapper;

impl KeyMapper {
    /// Resolves a character event to the key that types it.
    ///
    /// Returns `None` when the event's first byte has no key (non-ASCII
    /// input and most control characters).
    pub fn position_for(event: &CharacterEvent) -> Option<KeyPosition> {
        KeyPosition::from_ascii(event.first_code_unit())
    }

    /// Translates a [`KeyPosition`] to a Windows Virtual Key code.
    pub fn to_windows_vk(key: KeyPosition) -> u16 {
        windows_vk::position_to_vk(key)
    }

    /// Translates a [`KeyPosition`] to an X11 KeySym for Linux hosts.
    pub fn to_x11_keysym(key: KeyPosition) -> u32 {
        linux_x11::position_to_keysym(key)
    }

    /// Translates a [`KeyPosition`] to a macOS `CGKeyCode`.
    pub fn to_macos_cgkeycode(key: KeyPosition) -> u16 {
        macos_cg::position_to_cgkeycode(key)
    }
}
