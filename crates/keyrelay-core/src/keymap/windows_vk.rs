//! Key position to Windows Virtual Key (VK) code translation.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code",
//! named `VK_*` in `<winuser.h>` (e.g., `VK_RETURN = 0x0D`, `VK_SPACE = 0x20`).
//! Letters and digits reuse their uppercase ASCII values (`VK_A = 0x41`,
//! `VK_0 = 0x30`).  Punctuation lives in the `VK_OEM_*` range, whose meaning
//! depends on the layout; the values below are the US ANSI assignments.

use super::position::KeyPosition;

/// Translates a [`KeyPosition`] to a Windows Virtual Key code.
///
/// Every position has a VK code, so this never fails.
pub fn position_to_vk(key: KeyPosition) -> u16 {
    use KeyPosition::*;

    match key {
        // VK_A..VK_Z are the uppercase ASCII letters.
        KeyA => 0x41,
        KeyB => 0x42,
        KeyC => 0x43,
        KeyD => 0x44,
        KeyE => 0x45,
        KeyF => 0x46,
        KeyG => 0x47,
        KeyH => 0x48,
        KeyI => 0x49,
        KeyJ => 0x4A,
        KeyK => 0x4B,
        KeyL => 0x4C,
        KeyM => 0x4D,
        KeyN => 0x4E,
        KeyO => 0x4F,
        KeyP => 0x50,
        KeyQ => 0x51,
        KeyR => 0x52,
        KeyS => 0x53,
        KeyT => 0x54,
        KeyU => 0x55,
        KeyV => 0x56,
        KeyW => 0x57,
        KeyX => 0x58,
        KeyY => 0x59,
        KeyZ => 0x5A,

        Digit0 => 0x30,
        Digit1 => 0x31,
        Digit2 => 0x32,
        Digit3 => 0x33,
        Digit4 => 0x34,
        Digit5 => 0x35,
        Digit6 => 0x36,
        Digit7 => 0x37,
        Digit8 => 0x38,
        Digit9 => 0x39,

        Enter => 0x0D,     // VK_RETURN
        Escape => 0x1B,    // VK_ESCAPE
        Backspace => 0x08, // VK_BACK
        Tab => 0x09,       // VK_TAB
        Space => 0x20,     // VK_SPACE
        Delete => 0x2E,    // VK_DELETE

        Minus => 0xBD,        // VK_OEM_MINUS  (- _)
        Equal => 0xBB,        // VK_OEM_PLUS   (= +)
        BracketLeft => 0xDB,  // VK_OEM_4      ([ {)
        BracketRight => 0xDD, // VK_OEM_6      (] })
        Backslash => 0xDC,    // VK_OEM_5      (\ |)
        Semicolon => 0xBA,    // VK_OEM_1      (; :)
        Quote => 0xDE,        // VK_OEM_7      (' ")
        Backquote => 0xC0,    // VK_OEM_3      (` ~)
        Comma => 0xBC,        // VK_OEM_COMMA  (, <)
        Period => 0xBE,       // VK_OEM_PERIOD (. >)
        Slash => 0xBF,        // VK_OEM_2      (/ ?)
    }
}

/// Returns `true` if the VK code needs `KEYEVENTF_EXTENDEDKEY` when injected.
///
/// Of the keys reachable from ASCII, only Delete sits in the extended
/// (navigation) block.
pub fn is_extended(vk: u16) -> bool {
    vk == 0x2E
}
