//! Key position to macOS CGKeyCode translation.
//!
//! CGKeyCode values are the `kVK_*` constants from HIToolbox `Events.h`.
//! They name physical positions on an ANSI keyboard and bear no relation to
//! ASCII, hence the explicit table.

use super::position::KeyPosition;

/// Translates a [`KeyPosition`] to a macOS `CGKeyCode`.
pub fn position_to_cgkeycode(key: KeyPosition) -> u16 {
    use KeyPosition::*;

    match key {
        KeyA => 0x00, // kVK_ANSI_A
        KeyB => 0x0B,
        KeyC => 0x08,
        KeyD => 0x02,
        KeyE => 0x0E,
        KeyF => 0x03,
        KeyG => 0x05,
        KeyH => 0x04,
        KeyI => 0x22,
        KeyJ => 0x26,
        KeyK => 0x28,
        KeyL => 0x25,
        KeyM => 0x2E,
        KeyN => 0x2D,
        KeyO => 0x1F,
        KeyP => 0x23,
        KeyQ => 0x0C,
        KeyR => 0x0F,
        KeyS => 0x01,
        KeyT => 0x11,
        KeyU => 0x20,
        KeyV => 0x09,
        KeyW => 0x0D,
        KeyX => 0x07,
        KeyY => 0x10,
        KeyZ => 0x06,

        Digit0 => 0x1D, // kVK_ANSI_0
        Digit1 => 0x12,
        Digit2 => 0x13,
        Digit3 => 0x14,
        Digit4 => 0x15,
        Digit5 => 0x17,
        Digit6 => 0x16,
        Digit7 => 0x1A,
        Digit8 => 0x1C,
        Digit9 => 0x19,

        Enter => 0x24,     // kVK_Return
        Escape => 0x35,    // kVK_Escape
        Backspace => 0x33, // kVK_Delete (the key labelled "delete" on a Mac)
        Tab => 0x30,       // kVK_Tab
        Space => 0x31,     // kVK_Space
        Delete => 0x75,    // kVK_ForwardDelete

        Minus => 0x1B,        // kVK_ANSI_Minus
        Equal => 0x18,        // kVK_ANSI_Equal
        BracketLeft => 0x21,  // kVK_ANSI_LeftBracket
        BracketRight => 0x1E, // kVK_ANSI_RightBracket
        Backslash => 0x2A,    // kVK_ANSI_Backslash
        Semicolon => 0x29,    // kVK_ANSI_Semicolon
        Quote => 0x27,        // kVK_ANSI_Quote
        Backquote => 0x32,    // kVK_ANSI_Grave
        Comma => 0x2B,        // kVK_ANSI_Comma
        Period => 0x2F,       // kVK_ANSI_Period
        Slash => 0x2C,        // kVK_ANSI_Slash
    }
}
