//! Key position to X11 KeySym translation for Linux hosts.
//!
//! X11 KeySym values are defined in X11/keysymdef.h.
//!
//! # What is an X11 KeySym? (for beginners)
//!
//! X11 identifies keys by **KeySym** (Key Symbol).  Printable Latin-1
//! characters use their ASCII value (`XK_a` = 0x0061) while function keys live
//! in the 0xFFxx range (`XK_Return` = 0xFF0D).  XTest wants a *keycode*, not a
//! KeySym, so the injector asks the server for the keycode of each KeySym with
//! `XKeysymToKeycode`.
//!
//! Letters map to their *lowercase* KeySym.  The keycode found for `XK_a` is
//! the same physical key that types `A` with Shift held, which matches the
//! position-based model used everywhere else in keyrelay.

use super::position::KeyPosition;

/// Translates a [`KeyPosition`] to the base (unshifted) X11 KeySym.
pub fn position_to_keysym(key: KeyPosition) -> u32 {
    use KeyPosition::*;

    match key {
        KeyA => 0x0061,
        KeyB => 0x0062,
        KeyC => 0x0063,
        KeyD => 0x0064,
        KeyE => 0x0065,
        KeyF => 0x0066,
        KeyG => 0x0067,
        KeyH => 0x0068,
        KeyI => 0x0069,
        KeyJ => 0x006A,
        KeyK => 0x006B,
        KeyL => 0x006C,
        KeyM => 0x006D,
        KeyN => 0x006E,
        KeyO => 0x006F,
        KeyP => 0x0070,
        KeyQ => 0x0071,
        KeyR => 0x0072,
        KeyS => 0x0073,
        KeyT => 0x0074,
        KeyU => 0x0075,
        KeyV => 0x0076,
        KeyW => 0x0077,
        KeyX => 0x0078,
        KeyY => 0x0079,
        KeyZ => 0x007A,

        Digit0 => 0x0030,
        Digit1 => 0x0031,
        Digit2 => 0x0032,
        Digit3 => 0x0033,
        Digit4 => 0x0034,
        Digit5 => 0x0035,
        Digit6 => 0x0036,
        Digit7 => 0x0037,
        Digit8 => 0x0038,
        Digit9 => 0x0039,

        Enter => 0xFF0D,     // XK_Return
        Escape => 0xFF1B,    // XK_Escape
        Backspace => 0xFF08, // XK_BackSpace
        Tab => 0xFF09,       // XK_Tab
        Space => 0x0020,     // XK_space
        Delete => 0xFFFF,    // XK_Delete

        Minus => 0x002D,        // XK_minus
        Equal => 0x003D,        // XK_equal
        BracketLeft => 0x005B,  // XK_bracketleft
        BracketRight => 0x005D, // XK_bracketright
        Backslash => 0x005C,    // XK_backslash
        Semicolon => 0x003B,    // XK_semicolon
        Quote => 0x0027,        // XK_apostrophe
        Backquote => 0x0060,    // XK_grave
        Comma => 0x002C,        // XK_comma
        Period => 0x002E,       // XK_period
        Slash => 0x002F,        // XK_slash
    }
}
