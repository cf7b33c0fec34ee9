//! Physical key positions, numbered by USB HID Usage ID (page 0x07).
//!
//! This is the canonical key representation inside keyrelay.  A character is
//! first resolved to the key that carries it on a US ANSI keyboard, and that
//! position is then translated to whatever the host OS expects.
//!
//! # What is a HID Usage ID? (for beginners)
//!
//! The **USB Human Interface Device (HID)** standard assigns a unique number to
//! every key on a keyboard.  All keyboard keys live on Usage Page 0x07
//! ("Keyboard/Keypad"):
//!
//! | Key          | HID Usage ID |
//! |--------------|-------------|
//! | Letter A     | 0x04        |
//! | Digit 1      | 0x1E        |
//! | Enter        | 0x28        |
//! | Space        | 0x2C        |
//!
//! HID codes describe **where a key is**, not which character it produces.
//! The character depends on the active keyboard layout and on modifiers such
//! as Shift.  keyrelay never synthesises modifiers, so `'A'` and `'a'` both
//! resolve to [`KeyPosition::KeyA`] and the host's current Shift/Caps state
//! decides which one appears.
//!
//! Only the keys reachable from 7-bit ASCII are listed.  Function keys,
//! navigation keys and modifiers have no character of their own and cannot
//! arrive over the wire.

/// Key position on a US ANSI keyboard, valued by its HID Usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyPosition {
    // Letters (HID 0x04–0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E–0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control keys with an ASCII control character
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Delete = 0x4C,

    // Punctuation
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
}

impl KeyPosition {
    /// Returns the HID Usage ID of this position.
    pub fn usage_id(self) -> u8 {
        self as u8
    }

    /// Resolves an ASCII byte to the key that types it on a US layout.
    ///
    /// Shifted symbols resolve to their base key (`'!'` → `Digit1`,
    /// `'A'` → `KeyA`); no Shift press is implied.  Line endings (`\r`, `\n`)
    /// both resolve to `Enter`.  Returns `None` for bytes with no key,
    /// including every byte ≥ 0x80.
    pub fn from_ascii(byte: u8) -> Option<Self> {
        use KeyPosition::*;

        let key = match byte {
            b'a'..=b'z' => return Some(LETTERS[(byte - b'a') as usize]),
            b'A'..=b'Z' => return Some(LETTERS[(byte - b'A') as usize]),

            b'1' | b'!' => Digit1,
            b'2' | b'@' => Digit2,
            b'3' | b'#' => Digit3,
            b'4' | b'$' => Digit4,
            b'5' | b'%' => Digit5,
            b'6' | b'^' => Digit6,
            b'7' | b'&' => Digit7,
            b'8' | b'*' => Digit8,
            b'9' | b'(' => Digit9,
            b'0' | b')' => Digit0,

            b'\r' | b'\n' => Enter,
            0x1B => Escape,
            0x08 => Backspace,
            b'\t' => Tab,
            b' ' => Space,
            0x7F => Delete,

            b'-' | b'_' => Minus,
            b'=' | b'+' => Equal,
            b'[' | b'{' => BracketLeft,
            b']' | b'}' => BracketRight,
            b'\\' | b'|' => Backslash,
            b';' | b':' => Semicolon,
            b'\'' | b'"' => Quote,
            b'`' | b'~' => Backquote,
            b',' | b'<' => Comma,
            b'.' | b'>' => Period,
            b'/' | b'?' => Slash,

            _ => return None,
        };
        Some(key)
    }
}

/// Letter keys in alphabetical order, indexed by `byte - b'a'`.
const LETTERS: [KeyPosition; 26] = {
    use KeyPosition::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO,
        KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ]
};

#[cfg(test)]
mod tests {
    use super::*;
    use KeyPosition::*;

    #[test]
    fn test_lowercase_and_uppercase_letters_share_a_key() {
        assert_eq!(KeyPosition::from_ascii(b'a'), Some(KeyA));
        assert_eq!(KeyPosition::from_ascii(b'A'), Some(KeyA));
        assert_eq!(KeyPosition::from_ascii(b'z'), Some(KeyZ));
        assert_eq!(KeyPosition::from_ascii(b'Z'), Some(KeyZ));
    }

    #[test]
    fn test_letter_usage_ids_are_contiguous() {
        for (i, byte) in (b'a'..=b'z').enumerate() {
            let key = KeyPosition::from_ascii(byte).unwrap();
            assert_eq!(key.usage_id(), 0x04 + i as u8, "letter {}", byte as char);
        }
    }

    #[test]
    fn test_shifted_digit_symbols_resolve_to_digit_keys() {
        assert_eq!(KeyPosition::from_ascii(b'!'), Some(Digit1));
        assert_eq!(KeyPosition::from_ascii(b'#'), Some(Digit3));
        assert_eq!(KeyPosition::from_ascii(b')'), Some(Digit0));
    }

    #[test]
    fn test_line_endings_resolve_to_enter() {
        assert_eq!(KeyPosition::from_ascii(b'\r'), Some(Enter));
        assert_eq!(KeyPosition::from_ascii(b'\n'), Some(Enter));
    }

    #[test]
    fn test_control_characters_with_keys() {
        assert_eq!(KeyPosition::from_ascii(b'\t'), Some(Tab));
        assert_eq!(KeyPosition::from_ascii(0x08), Some(Backspace));
        assert_eq!(KeyPosition::from_ascii(0x1B), Some(Escape));
        assert_eq!(KeyPosition::from_ascii(0x7F), Some(Delete));
    }

    #[test]
    fn test_every_printable_ascii_byte_has_a_key() {
        for byte in 0x20u8..=0x7E {
            assert!(
                KeyPosition::from_ascii(byte).is_some(),
                "printable byte {:?} must resolve",
                byte as char
            );
        }
    }

    #[test]
    fn test_unmapped_control_bytes_return_none() {
        for byte in [0x00u8, 0x01, 0x07, 0x0C, 0x1F] {
            assert_eq!(KeyPosition::from_ascii(byte), None, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn test_non_ascii_bytes_return_none() {
        for byte in 0x80u8..=0xFF {
            assert_eq!(KeyPosition::from_ascii(byte), None, "byte 0x{byte:02X}");
        }
    }
}
