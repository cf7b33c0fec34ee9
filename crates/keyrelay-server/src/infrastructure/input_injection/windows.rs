//! Windows keystroke injection via `SendInput`.
//!
//! Each character becomes one `SendInput` call carrying two `INPUT`
//! structures: the key-down and the key-up.  Windows inserts the whole array
//! into the input stream without interleaving other synthetic or physical
//! input, which is what keeps the pair together.
//!
//! Keys are sent by virtual-key code (`wVk`) rather than scan code, so the
//! active keyboard layout decides the character the foreground window sees.

#![cfg(target_os = "windows")]

use std::sync::Mutex;

use keyrelay_core::{CharacterEvent, KeyMapper};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    KEYEVENTF_EXTENDEDKEY, KEYEVENTF_KEYUP, VIRTUAL_KEY,
};

use crate::application::inject_character::{resolve_key, InjectionBackend, InjectionError};
use keyrelay_core::keymap::windows_vk::is_extended;

/// Injects keystrokes through `SendInput`.
#[derive(Debug, Default)]
pub struct SendInputBackend {
    /// Serialises submissions from concurrent sessions.
    submit: Mutex<()>,
}

impl SendInputBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InjectionBackend for SendInputBackend {
    fn inject(&self, event: &CharacterEvent) -> Result<(), InjectionError> {
        let key = resolve_key(event)?;
        let vk = KeyMapper::to_windows_vk(key);

        let mut flags = KEYBD_EVENT_FLAGS(0);
        if is_extended(vk) {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        let inputs = [keyboard_input(vk, flags), keyboard_input(vk, flags | KEYEVENTF_KEYUP)];

        let _guard = self.submit.lock().unwrap_or_else(|p| p.into_inner());
        // SAFETY: `inputs` is a valid array of INPUT_KEYBOARD structures on the
        // stack and `cbsize` is the size of one element.
        let sent = unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) };

        if sent as usize != inputs.len() {
            // SendInput reports blocking (e.g. by UIPI) through GetLastError.
            let os_error = windows::core::Error::from_win32();
            return Err(InjectionError::Platform(format!(
                "SendInput inserted {sent} of {} events: {os_error}",
                inputs.len()
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Windows SendInput"
    }
}

fn keyboard_input(vk: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: VIRTUAL_KEY(vk),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}
