//! Linux keystroke injection via the X11 XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a client synthesize key and
//! pointer events.  The X server delivers them to the focused window exactly
//! like hardware input.
//!
//! XTest works in *keycodes* (server-specific hardware codes), while the key
//! map produces *KeySyms* (layout-independent symbols such as `XK_a`).  The
//! conversion is done per keystroke against the live server:
//!
//! ```text
//! KeyPosition → X11 KeySym → XKeysymToKeycode(display, keysym) → keycode
//! ```
//!
//! # Requirements
//!
//! The process needs a reachable X display (`DISPLAY` set, access granted).
//! Under Wayland this only reaches XWayland clients.

#![cfg(target_os = "linux")]

use std::os::raw::{c_int, c_ulong};
use std::ptr;
use std::sync::Mutex;

use keyrelay_core::{CharacterEvent, KeyMapper};
use tracing::debug;
use x11::{xlib, xtest};

use crate::application::inject_character::{resolve_key, InjectionBackend, InjectionError};

/// `CurrentTime`: deliver the fake event immediately.
const NO_DELAY: c_ulong = 0;

/// Owned connection to an X server.
struct Display(*mut xlib::Display);

// SAFETY: the pointer is only ever dereferenced by Xlib while the owning
// `Mutex` is held, so at most one thread uses the connection at a time.
unsafe impl Send for Display {}

impl Drop for Display {
    fn drop(&mut self) {
        // SAFETY: the pointer came from a successful XOpenDisplay and is
        // closed exactly once.
        unsafe {
            xlib::XCloseDisplay(self.0);
        }
    }
}

/// Injects keystrokes through XTest on the display named by `DISPLAY`.
pub struct XTestBackend {
    display: Mutex<Display>,
}

impl XTestBackend {
    /// Opens the default X display and checks that XTest is available.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError::NotInitialized`] if the display cannot be
    /// opened or the server lacks the XTest extension.
    pub fn open() -> Result<Self, InjectionError> {
        // SAFETY: a null name means "use $DISPLAY".
        let raw = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if raw.is_null() {
            return Err(InjectionError::NotInitialized(
                "cannot open X display (is DISPLAY set?)".to_string(),
            ));
        }
        let display = Display(raw);

        let (mut event_base, mut error_base, mut major, mut minor): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        // SAFETY: the display is open; the out-pointers are valid locals.
        let present = unsafe {
            xtest::XTestQueryExtension(
                display.0,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if present == xlib::False {
            return Err(InjectionError::NotInitialized(
                "X server does not support the XTest extension".to_string(),
            ));
        }
        debug!("XTest {major}.{minor} available");

        Ok(Self {
            display: Mutex::new(display),
        })
    }
}

impl InjectionBackend for XTestBackend {
    fn inject(&self, event: &CharacterEvent) -> Result<(), InjectionError> {
        let key = resolve_key(event)?;
        let keysym = KeyMapper::to_x11_keysym(key);

        let display = self.display.lock().unwrap_or_else(|p| p.into_inner());

        // SAFETY: the display is open for the lifetime of `self` and the lock
        // is held for every call below.
        unsafe {
            let keycode = xlib::XKeysymToKeycode(display.0, keysym.into());
            if keycode == 0 {
                return Err(InjectionError::Platform(format!(
                    "no keycode for keysym 0x{keysym:04X} on this X server"
                )));
            }
            let down = xtest::XTestFakeKeyEvent(display.0, keycode.into(), xlib::True, NO_DELAY);
            let up = xtest::XTestFakeKeyEvent(display.0, keycode.into(), xlib::False, NO_DELAY);
            xlib::XFlush(display.0);

            if down == 0 || up == 0 {
                return Err(InjectionError::Platform(format!(
                    "XTestFakeKeyEvent rejected keycode {keycode}"
                )));
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "X11 XTest"
    }
}
