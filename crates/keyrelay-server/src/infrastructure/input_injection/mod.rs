//! Keystroke injection backends.
//!
//! The OS backend is selected at compile time via `#[cfg(target_os = ...)]`;
//! [`platform_backend`] opens whichever one this build carries.
//! [`logging::LoggingBackend`] serves `--dry-run`, and
//! [`recording::RecordingBackend`] records keystrokes for tests.

use std::sync::Arc;

use crate::application::inject_character::{InjectionBackend, InjectionError};

pub mod logging;
pub mod recording;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

/// Opens the injection backend for the operating system this binary was
/// built for.
///
/// # Errors
///
/// Returns [`InjectionError::NotInitialized`] when the OS input subsystem
/// cannot be reached (no X display, no CoreGraphics event source) or when
/// the target OS has no backend at all.
pub fn platform_backend() -> Result<Arc<dyn InjectionBackend>, InjectionError> {
    #[cfg(target_os = "windows")]
    {
        Ok(Arc::new(windows::SendInputBackend::new()))
    }

    #[cfg(target_os = "linux")]
    {
        Ok(Arc::new(linux::XTestBackend::open()?))
    }

    #[cfg(target_os = "macos")]
    {
        Ok(Arc::new(macos::CoreGraphicsBackend::new()?))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        Err(InjectionError::NotInitialized(format!(
            "no keystroke injection backend for {}",
            std::env::consts::OS
        )))
    }
}
