//! Dry-run backend: log each keystroke at `info` instead of injecting it.
//!
//! Selected by the server's `--dry-run` flag.  Key resolution is the same as
//! on the OS backends, so an unmapped character fails here too.  Nothing is
//! retained between calls.

use keyrelay_core::CharacterEvent;
use tracing::info;

use crate::application::inject_character::{resolve_key, InjectionBackend, InjectionError};

/// Stateless backend that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBackend;

impl InjectionBackend for LoggingBackend {
    fn inject(&self, event: &CharacterEvent) -> Result<(), InjectionError> {
        let key = resolve_key(event)?;
        info!("dry run: would press {key:?} for {event}");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "dry run (log only)"
    }
}
