//! Session reporting: where every lifecycle event and failure goes.
//!
//! Nothing in keyrelay ever reports an error back to the client, so the
//! server's only observability is what it reports here.  The session loop
//! and the listener receive a [`SessionReporter`] instead of calling the
//! logger directly:
//!
//! - [`TracingReporter`] is the production implementation; it turns every
//!   report into a `tracing` event.
//! - [`RecordingReporter`] keeps reports in memory so tests can assert on
//!   error paths (a skipped record, a dropped keystroke) without capturing
//!   log output.

use std::io;
use std::net::SocketAddr;
use std::sync::Mutex;

use keyrelay_core::{CharacterEvent, DecodeError};
use tracing::{debug, error, info, warn};

use crate::application::inject_character::InjectionError;
use crate::application::session::{SessionReport, SessionStats};

/// Observer for session and listener events.
///
/// All methods take `&self`; implementations are shared by every session
/// task through an `Arc`.
pub trait SessionReporter: Send + Sync {
    /// A connection was accepted and its session is starting.
    fn session_opened(&self, peer: SocketAddr);

    /// A record decoded and its keystroke was injected.
    fn injected(&self, peer: SocketAddr, event: &CharacterEvent);

    /// A record carried an empty `char` field and was ignored.
    fn skipped_empty(&self, peer: SocketAddr);

    /// A record could not be decoded and was skipped.
    fn decode_failed(&self, peer: SocketAddr, error: &DecodeError);

    /// A keystroke could not be injected and was dropped.
    fn injection_failed(&self, peer: SocketAddr, event: &CharacterEvent, error: &InjectionError);

    /// A session reached its terminal state.
    fn session_closed(&self, report: &SessionReport);

    /// `accept()` failed; the listener will retry.
    fn accept_failed(&self, error: &io::Error);
}

// ── Production reporter ───────────────────────────────────────────────────────

/// Reports through `tracing`.
///
/// Injected characters are logged at `debug` so that typed text does not end
/// up in `info`-level logs by default.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SessionReporter for TracingReporter {
    fn session_opened(&self, peer: SocketAddr) {
        info!("new connection from {peer}");
    }

    fn injected(&self, peer: SocketAddr, event: &CharacterEvent) {
        debug!("session {peer}: injected {event}");
    }

    fn skipped_empty(&self, peer: SocketAddr) {
        debug!("session {peer}: empty \"char\" field, nothing to inject");
    }

    fn decode_failed(&self, peer: SocketAddr, error: &DecodeError) {
        warn!("session {peer}: skipping record: {error}");
    }

    fn injection_failed(&self, peer: SocketAddr, event: &CharacterEvent, error: &InjectionError) {
        warn!("session {peer}: dropped {event}: {error}");
    }

    fn session_closed(&self, report: &SessionReport) {
        let SessionStats {
            records,
            injected,
            no_ops,
            decode_errors,
            injection_errors,
        } = report.stats;
        info!(
            "connection closed: {} ({}); records={records} injected={injected} \
             no_ops={no_ops} decode_errors={decode_errors} injection_errors={injection_errors}",
            report.peer, report.outcome
        );
    }

    fn accept_failed(&self, error: &io::Error) {
        error!("accept error: {error}");
    }
}

// ── Recording reporter ────────────────────────────────────────────────────────

/// One report captured by [`RecordingReporter`].
///
/// Errors are stored as their display strings so the enum stays `Clone` and
/// `PartialEq`.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    SessionOpened {
        peer: SocketAddr,
    },
    Injected {
        peer: SocketAddr,
        character: String,
    },
    SkippedEmpty {
        peer: SocketAddr,
    },
    DecodeFailed {
        peer: SocketAddr,
        error: String,
    },
    InjectionFailed {
        peer: SocketAddr,
        character: String,
        error: String,
    },
    SessionClosed {
        peer: SocketAddr,
        outcome: &'static str,
        stats: SessionStats,
    },
    AcceptFailed {
        error: String,
    },
}

/// A reporter that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything reported so far.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Number of sessions that have reported closing.
    pub fn closed_sessions(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| matches!(e, ReportEvent::SessionClosed { .. }))
            .count()
    }

    fn push(&self, event: ReportEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        // A panicking test thread must not hide the reports from the others.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionReporter for RecordingReporter {
    fn session_opened(&self, peer: SocketAddr) {
        self.push(ReportEvent::SessionOpened { peer });
    }

    fn injected(&self, peer: SocketAddr, event: &CharacterEvent) {
        self.push(ReportEvent::Injected {
            peer,
            character: event.as_str().to_string(),
        });
    }

    fn skipped_empty(&self, peer: SocketAddr) {
        self.push(ReportEvent::SkippedEmpty { peer });
    }

    fn decode_failed(&self, peer: SocketAddr, error: &DecodeError) {
        self.push(ReportEvent::DecodeFailed {
            peer,
            error: error.to_string(),
        });
    }

    fn injection_failed(&self, peer: SocketAddr, event: &CharacterEvent, error: &InjectionError) {
        self.push(ReportEvent::InjectionFailed {
            peer,
            character: event.as_str().to_string(),
            error: error.to_string(),
        });
    }

    fn session_closed(&self, report: &SessionReport) {
        self.push(ReportEvent::SessionClosed {
            peer: report.peer,
            outcome: report.outcome.label(),
            stats: report.stats,
        });
    }

    fn accept_failed(&self, error: &io::Error) {
        self.push(ReportEvent::AcceptFailed {
            error: error.to_string(),
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
