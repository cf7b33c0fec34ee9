//! The per-connection session: read records, decode, inject, repeat.
//!
//! # State machine
//!
//! ```text
//!            record decoded / skipped / injected / dropped
//!              ┌──────────┐
//!              ▼          │
//!          ┌─────────┐────┘        EOF, read error, record cut off by EOF,
//! start ──▶│ Reading │────────────▶ record over the size cap
//!          └─────────┘                        │
//!                                             ▼
//!                                        ┌────────┐
//!                                        │ Closed │
//!                                        └────────┘
//! ```
//!
//! Only transport-level conditions leave `Reading`.  A bad record or a
//! failed injection is reported and the loop carries on with the next
//! record.
//!
//! [`run_session`] is generic over `AsyncBufRead` so tests can drive it with
//! scripted in-memory streams.  The reader is taken by value: when the
//! function returns, on any path, the stream is dropped and the connection
//! released.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use keyrelay_core::{decode, RECORD_TERMINATOR};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::application::inject_character::InjectionBackend;
use crate::application::report::SessionReporter;
use crate::domain::DEFAULT_MAX_RECORD_BYTES;

/// Limits applied to a single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Largest record accepted, excluding the `\n` terminator.
    pub max_record_bytes: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
        }
    }
}

/// Why a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The peer closed the stream cleanly between records.
    EndOfStream,
    /// The stream closed part-way through a record; the partial record was
    /// discarded.
    Truncated { pending_bytes: usize },
    /// A record exceeded [`SessionLimits::max_record_bytes`].
    RecordTooLong { limit: usize },
    /// The transport returned an error.
    ReadError(io::Error),
}

impl SessionOutcome {
    /// Short stable label, used in reports and log lines.
    pub fn label(&self) -> &'static str {
        match self {
            SessionOutcome::EndOfStream => "end of stream",
            SessionOutcome::Truncated { .. } => "truncated record",
            SessionOutcome::RecordTooLong { .. } => "record too long",
            SessionOutcome::ReadError(_) => "read error",
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionOutcome::EndOfStream => f.write_str(self.label()),
            SessionOutcome::Truncated { pending_bytes } => {
                write!(f, "{}: {pending_bytes} byte(s) without terminator", self.label())
            }
            SessionOutcome::RecordTooLong { limit } => {
                write!(f, "{}: exceeds {limit} bytes", self.label())
            }
            SessionOutcome::ReadError(e) => write!(f, "{}: {e}", self.label()),
        }
    }
}

/// Per-session counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Complete records read (every line, good or bad).
    pub records: u64,
    /// Keystrokes successfully injected.
    pub injected: u64,
    /// Records with an empty `char` field.
    pub no_ops: u64,
    /// Records that failed to decode.
    pub decode_errors: u64,
    /// Keystrokes the backend failed to inject.
    pub injection_errors: u64,
}

/// Final account of one session, handed to the reporter on close.
#[derive(Debug)]
pub struct SessionReport {
    pub peer: SocketAddr,
    pub outcome: SessionOutcome,
    pub stats: SessionStats,
}

/// Runs one session to completion.
///
/// Reads newline-terminated records from `reader` in order, decodes each one
/// and injects it through `backend`.  Every event is reported to `reporter`,
/// including the final [`SessionReport`], which is also returned.
///
/// Never fails: every way a session can end is a [`SessionOutcome`].
pub async fn run_session<R>(
    mut reader: R,
    peer: SocketAddr,
    backend: &dyn InjectionBackend,
    reporter: &dyn SessionReporter,
    limits: SessionLimits,
) -> SessionReport
where
    R: AsyncBufRead + Unpin,
{
    reporter.session_opened(peer);

    let mut stats = SessionStats::default();
    let mut buf = Vec::new();

    let outcome = loop {
        buf.clear();
        match read_record(&mut reader, &mut buf, limits.max_record_bytes).await {
            Ok(ReadStep::Record) => {}
            Ok(ReadStep::Closed(outcome)) => break outcome,
            Err(e) => break SessionOutcome::ReadError(e),
        }

        stats.records += 1;
        handle_record(&buf, peer, backend, reporter, &mut stats);
    };

    let report = SessionReport {
        peer,
        outcome,
        stats,
    };
    reporter.session_closed(&report);
    report
}

/// Decodes and injects one record, updating `stats`.  Never ends the session.
fn handle_record(
    record: &[u8],
    peer: SocketAddr,
    backend: &dyn InjectionBackend,
    reporter: &dyn SessionReporter,
    stats: &mut SessionStats,
) {
    let event = match decode(record) {
        Ok(event) => event,
        Err(e) if e.is_no_op() => {
            stats.no_ops += 1;
            reporter.skipped_empty(peer);
            return;
        }
        Err(e) => {
            stats.decode_errors += 1;
            reporter.decode_failed(peer, &e);
            return;
        }
    };

    match backend.inject(&event) {
        Ok(()) => {
            stats.injected += 1;
            reporter.injected(peer, &event);
        }
        Err(e) => {
            stats.injection_errors += 1;
            reporter.injection_failed(peer, &event, &e);
        }
    }
}

/// Result of one attempt to read a record.
enum ReadStep {
    /// `buf` holds one complete record, terminator removed.
    Record,
    /// The session must close.
    Closed(SessionOutcome),
}

/// Reads bytes up to and including the next `\n`, refusing to buffer more
/// than `max_record_bytes + 2` bytes.
///
/// An optional `\r` before the terminator does not count against the limit,
/// since [`decode`] strips it.
async fn read_record<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_record_bytes: usize,
) -> io::Result<ReadStep>
where
    R: AsyncBufRead + Unpin,
{
    // Room for the `\r\n` ending of a maximum-size record.
    let cap = max_record_bytes.saturating_add(2) as u64;
    let n = (&mut *reader)
        .take(cap)
        .read_until(RECORD_TERMINATOR, buf)
        .await?;

    if n == 0 {
        return Ok(ReadStep::Closed(SessionOutcome::EndOfStream));
    }
    let terminated = buf.last() == Some(&RECORD_TERMINATOR);
    if terminated {
        buf.pop();
    }
    if body_len(buf) > max_record_bytes {
        return Ok(ReadStep::Closed(SessionOutcome::RecordTooLong {
            limit: max_record_bytes,
        }));
    }
    if terminated {
        return Ok(ReadStep::Record);
    }
    Ok(ReadStep::Closed(SessionOutcome::Truncated {
        pending_bytes: buf.len(),
    }))
}

/// Length of a record excluding one trailing `\r`.
fn body_len(record: &[u8]) -> usize {
    record.strip_suffix(b"\r").unwrap_or(record).len()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
