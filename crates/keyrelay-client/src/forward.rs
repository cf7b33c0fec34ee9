//! The client's read-prompt-send loop.
//!
//! Generic over the three streams involved so tests can drive it with
//! `tokio_test::io::Builder` mocks instead of a terminal and a socket.

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::compose::records_for_line;

/// Totals for one run of [`forward_lines`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ForwardStats {
    /// Lines read from the input.
    pub lines: u64,
    /// Wire records written to the connection.
    pub records: u64,
}

/// Reads lines from `input` until EOF and writes their records to `conn`.
///
/// `prompt` is written to `echo` (normally stdout) before every read.  Line
/// terminators (`\n` or `\r\n`) are stripped before expansion.  Bytes that
/// are not valid UTF-8 are replaced with U+FFFD and the line is still sent.
///
/// # Errors
///
/// Fails if reading `input` fails, or if writing to `conn` or `echo` fails
/// (for example because the server went away).
pub async fn forward_lines<R, W, E>(
    mut input: R,
    conn: &mut W,
    echo: &mut E,
    prompt: &str,
) -> anyhow::Result<ForwardStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let mut stats = ForwardStats::default();
    let mut raw = Vec::new();

    loop {
        echo.write_all(prompt.as_bytes())
            .await
            .context("failed to write prompt")?;
        echo.flush().await.context("failed to flush prompt")?;

        raw.clear();
        let n = input
            .read_until(b'\n', &mut raw)
            .await
            .context("failed to read input")?;
        if n == 0 {
            break;
        }
        stats.lines += 1;
        let line = String::from_utf8_lossy(strip_line_ending(&raw));

        let records = records_for_line(&line);
        for record in &records {
            conn.write_all(record)
                .await
                .context("failed to send record to server")?;
        }
        conn.flush().await.context("failed to send record to server")?;
        stats.records += records.len() as u64;
        debug!("sent {} record(s) for a {}-char line", records.len(), line.chars().count());
    }

    conn.shutdown().await.context("failed to close connection")?;
    Ok(stats)
}

fn strip_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
