//! TCP listener: accept loop and per-connection session tasks.
//!
//! The accept loop never waits on a session.  Each accepted connection is
//! wrapped in a buffered reader and handed to its own Tokio task running
//! [`run_session`]; the loop goes straight back to `accept()`.  Sessions
//! share nothing except the injection backend and the reporter, both behind
//! `Arc`.
//!
//! A failed `accept()` (typically descriptor exhaustion) is reported and
//! retried after a short pause.  It never stops the listener.
//!
//! The loop runs over an [`AcceptSource`].  Production uses
//! `tokio::net::TcpListener`; tests substitute a scripted source to reach
//! the error path.

use std::future::poll_fn;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::application::inject_character::InjectionBackend;
use crate::application::report::SessionReporter;
use crate::application::session::{run_session, SessionLimits};
use crate::domain::ServerConfig;

/// Pause after a failed `accept()` before trying again.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Anything that yields incoming connections.
pub trait AcceptSource: Send + 'static {
    /// The byte stream of one accepted connection.
    type Stream: AsyncRead + Unpin + Send + 'static;

    /// Polls for the next connection and its peer address.
    fn poll_accept(
        &mut self,
        cx: &mut TaskContext<'_>,
    ) -> Poll<io::Result<(Self::Stream, SocketAddr)>>;
}

impl AcceptSource for TcpListener {
    type Stream = TcpStream;

    fn poll_accept(
        &mut self,
        cx: &mut TaskContext<'_>,
    ) -> Poll<io::Result<(TcpStream, SocketAddr)>> {
        TcpListener::poll_accept(self, cx)
    }
}

/// A bound listener that has not started accepting yet.
///
/// Binding and serving are separate steps so callers (tests in particular)
/// can bind port 0 and learn the real address before the loop starts.
#[derive(Debug)]
pub struct Listener<A = TcpListener> {
    inner: A,
    limits: SessionLimits,
}

impl Listener<TcpListener> {
    /// Binds `addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (port in use,
    /// insufficient permission, unknown interface).
    pub async fn bind(addr: SocketAddr, limits: SessionLimits) -> anyhow::Result<Self> {
        let inner = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind keystroke listener on {addr}"))?;
        Ok(Self { inner, limits })
    }

    /// Returns the address actually bound.
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.inner
            .local_addr()
            .context("failed to read listener address")
    }
}

impl<A: AcceptSource> Listener<A> {
    /// Wraps an already-open accept source.
    pub fn from_source(inner: A, limits: SessionLimits) -> Self {
        Self { inner, limits }
    }

    /// Accepts connections forever, spawning one session task per
    /// connection.
    pub async fn serve(
        mut self,
        backend: Arc<dyn InjectionBackend>,
        reporter: Arc<dyn SessionReporter>,
    ) -> anyhow::Result<()> {
        loop {
            match poll_fn(|cx| self.inner.poll_accept(cx)).await {
                Ok((stream, peer)) => {
                    let backend = Arc::clone(&backend);
                    let reporter = Arc::clone(&reporter);
                    let limits = self.limits;
                    tokio::spawn(async move {
                        handle_connection(stream, peer, backend, reporter, limits).await;
                    });
                }
                Err(e) => {
                    reporter.accept_failed(&e);
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                }
            }
        }
    }
}

/// Body of one connection task.
async fn handle_connection<S>(
    stream: S,
    peer: SocketAddr,
    backend: Arc<dyn InjectionBackend>,
    reporter: Arc<dyn SessionReporter>,
    limits: SessionLimits,
) where
    S: AsyncRead + Unpin,
{
    run_session(
        BufReader::new(stream),
        peer,
        backend.as_ref(),
        reporter.as_ref(),
        limits,
    )
    .await;
}

/// Binds `config.bind_addr` and serves until the process is stopped.
///
/// # Errors
///
/// Returns an error only if the listener cannot be bound.
pub async fn run_server(
    config: &ServerConfig,
    backend: Arc<dyn InjectionBackend>,
    reporter: Arc<dyn SessionReporter>,
) -> anyhow::Result<()> {
    let limits = SessionLimits {
        max_record_bytes: config.max_record_bytes,
    };
    let listener = Listener::bind(config.bind_addr, limits).await?;
    info!(
        "keyrelay listening on {} using {}",
        listener.local_addr()?,
        backend.name()
    );
    listener.serve(backend, reporter).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
