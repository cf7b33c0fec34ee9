//! End-to-end tests for the keyrelay server over loopback TCP.
//!
//! Each test binds a [`Listener`] on `127.0.0.1:0`, serves it with a
//! [`RecordingBackend`] and a [`RecordingReporter`], and drives it with
//! plain `TcpStream` clients.  Nothing is injected into the real desktop.
//!
//! Sessions finish asynchronously after a client disconnects, so assertions
//! wait for the reporter to see the expected number of closed sessions
//! before inspecting the backend.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use keyrelay_core::{encode, CharacterEvent, KeyPosition};
use keyrelay_server::application::report::{RecordingReporter, ReportEvent};
use keyrelay_server::application::session::SessionLimits;
use keyrelay_server::infrastructure::input_injection::recording::RecordingBackend;
use keyrelay_server::infrastructure::network::Listener;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Harness {
    addr: SocketAddr,
    backend: Arc<RecordingBackend>,
    reporter: Arc<RecordingReporter>,
}

async fn start_server() -> Harness {
    let backend = Arc::new(RecordingBackend::new());
    let reporter = Arc::new(RecordingReporter::new());
    let listener = Listener::bind("127.0.0.1:0".parse().unwrap(), SessionLimits::default())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener.serve(backend.clone(), reporter.clone()));
    Harness {
        addr,
        backend,
        reporter,
    }
}

async fn wait_for_closed(reporter: &RecordingReporter, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while reporter.closed_sessions() < count {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("sessions did not close within 5 s");
}

fn record(text: &str) -> Vec<u8> {
    encode(&CharacterEvent::new(text).unwrap())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_typed_line_is_injected_in_order() {
    // Arrange
    let h = start_server().await;
    let mut client = TcpStream::connect(h.addr).await.unwrap();

    // Act: "hi" followed by Enter, as the client sends a line.
    for text in ["h", "i", "\r"] {
        client.write_all(&record(text)).await.unwrap();
    }
    drop(client);
    wait_for_closed(&h.reporter, 1).await;

    // Assert
    assert_eq!(
        h.backend.keys(),
        vec![KeyPosition::KeyH, KeyPosition::KeyI, KeyPosition::Enter]
    );
}

#[tokio::test]
async fn test_malformed_records_are_skipped() {
    let h = start_server().await;
    let mut client = TcpStream::connect(h.addr).await.unwrap();

    client
        .write_all(b"not-json\n{\"char\":\"B\"}\n{\"char\":\"\"}\n{\"x\":1}\n")
        .await
        .unwrap();
    drop(client);
    wait_for_closed(&h.reporter, 1).await;

    assert_eq!(h.backend.injected(), vec!["B".to_string()]);
    let closed = h
        .reporter
        .events()
        .into_iter()
        .find_map(|e| match e {
            ReportEvent::SessionClosed { stats, .. } => Some(stats),
            _ => None,
        })
        .unwrap();
    assert_eq!(closed.records, 4);
    assert_eq!(closed.injected, 1);
    assert_eq!(closed.no_ops, 1);
    assert_eq!(closed.decode_errors, 2);
}

#[tokio::test]
async fn test_record_split_across_writes_is_reassembled() {
    let h = start_server().await;
    let mut client = TcpStream::connect(h.addr).await.unwrap();

    client.write_all(b"{\"char\"").await.unwrap();
    client.flush().await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    client.write_all(b":\"Q\"}\n").await.unwrap();
    drop(client);
    wait_for_closed(&h.reporter, 1).await;

    assert_eq!(h.backend.injected(), vec!["Q".to_string()]);
}

#[tokio::test]
async fn test_concurrent_clients_keep_their_own_order() {
    // Arrange: two open connections, each with its own ordered sequence.
    let h = start_server().await;
    let mut a = TcpStream::connect(h.addr).await.unwrap();
    let mut b = TcpStream::connect(h.addr).await.unwrap();
    let a_seq: Vec<String> = (1..=9).map(|i| format!("a{i}")).collect();
    let b_seq: Vec<String> = (1..=9).map(|i| format!("b{i}")).collect();

    // Act: interleave writes from the two connections.
    for (x, y) in a_seq.iter().zip(&b_seq) {
        a.write_all(&record(x)).await.unwrap();
        b.write_all(&record(y)).await.unwrap();
    }
    drop(a);
    drop(b);
    wait_for_closed(&h.reporter, 2).await;

    // Assert: every keystroke arrived once, and each client's subsequence is
    // in the order it was sent.
    let injected = h.backend.injected();
    let from_a: Vec<String> = injected.iter().filter(|c| c.starts_with('a')).cloned().collect();
    let from_b: Vec<String> = injected.iter().filter(|c| c.starts_with('b')).cloned().collect();
    assert_eq!(from_a, a_seq);
    assert_eq!(from_b, b_seq);
}

#[tokio::test]
async fn test_idle_client_does_not_block_others() {
    let h = start_server().await;
    let _idle = TcpStream::connect(h.addr).await.unwrap();
    let mut active = TcpStream::connect(h.addr).await.unwrap();

    active.write_all(&record("z")).await.unwrap();
    drop(active);
    wait_for_closed(&h.reporter, 1).await;

    assert_eq!(h.backend.injected(), vec!["z".to_string()]);
}

#[tokio::test]
async fn test_disconnect_mid_record_closes_session_without_injecting() {
    let h = start_server().await;
    let mut client = TcpStream::connect(h.addr).await.unwrap();

    client.write_all(b"{\"char\":\"A\"}\n{\"char\":").await.unwrap();
    drop(client);
    wait_for_closed(&h.reporter, 1).await;

    assert_eq!(h.backend.injected(), vec!["A".to_string()]);
    assert!(h.reporter.events().iter().any(|e| matches!(
        e,
        ReportEvent::SessionClosed {
            outcome: "truncated record",
            ..
        }
    )));
}

#[tokio::test]
async fn test_session_open_and_close_are_reported_with_peer() {
    let h = start_server().await;
    let client = TcpStream::connect(h.addr).await.unwrap();
    let local = client.local_addr().unwrap();

    drop(client);
    wait_for_closed(&h.reporter, 1).await;

    let events = h.reporter.events();
    assert_eq!(events[0], ReportEvent::SessionOpened { peer: local });
    assert!(matches!(
        events.last(),
        Some(ReportEvent::SessionClosed { peer, .. }) if *peer == local
    ));
}
