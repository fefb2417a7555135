//! Minimal single-shot HTTP responder for sync tests
//!
//! Accepts one connection, reads the full request, replies with a canned
//! response, and hands the captured request back to the test.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A captured HTTP request
pub(crate) struct Received {
    /// Request line and headers
    pub head: String,
    /// Request body
    pub body: Vec<u8>,
}

/// Bind a listener on an ephemeral local port
pub(crate) async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

/// Serve exactly one request with the given status line and JSON body
pub(crate) async fn respond_once(listener: TcpListener, status: &str, body: String) -> Received {
    respond_once_after(listener, Duration::ZERO, status, body).await
}

/// Serve one request, delaying the response by `delay`
pub(crate) async fn respond_once_after(
    listener: TcpListener,
    delay: Duration,
    status: &str,
    body: String,
) -> Received {
    let (mut socket, _) = listener.accept().await.unwrap();
    let received = read_request(&mut socket).await;

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();

    received
}

/// Accept a connection and never respond (for timeout tests)
pub(crate) async fn hold_open(listener: TcpListener, duration: Duration) {
    let (_socket, _) = listener.accept().await.unwrap();
    tokio::time::sleep(duration).await;
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = parse_content_length(&head);

    let body_start = (header_end + 4).min(buf.len());
    while buf.len() - body_start < content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    Received {
        head,
        body: buf[body_start..].to_vec(),
    }
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn parse_content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}
