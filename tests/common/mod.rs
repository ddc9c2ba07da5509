//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use function_host::config::HostConfig;
use function_host::lifecycle::Shutdown;
use function_host::store::AccumulatorStore;
use function_host::trace::{RequestTracer, TracingSink};
use function_host::HttpServer;

/// Start the function host under test.
///
/// Returns the shutdown coordinator and the store, so tests can assert on
/// buffer state and stop the server when done.
pub async fn start_host(
    addr: SocketAddr,
    config: HostConfig,
) -> (Shutdown, Arc<AccumulatorStore>) {
    let store = Arc::new(AccumulatorStore::new());
    let tracer = Arc::new(RequestTracer::new(
        Arc::new(TracingSink),
        Duration::from_secs(config.timeouts.dispatch_secs),
        config.downstream.suffix_correlation_token,
    ));

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store.clone(), tracer);
    let listener = TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (shutdown, store)
}

/// Start a downstream that records each raw request it receives.
///
/// Requests (request line, headers, and body) are sent over the returned
/// channel as strings; every request is answered 200.
#[allow(dead_code)]
pub async fn start_recording_downstream(addr: SocketAddr) -> mpsc::UnboundedReceiver<String> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let mut raw = Vec::new();
                        let mut buf = vec![0u8; 8192];
                        loop {
                            match tokio::time::timeout(
                                Duration::from_millis(500),
                                socket.read(&mut buf),
                            )
                            .await
                            {
                                Ok(Ok(0)) | Err(_) => break,
                                Ok(Ok(n)) => raw.extend_from_slice(&buf[..n]),
                                Ok(Err(_)) => break,
                            }
                            if request_is_complete(&raw) {
                                break;
                            }
                        }
                        let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());

                        let _ = socket
                            .write_all(
                                b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok",
                            )
                            .await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    rx
}

/// True once `raw` holds a full request: headers plus `Content-Length`
/// bytes of body.
#[allow(dead_code)]
fn request_is_complete(raw: &[u8]) -> bool {
    let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&raw[..header_end]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    raw.len() >= header_end + 4 + content_length
}

/// Start a downstream that never answers within `delay`.
#[allow(dead_code)]
pub async fn start_slow_downstream(addr: SocketAddr, delay: Duration) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = socket
                            .write_all(
                                b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\nslow",
                            )
                            .await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}
