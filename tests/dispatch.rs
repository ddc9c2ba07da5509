//! Dispatch chain tests for the `/http2` trigger.

use std::net::SocketAddr;
use std::time::Duration;

use function_host::config::HostConfig;
use function_host::http::GENERIC_MESSAGE;

mod common;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_dispatch_reaches_downstream_with_payload() {
    let downstream_addr: SocketAddr = "127.0.0.1:28281".parse().unwrap();
    let host_addr: SocketAddr = "127.0.0.1:28282".parse().unwrap();

    let mut requests = common::start_recording_downstream(downstream_addr).await;

    let mut config = HostConfig::default();
    config.listener.bind_address = host_addr.to_string();
    config.downstream.url = format!("http://{}/api/http1", downstream_addr);

    let (shutdown, _store) = common::start_host(host_addr, config).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = client()
        .get(format!("http://{}/http2?name=Ada", host_addr))
        .send()
        .await
        .expect("host unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        "Hello, Ada. This HTTP triggered function executed successfully."
    );

    let raw = tokio::time::timeout(Duration::from_secs(2), requests.recv())
        .await
        .expect("downstream never called")
        .unwrap();

    assert!(raw.starts_with("POST /api/http1/"), "raw request: {raw}");
    assert!(raw.contains("content-type: application/json")
        || raw.contains("Content-Type: application/json"));
    assert!(raw.contains(r#""name":"Ada""#), "raw request: {raw}");
    assert!(raw.contains(r#""timestamp":"#), "raw request: {raw}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_dispatch_without_name_sends_placeholder() {
    let downstream_addr: SocketAddr = "127.0.0.1:28283".parse().unwrap();
    let host_addr: SocketAddr = "127.0.0.1:28284".parse().unwrap();

    let mut requests = common::start_recording_downstream(downstream_addr).await;

    let mut config = HostConfig::default();
    config.listener.bind_address = host_addr.to_string();
    config.downstream.url = format!("http://{}/api/http1", downstream_addr);
    config.downstream.suffix_correlation_token = false;

    let (shutdown, _store) = common::start_host(host_addr, config).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = client()
        .get(format!("http://{}/http2", host_addr))
        .send()
        .await
        .expect("host unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), GENERIC_MESSAGE);

    let raw = tokio::time::timeout(Duration::from_secs(2), requests.recv())
        .await
        .expect("downstream never called")
        .unwrap();

    // No token suffix configured, so the path is used verbatim.
    assert!(raw.starts_with("POST /api/http1 "), "raw request: {raw}");
    assert!(raw.contains("No name provided"), "raw request: {raw}");

    shutdown.trigger();
}

#[tokio::test]
async fn test_downstream_refusal_still_returns_200() {
    let host_addr: SocketAddr = "127.0.0.1:28285".parse().unwrap();

    let mut config = HostConfig::default();
    config.listener.bind_address = host_addr.to_string();
    // Nothing listens here; the dispatch is refused.
    config.downstream.url = "http://127.0.0.1:1/api/http1".to_string();

    let (shutdown, _store) = common::start_host(host_addr, config).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = client()
        .get(format!("http://{}/http2?name=Grace", host_addr))
        .send()
        .await
        .expect("host unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        "Hello, Grace. This HTTP triggered function executed successfully."
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_downstream_timeout_still_returns_200() {
    let downstream_addr: SocketAddr = "127.0.0.1:28286".parse().unwrap();
    let host_addr: SocketAddr = "127.0.0.1:28287".parse().unwrap();

    common::start_slow_downstream(downstream_addr, Duration::from_secs(10)).await;

    let mut config = HostConfig::default();
    config.listener.bind_address = host_addr.to_string();
    config.downstream.url = format!("http://{}/api/http1", downstream_addr);
    // Short dispatch timeout so the test stays fast.
    config.timeouts.dispatch_secs = 1;

    let (shutdown, _store) = common::start_host(host_addr, config).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let started = std::time::Instant::now();
    let res = client()
        .get(format!("http://{}/http2?name=Ada", host_addr))
        .send()
        .await
        .expect("host unreachable");

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        "Hello, Ada. This HTTP triggered function executed successfully."
    );
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "dispatch timeout should bound the request"
    );

    shutdown.trigger();
}
