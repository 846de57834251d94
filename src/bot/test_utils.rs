use std::time::Duration;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    sync::oneshot,
};

use super::api::PriceFetcher;

/* Shared helpers for tests that talk to a local stand-in of the exchange site. */

const TEST_TIMEOUT: Duration = Duration::from_secs(5);

// Serves a single HTTP response, and reports back the request line it received.
pub async fn serve_once(body: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).to_string();
        let request_line = request.lines().next().unwrap_or_default().to_string();
        let _ = tx.send(request_line);

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    (addr.to_string(), rx)
}

// A host whose port was just released, so connecting is refused.
pub async fn unreachable_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    drop(listener);
    host
}

// A host that accepts the connection and never answers.
pub async fn silent_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let host = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;
    });
    host
}

pub async fn fetcher_for(body: &str) -> PriceFetcher {
    let (host, _) = serve_once(body.to_string()).await;
    PriceFetcher::new(&host, TEST_TIMEOUT).unwrap()
}

pub async fn unreachable_fetcher() -> PriceFetcher {
    PriceFetcher::new(&unreachable_host().await, TEST_TIMEOUT).unwrap()
}
