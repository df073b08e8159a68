//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;

use product_api::config::ServiceConfig;
use product_api::http::HttpServer;
use product_api::lifecycle::{build_product_service, Shutdown};
use serde_json::{json, Value};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    #[allow(dead_code)]
    pub async fn stop(self) -> Result<(), std::io::Error> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

/// Start the service with `config`, listening on 127.0.0.1 with a random port.
pub async fn start_server(mut config: ServiceConfig) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let products = build_product_service(&config.store).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, products);
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// A payload that passes validation.
pub fn product_json(name: &str) -> Value {
    json!({
        "name": name,
        "description": format!("{name} description"),
        "price": 8.75,
        "gst": 1.25,
        "licenceNumber": "rjb-bev-tea"
    })
}

/// Open a raw connection and send a POST whose body stops halfway.
///
/// The handler stays blocked on the body until the connection is dropped.
#[allow(dead_code)]
pub async fn send_partial_post(addr: SocketAddr) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let head = format!(
        "POST / HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n"
    );
    stream.write_all(head.as_bytes()).await.unwrap();
    stream.write_all(br#"{"name":"Te"#).await.unwrap();
    stream.flush().await.unwrap();
    stream
}
