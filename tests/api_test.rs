//! End-to-end tests over a real socket.

use std::time::{Duration, Instant};

use product_api::config::ServiceConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;

mod common;

#[tokio::test]
async fn test_create_list_replace_cycle() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let res = client
        .post(server.url("/"))
        .json(&common::product_json("Tea"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["location"], "/1");
    assert!(res.headers().contains_key("x-request-id"));
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Tea");

    let res = client
        .post(server.url("/"))
        .json(&common::product_json("Coffee"))
        .send()
        .await
        .unwrap();
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 2);

    let mut replacement = common::product_json("Green Tea");
    replacement["id"] = json!(999);
    let res = client
        .put(server.url("/1"))
        .json(&replacement)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let replaced: Value = res.json().await.unwrap();
    assert_eq!(replaced["id"], 1);
    assert_eq!(replaced["name"], "Green Tea");

    let list: Value = client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Green Tea", "Coffee"]);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_error_outcomes() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    // Validation failure reports every field.
    let res = client.post(server.url("/")).json(&json!({})).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price", "gst", "licenceNumber"]);

    // Wrong JSON types are a decode failure.
    let res = client
        .post(server.url("/"))
        .json(&json!({ "name": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid product payload");

    // Unknown id.
    let res = client
        .put(server.url("/7"))
        .json(&common::product_json("Tea"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Malformed id.
    let res = client
        .put(server.url("/seven"))
        .json(&common::product_json("Tea"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: Value = client.get(server.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list, json!([]));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_seeded_catalogue_and_capacity() {
    let mut config = ServiceConfig::default();
    config.store.seed_demo_data = true;
    config.store.max_records = Some(3);
    let server = common::start_server(config).await;
    let client = common::client();

    let list: Value = client.get(server.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list[0]["name"], "Coffee");
    assert_eq!(list[1]["name"], "Tea");

    let res = client
        .post(server.url("/"))
        .json(&common::product_json("Mocha"))
        .send()
        .await
        .unwrap();
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 3);

    let res = client
        .post(server.url("/"))
        .json(&common::product_json("Latte"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INSUFFICIENT_STORAGE);

    let status: Value = client
        .get(server.url("/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["products"], 3);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_client_ids_of_any_shape_are_dropped() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();

    let mut payload = common::product_json("Tea");
    payload["id"] = json!("x");
    let res = client.post(server.url("/")).json(&payload).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["id"], 1);

    for id in [json!(-1), json!("x"), json!(1.5), json!(999)] {
        let mut payload = common::product_json("Green Tea");
        payload["id"] = id.clone();
        let res = client.put(server.url("/1")).json(&payload).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "id {id} should be ignored");
        let replaced: Value = res.json().await.unwrap();
        assert_eq!(replaced["id"], 1);
    }

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = ServiceConfig::default();
    config.security.max_body_size = 64;
    let server = common::start_server(config).await;
    let client = common::client();

    let mut payload = common::product_json("Tea");
    payload["description"] = json!("x".repeat(200));
    let res = client.post(server.url("/")).json(&payload).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid product payload");

    let list: Value = client.get(server.url("/")).send().await.unwrap().json().await.unwrap();
    assert_eq!(list, json!([]));

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_stalled_request_times_out() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 1;
    let server = common::start_server(config).await;

    let mut stream = common::send_partial_post(server.addr).await;
    let started = Instant::now();

    let mut buf = [0u8; 1024];
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("server should answer a stalled request")
        .unwrap();

    let response = String::from_utf8_lossy(&buf[..read]);
    assert!(response.starts_with("HTTP/1.1 408"), "unexpected response: {response}");
    assert!(started.elapsed() < Duration::from_secs(3));

    drop(stream);
    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_abandons_requests_after_grace_period() {
    let mut config = ServiceConfig::default();
    config.timeouts.request_secs = 30;
    config.timeouts.shutdown_grace_secs = 1;
    let server = common::start_server(config).await;

    let _stream = common::send_partial_post(server.addr).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let started = Instant::now();
    server.shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server should stop once the grace period ends")
        .unwrap()
        .unwrap();

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(900), "stopped too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "stopped too late: {elapsed:?}");
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let server = common::start_server(ServiceConfig::default()).await;
    let client = common::client();
    let url = server.url("/");

    assert!(client.get(&url).send().await.unwrap().status().is_success());

    server.stop().await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(client.get(&url).send().await.is_err(), "server should be gone");
}
