//! End-to-end tests for common restwire workflows over a real HTTP stack.

use restwire::prelude::*;
use restwire::USER_AGENT_TOKEN;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default, PartialEq, Deserialize)]
struct Item {
    id: u32,
}

#[derive(Debug, Serialize)]
struct NewItem {
    name: String,
}

fn client_for(server: &MockServer) -> RestClient {
    let config = TransportConfig::builder()
        .base_url(format!("{}/", server.uri()))
        .build();
    RestClient::from_config(config).unwrap()
}

// =============================================================================
// GET
// =============================================================================

#[tokio::test]
async fn test_get_parses_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .and(header("accept", "application/json"))
        .and(header("user-agent", USER_AGENT_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let item: Item = client.get("/items").await.unwrap();
    assert_eq!(item, Item { id: 1 });
}

#[tokio::test]
async fn test_get_malformed_body_returns_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let item: Item = client.get("/items").await.unwrap();
    assert_eq!(item, Item { id: 0 });
}

#[tokio::test]
async fn test_get_xml_document() {
    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(rename = "item")]
    struct XmlItem {
        id: u32,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/7"))
        .and(header("accept", "application/xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<item><id>7</id></item>"))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let item: XmlItem = client.get_xml("items/7").await.unwrap();
    assert_eq!(item, XmlItem { id: 7 });

    let raw = client.get_xml_text("items/7").await.unwrap();
    assert_eq!(raw, "<item><id>7</id></item>");
}

#[tokio::test]
async fn test_get_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client.get_text("/items").await.unwrap_err();
    assert_eq!(err.status_code(), Some(502));
    assert_eq!(err.body(), Some("bad gateway"));
}

// =============================================================================
// POST / PUT
// =============================================================================

#[tokio::test]
async fn test_post_created() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({"name": "a"})))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":2}"#))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let item: Item = client
        .post(
            "/items",
            &NewItem {
                name: "a".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(item, Item { id: 2 });
}

#[tokio::test]
async fn test_post_server_error_logs_payload_first() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let entries = Arc::new(Mutex::new(Vec::<String>::new()));
    let captured = entries.clone();
    let mut client = client_for(&server)
        .with_sink(move |entry| captured.lock().unwrap().push(entry.to_string()));

    let err = client
        .post::<_, Item>(
            "/items",
            &NewItem {
                name: "a".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::HttpStatus { status: 500, .. }));

    let entries = entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("\"name\": \"a\""));
}

#[tokio::test]
async fn test_put_conflict_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/2"))
        .respond_with(ResponseTemplate::new(409).set_body_string("conflict"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client
        .put::<_, Item>(
            "/items/2",
            &NewItem {
                name: "b".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(409));
    assert_eq!(err.body(), Some("conflict"));
}

#[tokio::test]
async fn test_put_malformed_response_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    let err = client
        .put::<_, Item>(
            "/items/2",
            &NewItem {
                name: "b".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_malformed_body());
}

// =============================================================================
// DELETE
// =============================================================================

#[tokio::test]
async fn test_delete_no_content_and_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.delete("/items/1").await.unwrap();

    let err = client.delete("/items/2").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

// =============================================================================
// Fire-and-forget and shared transport state
// =============================================================================

#[tokio::test]
async fn test_async_variants_leave_status_to_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("draining"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let mut client = client_for(&server);

    let response = client.get_async("/health").unwrap().await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.into_text().unwrap(), "draining");

    let response = client
        .post_without_status_check("/events", &serde_json::json!({"kind": "ping"}))
        .unwrap()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_agent_sent_once_per_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1}"#))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    for _ in 0..3 {
        let _: Item = client.get("/items").await.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in requests {
        let agents: Vec<_> = request.headers.get_all("user-agent").iter().collect();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0], USER_AGENT_TOKEN);
    }
    assert_eq!(
        client.transport().default_headers().get("user-agent").unwrap(),
        USER_AGENT_TOKEN
    );
}

#[tokio::test]
async fn test_tracing_sink_does_not_change_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":11}"#))
        .mount(&server)
        .await;

    let mut plain = client_for(&server);
    let mut logged = client_for(&server).with_sink(tracing_sink(Level::Debug));

    let a: Item = plain.get("/items").await.unwrap();
    let b: Item = logged.get("/items").await.unwrap();
    assert_eq!(a, b);
}
