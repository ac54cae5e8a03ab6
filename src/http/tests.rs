//! Tests for the HTTP transport module

use super::*;
use crate::config::ClientConfig;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> HttpTransport {
    let config = ClientConfig::builder()
        .api_token("test-token")
        .base_url(server.uri())
        .build()
        .unwrap();
    HttpTransport::new(&config).unwrap()
}

// ============================================================================
// Request Construction Tests
// ============================================================================

#[test]
fn test_api_request_builders() {
    let req = ApiRequest::get("v2/teams/1");
    assert_eq!(req.method, crate::types::Method::GET);
    assert!(req.body.is_none());

    let req = ApiRequest::put("v2/teams/1", json!({"name": "x"}));
    assert_eq!(req.method, crate::types::Method::PUT);
    assert_eq!(req.body, Some(json!({"name": "x"})));
}

#[test]
fn test_build_url_keeps_base_path() {
    let config = ClientConfig::builder()
        .api_token("t")
        .base_url("https://eu1.make.com/api")
        .build()
        .unwrap();
    let transport = HttpTransport::new(&config).unwrap();
    assert_eq!(
        transport.build_url("v2/scenarios/9").unwrap().as_str(),
        "https://eu1.make.com/api/v2/scenarios/9"
    );
    assert_eq!(
        transport.build_url("/v2/scenarios").unwrap().as_str(),
        "https://eu1.make.com/api/v2/scenarios"
    );
}

#[test]
fn test_default_base_url() {
    let transport = HttpTransport::new(&ClientConfig::new("t")).unwrap();
    assert_eq!(
        transport.build_url("v2/teams").unwrap().as_str(),
        "https://api.make.com/v2/teams"
    );
}

#[test]
fn test_malformed_base_url_is_transport_error() {
    let config = ClientConfig::builder()
        .api_token("t")
        .base_url("not a url")
        .build()
        .unwrap();
    let err = HttpTransport::new(&config).unwrap_err();
    assert!(err.is_transport());

    let config = ClientConfig::builder()
        .api_token("t")
        .base_url("mailto:ops@example.com")
        .build()
        .unwrap();
    assert!(HttpTransport::new(&config).unwrap_err().is_transport());
}

// ============================================================================
// Error Message Tests
// ============================================================================

#[test]
fn test_extract_error_message_prefers_message() {
    assert_eq!(
        extract_error_message(r#"{"message":"bad","error":"E_BAD","code":7}"#),
        "bad"
    );
}

#[test]
fn test_extract_error_message_falls_back_to_error() {
    assert_eq!(extract_error_message(r#"{"error":"forbidden"}"#), "forbidden");
    assert_eq!(
        extract_error_message(r#"{"message":"","error":"forbidden"}"#),
        "forbidden"
    );
}

#[test]
fn test_extract_error_message_raw_body() {
    assert_eq!(extract_error_message("upstream timeout"), "upstream timeout");
    assert_eq!(extract_error_message(r#"{"code":500}"#), r#"{"code":500}"#);
    assert_eq!(extract_error_message(""), "");
}

#[test]
fn test_raw_response_classification() {
    assert!(RawResponse::new(200, "{}").is_success());
    assert!(RawResponse::new(204, "").is_success());
    assert!(RawResponse::new(404, "").is_not_found());
    assert!(RawResponse::new(404, "").is_error());
    assert!(RawResponse::new(500, "").is_error());
}

// ============================================================================
// HTTP Tests
// ============================================================================

#[tokio::test]
async fn test_send_sets_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/scenarios/42"))
        .and(header("Authorization", "Token test-token"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let response = transport
        .send(ApiRequest::get("v2/scenarios/42"))
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&response.body).unwrap(),
        json!({"id": "42"})
    );
}

#[tokio::test]
async fn test_send_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/teams"))
        .and(body_json(json!({"name": "Ops"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "t-1", "name": "Ops"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let response = transport
        .send(ApiRequest::post("v2/teams", json!({"name": "Ops"})))
        .await
        .unwrap();
    assert_eq!(response.status, 201);
}

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/webhooks/w-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let transport = transport_for(&mock_server);
    let response = transport
        .send(ApiRequest::delete("v2/webhooks/w-1"))
        .await
        .unwrap();
    assert_eq!(response, RawResponse::new(500, "boom"));
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/teams"))
        .and(header("X-Trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .api_token("t")
        .base_url(mock_server.uri())
        .header("X-Trace", "abc")
        .build()
        .unwrap();
    let transport = HttpTransport::new(&config).unwrap();
    transport.send(ApiRequest::get("v2/teams")).await.unwrap();
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let config = ClientConfig::builder()
        .api_token("t")
        .base_url("http://127.0.0.1:1/")
        .build()
        .unwrap();
    let transport = HttpTransport::new(&config).unwrap();
    let err = transport
        .send(ApiRequest::get("v2/teams/1"))
        .await
        .unwrap_err();
    assert!(err.is_transport());
}
