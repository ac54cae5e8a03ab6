//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: local record → HTTP requests → refreshed record

use make_provider::{
    ClientConfig, DeleteResult, LifecycleState, LocalRecord, MakeClient, ResourceKind, StringMap,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MakeClient {
    let config = ClientConfig::builder()
        .api_token("integration-token")
        .base_url(server.uri())
        .build()
        .unwrap();
    MakeClient::new(&config).unwrap()
}

async fn mount(server: &MockServer, verb: &str, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("Authorization", "Token integration-token"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Full Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_scenario_lifecycle() {
    let server = MockServer::start().await;
    let created = json!({
        "id": "sc-100",
        "name": "Nightly",
        "description": "",
        "is_active": true,
        "team_id": "t-1"
    });

    Mock::given(method("POST"))
        .and(path("/v2/scenarios"))
        .and(body_json(json!({"name": "Nightly", "is_active": true, "team_id": "t-1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;
    mount(&server, "GET", "/v2/scenarios/sc-100", 200, created).await;
    Mock::given(method("PUT"))
        .and(path("/v2/scenarios/sc-100"))
        .and(body_json(json!({"name": "Nightly", "is_active": false, "team_id": "t-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sc-100",
            "name": "Nightly",
            "is_active": false,
            "team_id": "t-1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/scenarios/sc-100"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let scenarios = client.reconciler(ResourceKind::Scenario);
    let cancel = CancellationToken::new();

    let desired = LocalRecord::new(ResourceKind::Scenario)
        .with("name", "Nightly")
        .with("active", true)
        .with("team_id", "t-1");
    let record = scenarios.create(&cancel, &desired).await.unwrap();
    assert_eq!(record.id(), Some("sc-100"));
    assert!(record.get("description").is_null());

    let outcome = scenarios.read(&cancel, &record).await.unwrap();
    assert_eq!(outcome.state(), LifecycleState::Synced);
    assert_eq!(outcome.record(), Some(&record));

    let planned = record.clone().with("active", false);
    let updated = scenarios.update(&cancel, &planned).await.unwrap();
    assert_eq!(updated.bool("active"), Some(false));

    let deleted = scenarios.delete(&cancel, &updated).await.unwrap();
    assert_eq!(deleted, DeleteResult::Deleted);
}

#[tokio::test]
async fn test_connection_settings_round_trip() {
    let server = MockServer::start().await;
    mount(
        &server,
        "POST",
        "/v2/connections",
        201,
        json!({
            "id": 55,
            "name": "Mail",
            "app_name": "gmail",
            "settings": {"port": 587, "tls": true},
            "verified": false
        }),
    )
    .await;

    let settings: StringMap = [("port", "587"), ("tls", "true")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let desired = LocalRecord::new(ResourceKind::Connection)
        .with("name", "Mail")
        .with("app_name", "gmail")
        .with("settings", settings.clone());

    let record = client_for(&server)
        .reconciler(ResourceKind::Connection)
        .create(&CancellationToken::new(), &desired)
        .await
        .unwrap();

    assert_eq!(record.id(), Some("55"));
    assert_eq!(record.map("settings"), Some(&settings));
    assert_eq!(record.bool("verified"), Some(false));
    assert!(record.get("team_id").is_null());

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        sent,
        json!({"name": "Mail", "app_name": "gmail", "settings": {"port": "587", "tls": "true"}})
    );
}

#[tokio::test]
async fn test_webhook_import_then_read() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/v2/webhooks/wh-3",
        200,
        json!({"id": "wh-3", "name": "Orders", "url": "https://hook.make.com/x", "active": true}),
    )
    .await;

    let webhooks = client_for(&server).reconciler(ResourceKind::Webhook);
    let cancel = CancellationToken::new();

    let imported = webhooks.import(&cancel, "wh-3").await.unwrap();
    assert_eq!(imported.string("url"), Some("https://hook.make.com/x"));
    assert!(imported.get("settings").is_null());

    let outcome = webhooks.read(&cancel, &imported).await.unwrap();
    assert_eq!(outcome.into_record(), Some(imported));
}

#[tokio::test]
async fn test_team_lookup_and_missing() {
    let server = MockServer::start().await;
    mount(
        &server,
        "GET",
        "/v2/teams/7",
        200,
        json!({"id": 7, "name": "Ops", "organization_id": 3}),
    )
    .await;
    mount(&server, "GET", "/v2/teams/8", 404, json!({"message": "Team not found"})).await;

    let teams = client_for(&server).reconciler(ResourceKind::Team);
    let cancel = CancellationToken::new();

    let team = teams.lookup(&cancel, "7").await.unwrap();
    assert_eq!(team.string("organization_id"), Some("3"));

    let err = teams.lookup(&cancel, "8").await.unwrap_err();
    assert!(err.is_not_found());

    let gone = teams
        .read(&cancel, &LocalRecord::from_id(ResourceKind::Team, "8"))
        .await
        .unwrap();
    assert!(gone.is_gone());
}

#[tokio::test]
async fn test_organization_update_missing_is_error() {
    let server = MockServer::start().await;
    mount(&server, "PUT", "/v2/organizations/o-1", 404, json!({})).await;

    let planned = LocalRecord::from_id(ResourceKind::Organization, "o-1").with("name", "Acme");
    let err = client_for(&server)
        .reconciler(ResourceKind::Organization)
        .update(&CancellationToken::new(), &planned)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_data_store_delete_twice() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/data-stores/ds-1"))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/data-stores/ds-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let stores = client_for(&server).reconciler(ResourceKind::DataStore);
    let cancel = CancellationToken::new();
    let prior = LocalRecord::from_id(ResourceKind::DataStore, "ds-1").with("name", "rows");

    assert_eq!(stores.delete(&cancel, &prior).await.unwrap(), DeleteResult::Deleted);
    assert_eq!(
        stores.delete(&cancel, &prior).await.unwrap(),
        DeleteResult::AlreadyAbsent
    );
}

#[tokio::test]
async fn test_server_error_message_surfaces() {
    let server = MockServer::start().await;
    mount(
        &server,
        "POST",
        "/v2/data-stores",
        422,
        json!({"error": "name already taken"}),
    )
    .await;

    let desired = LocalRecord::new(ResourceKind::DataStore).with("name", "rows");
    let err = client_for(&server)
        .reconciler(ResourceKind::DataStore)
        .create(&CancellationToken::new(), &desired)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unable to create data store: API request failed with status 422: name already taken"
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
