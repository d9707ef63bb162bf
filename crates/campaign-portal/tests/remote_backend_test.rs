//! Remote backend request shapes against a mock REST endpoint

use campaign_portal::{
    BackendClient, BackendConfig, PortalBackend, RemoteBackend, SubmissionStatus, SubmissionUpdate,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote(server: &MockServer) -> RemoteBackend {
    let client = BackendClient::new(BackendConfig {
        base_url: server.uri(),
        anon_key: "anon-key".into(),
        ..Default::default()
    })
    .expect("valid config");
    RemoteBackend::new(&client)
}

#[tokio::test]
async fn test_fetches_are_ordered_newest_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/campaigns"))
        .and(query_param("order", "created_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "c1",
            "title": "Launch",
            "description": "d",
            "requirements": "r",
            "content_type": "clipping",
            "status": "active",
            "total_budget": 500,
            "earnings_per_1k_views": 12.5,
            "user_id": "admin-1",
            "created_at": "2024-05-01T10:00:00+00:00",
            "has_competition": false,
            "prizes": null,
            "allowed_platforms": ["tiktok"]
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/submissions"))
        .and(query_param("order", "submitted_at.desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let backend = remote(&server);
    let campaigns = backend.fetch_campaigns().await.unwrap();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0].allowed_platforms.as_deref().map(|p| p.len()), Some(1));
    assert!(backend.fetch_submissions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_ping_counts_campaigns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/campaigns"))
        .and(query_param("select", "count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"count": 4}])))
        .expect(1)
        .mount(&server)
        .await;

    remote(&server).ping().await.unwrap();
}

#[tokio::test]
async fn test_update_with_no_match_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/submissions"))
        .and(query_param("id", "eq.missing"))
        .and(body_json(json!({"status": "approved"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let rows = remote(&server)
        .update_submission("missing", &SubmissionUpdate::status(SubmissionStatus::Approved))
        .await
        .unwrap();
    assert!(rows.is_empty());
}
