//! Session store against a mock auth service

use campaign_portal::{
    BackendClient, BackendConfig, PortalError, ProfileUpdate, Role, SessionStore, ValidationError,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store(server: &MockServer) -> SessionStore {
    let client = BackendClient::new(BackendConfig {
        base_url: server.uri(),
        anon_key: "anon-key".into(),
        ..Default::default()
    })
    .expect("valid config");
    SessionStore::new(client.auth())
}

async fn mount_sign_in(server: &MockServer, metadata: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-1",
            "token_type": "bearer",
            "user": {
                "id": "user-1",
                "email": "ada@example.com",
                "user_metadata": metadata
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_maps_identity_and_notifies() {
    let server = MockServer::start().await;
    mount_sign_in(&server, json!({"name": "Ada", "role": "admin"})).await;

    let session = store(&server);
    let mut changes = session.subscribe();

    let identity = session.login("ada@example.com", "pw").await.unwrap();

    assert_eq!(identity.name, "Ada");
    assert_eq!(identity.role, Role::Admin);
    assert!(session.is_authenticated().await);
    assert!(changes.has_changed().unwrap());
    assert_eq!(changes.borrow_and_update().as_ref(), Some(&identity));
}

#[tokio::test]
async fn test_login_defaults_missing_metadata() {
    let server = MockServer::start().await;
    mount_sign_in(&server, json!({})).await;

    let identity = store(&server).login("ada@example.com", "pw").await.unwrap();

    assert_eq!(identity.name, "Unknown User");
    assert_eq!(identity.role, Role::Creator);
}

#[tokio::test]
async fn test_failed_login_records_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let session = store(&server);
    let result = session.login("ada@example.com", "bad").await;

    assert!(matches!(result, Err(PortalError::Backend(_))));
    assert!(!session.is_authenticated().await);
    assert!(session
        .last_error()
        .await
        .unwrap()
        .contains("Invalid login credentials"));
}

#[tokio::test]
async fn test_sign_up_does_not_sign_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "pw",
            "data": {"name": "Nova", "role": "creator"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-2",
            "email": "new@example.com",
            "user_metadata": {"name": "Nova", "role": "creator"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = store(&server);
    let identity = session
        .sign_up("new@example.com", "pw", "Nova", Role::Creator)
        .await
        .unwrap();

    assert_eq!(identity.id, "user-2");
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn test_logout_clears_state_even_when_remote_fails() {
    let server = MockServer::start().await;
    mount_sign_in(&server, json!({"name": "Ada"})).await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = store(&server);
    session.login("ada@example.com", "pw").await.unwrap();
    session.logout().await;

    assert!(session.current().await.is_none());
    assert!(session.access_token().await.is_none());
    assert!(session.last_error().await.unwrap().contains("boom"));
}

#[tokio::test]
async fn test_restore_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "JWT expired"})))
        .mount(&server)
        .await;

    let session = store(&server);
    assert!(session.restore(None).await.unwrap().is_none());
    assert!(session.restore(Some("stale".into())).await.unwrap().is_none());
    assert!(session.access_token().await.is_none());
}

#[tokio::test]
async fn test_restore_valid_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "ada@example.com",
            "user_metadata": {"name": "Ada", "role": "creator"}
        })))
        .mount(&server)
        .await;

    let session = store(&server);
    let identity = session.restore(Some("persisted".into())).await.unwrap().unwrap();
    assert_eq!(identity.name, "Ada");
    assert!(session.is_authenticated().await);
}

#[tokio::test]
async fn test_update_profile_sends_metadata() {
    let server = MockServer::start().await;
    mount_sign_in(&server, json!({"name": "Ada", "role": "creator"})).await;
    Mock::given(method("PUT"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", "Bearer token-1"))
        .and(body_json(json!({"data": {
            "name": "Ada L",
            "instagram": "@ada",
            "youtube": "",
            "tiktok": "",
            "language": "en"
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "ada@example.com",
            "user_metadata": {"name": "Ada L", "role": "creator", "language": "en"}
        })))
        .mount(&server)
        .await;

    let session = store(&server);
    let profile = ProfileUpdate {
        name: "Ada L".into(),
        instagram: "@ada".into(),
        language: "en".into(),
        ..Default::default()
    };

    assert!(matches!(
        session.update_profile(&profile).await,
        Err(PortalError::NotAuthenticated)
    ));

    session.login("ada@example.com", "pw").await.unwrap();
    let identity = session.update_profile(&profile).await.unwrap();
    assert_eq!(identity.name, "Ada L");
    assert_eq!(session.current().await.unwrap().name, "Ada L");
}

#[tokio::test]
async fn test_password_mismatch_never_reaches_service() {
    let server = MockServer::start().await;
    mount_sign_in(&server, json!({})).await;
    Mock::given(method("PUT"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "user-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = store(&server);
    session.login("ada@example.com", "pw").await.unwrap();

    assert!(matches!(
        session.update_password("new-pw", "other").await,
        Err(PortalError::Validation(ValidationError::PasswordMismatch))
    ));
    session.update_password("new-pw", "new-pw").await.unwrap();
}
