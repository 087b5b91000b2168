//! Integration tests for the file-backed session store and login flow.

use serde_json::json;
use tempfile::TempDir;
use usernest::api::{ApiClient, LoginRequest};
use usernest::auth::{self, AuthError};
use usernest::config::Config;
use usernest::session::{FileSessionStore, Session, SessionStore};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "kari@noroff.no".to_string(),
        password: "secret123".to_string(),
    }
}

#[tokio::test]
async fn test_missing_file_loads_anonymous() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileSessionStore::new(dir.path().join("session.toml"));

    let session = store.load().await.expect("load failed");
    assert!(!session.is_authenticated());
    assert!(session.viewer_id().is_err());
}

#[tokio::test]
async fn test_save_load_clear() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("session.toml");
    let store = FileSessionStore::new(&path);

    let session = Session::new("jwt-123", Some("kari@noroff.no".to_string()));
    store.save(&session).await.expect("save failed");

    let contents = std::fs::read_to_string(&path).expect("session file missing");
    assert!(contents.contains("jwt_token = \"jwt-123\""));
    assert!(contents.contains("user_email = \"kari@noroff.no\""));

    assert_eq!(store.load().await.expect("load failed"), session);

    store.clear().await.expect("clear failed");
    assert!(!path.exists());
    // Clearing twice is fine.
    store.clear().await.expect("second clear failed");
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.toml");
    std::fs::write(&path, "jwt_token = [").unwrap();

    let store = FileSessionStore::new(&path);
    assert!(store.load().await.is_err());
}

#[tokio::test]
async fn test_login_persists_token_and_email() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/social/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "kari",
            "email": "kari@noroff.no",
            "accessToken": "jwt-abc"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileSessionStore::new(dir.path().join("session.toml"));
    let api = ApiClient::new(&Config::for_testing(&server.uri())).unwrap();

    let session = auth::login(&api, &store, &credentials()).await.expect("login failed");
    assert_eq!(session.token(), Some("jwt-abc"));

    let stored = store.load().await.unwrap();
    assert_eq!(stored.token(), Some("jwt-abc"));
    assert_eq!(stored.viewer_id().unwrap(), "kari@noroff.no");
}

#[tokio::test]
async fn test_login_without_email_stores_token_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/social/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "jwt-xyz"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.toml");
    let store = FileSessionStore::new(&path);
    let api = ApiClient::new(&Config::for_testing(&server.uri())).unwrap();

    auth::login(&api, &store, &credentials()).await.expect("login failed");

    let stored = store.load().await.unwrap();
    assert_eq!(stored.token(), Some("jwt-xyz"));
    assert!(stored.email().is_none());
    assert!(!std::fs::read_to_string(&path).unwrap().contains("user_email"));
}

#[tokio::test]
async fn test_login_without_token_stores_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/social/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "kari"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("session.toml");
    let store = FileSessionStore::new(&path);
    let api = ApiClient::new(&Config::for_testing(&server.uri())).unwrap();

    let err = auth::login(&api, &store, &credentials()).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingAccessToken));
    assert_eq!(err.to_string(), "Login failed.");
    assert!(!path.exists());
}

#[tokio::test]
async fn test_login_rejected_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/social/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"message": "Invalid email or password"}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = FileSessionStore::new(dir.path().join("session.toml"));
    let api = ApiClient::new(&Config::for_testing(&server.uri())).unwrap();

    let err = auth::login(&api, &store, &credentials()).await.unwrap_err();
    assert!(err.to_string().contains("Invalid email or password"));
}
