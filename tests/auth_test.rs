use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zenmotion_rust::prelude::*;
use zenmotion_rust::storage::{FileSessionStore, MemorySessionStore, SessionStore, StoredUser};

fn options(server: &MockServer) -> ClientOptions {
    ClientOptions::default().with_base_url(&format!("{}/api", server.uri()))
}

fn new_user() -> NewUser {
    NewUser {
        name: "Sarah".to_string(),
        email: "sarah@example.com".to_string(),
        password: "secret".to_string(),
        birth_date: "1994-05-02".to_string(),
        gender: Gender::Female,
        height_cm: 168.0,
        weight_kg: 62.4,
    }
}

fn created_user() -> serde_json::Value {
    json!({
        "id": 12,
        "name": "Sarah",
        "email": "sarah@example.com",
        "birth_date": "1994-05-02",
        "gender": "F",
        "height_cm": "168.00",
        "weight_kg": "62.40"
    })
}

async fn mount_login(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_json(json!({"email": "sarah@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_creates_and_persists_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("state").join("session.json");
    let zen = ZenMotion::new_with_options(options(&server).with_session_file(&file)).unwrap();

    mount_login(&server, json!({"id": 12, "name": "Sarah", "email": "sarah@example.com"})).await;

    assert!(!zen.auth().is_authenticated());
    let session = zen.auth().login("sarah@example.com", "secret").await.unwrap();
    assert_eq!(session.user_id, 12);
    assert_eq!(session.payload["name"], "Sarah");
    assert!(zen.auth().is_authenticated());
    assert_eq!(zen.auth().require_user_id().unwrap(), 12);

    // the file holds the user blob as a JSON string under "user"
    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&file).unwrap()).unwrap();
    let blob: serde_json::Value = serde_json::from_str(raw["user"].as_str().unwrap()).unwrap();
    assert_eq!(blob["user_id"], 12);
    assert_eq!(blob["email"], "sarah@example.com");
}

#[tokio::test]
async fn test_login_reads_nested_user_id() {
    let server = MockServer::start().await;
    let zen = ZenMotion::new_with_options(options(&server)).unwrap();

    mount_login(&server, json!({"message": "ok", "user": {"id": "31"}})).await;

    let session = zen.auth().login("sarah@example.com", "secret").await.unwrap();
    assert_eq!(session.user_id, 31);
}

#[tokio::test]
async fn test_login_without_user_id_fails() {
    let server = MockServer::start().await;
    let zen = ZenMotion::new_with_options(options(&server)).unwrap();

    mount_login(&server, json!({"message": "ok"})).await;

    let err = zen.auth().login("sarah@example.com", "secret").await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert!(!zen.auth().is_authenticated());
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    let zen = ZenMotion::new_with_options(options(&server)).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let err = zen.auth().login("sarah@example.com", "wrong").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(zen.auth().session().is_none());
}

#[tokio::test]
async fn test_restore_resumes_stored_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let first = ZenMotion::new_with_options(options(&server).with_session_file(&file)).unwrap();
    mount_login(&server, json!({"id": 12, "name": "Sarah"})).await;
    first.auth().login("sarah@example.com", "secret").await.unwrap();

    let second = ZenMotion::new_with_options(options(&server).with_session_file(&file)).unwrap();
    assert!(!second.auth().is_authenticated());
    let restored = second.auth().restore().await.unwrap().unwrap();
    assert_eq!(restored.user_id, 12);
    assert_eq!(restored.payload["name"], "Sarah");
    assert!(second.auth().is_authenticated());
}

#[tokio::test]
async fn test_restore_ignores_corrupt_store() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    std::fs::write(&file, "{not json").unwrap();

    let zen = ZenMotion::new_with_options(
        ClientOptions::default().with_session_file(&file),
    )
    .unwrap();
    assert_eq!(zen.auth().restore().await.unwrap(), None);

    std::fs::write(&file, r#"{"user": "{\"name\": \"no id\"}"}"#).unwrap();
    assert_eq!(zen.auth().restore().await.unwrap(), None);
}

#[tokio::test]
async fn test_logout_clears_session_without_requests() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());
    let zen = ZenMotion::with_store(options(&server), store.clone()).unwrap();

    mount_login(&server, json!({"user_id": 12})).await;
    zen.auth().login("sarah@example.com", "secret").await.unwrap();
    assert!(store.load().await.unwrap().is_some());

    zen.auth().logout().await.unwrap();
    assert!(!zen.auth().is_authenticated());
    assert_eq!(store.load().await.unwrap(), None);

    // a second logout is a no-op
    zen.auth().logout().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_register_creates_default_preferences() {
    let server = MockServer::start().await;
    let zen = ZenMotion::new_with_options(options(&server)).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_user()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/user_preferences"))
        .and(body_json(json!({
            "user": 12,
            "daily_step_goal": 10000,
            "daily_calorie_goal": 2000.0,
            "preferred_units": "metric",
            "notifications_enabled": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 3,
            "user": 12,
            "daily_step_goal": 10000,
            "daily_calorie_goal": "2000.00",
            "preferred_units": "metric",
            "notifications_enabled": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registration = zen.auth().register(&new_user()).await.unwrap();
    assert_eq!(registration.user.id, 12);
    assert_eq!(registration.user.height_cm, Some(168.0));
    assert_eq!(registration.preferences.unwrap().daily_step_goal, 10000);
    assert!(!zen.auth().is_authenticated());
}

#[tokio::test]
async fn test_register_survives_preferences_failure() {
    let server = MockServer::start().await;
    let zen = ZenMotion::new_with_options(options(&server)).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/user"))
        .respond_with(ResponseTemplate::new(201).set_body_json(created_user()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/user_preferences"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let registration = zen.auth().register(&new_user()).await.unwrap();
    assert_eq!(registration.user.id, 12);
    assert!(registration.preferences.is_none());
}

#[tokio::test]
async fn test_delete_account_logs_out() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());
    store.save(&StoredUser::new(12)).await.unwrap();
    let zen = ZenMotion::with_store(options(&server), store.clone()).unwrap();
    zen.auth().restore().await.unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/user/id/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    zen.auth().delete_account().await.unwrap();
    assert!(!zen.auth().is_authenticated());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_account_requires_session() {
    let zen = ZenMotion::new("http://localhost:8000/api").unwrap();
    let err = zen.auth().delete_account().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("nested").join("store.json"));

    assert_eq!(store.load().await.unwrap(), None);
    store.save(&StoredUser::new(5)).await.unwrap();
    assert_eq!(store.load().await.unwrap().map(|u| u.user_id), Some(5));
    store.clear().await.unwrap();
    assert_eq!(store.load().await.unwrap(), None);
}

/// Holds a user but cannot forget it
struct StuckStore {
    inner: MemorySessionStore,
}

#[async_trait::async_trait]
impl SessionStore for StuckStore {
    async fn load(&self) -> zenmotion_rust::error::Result<Option<StoredUser>> {
        self.inner.load().await
    }

    async fn save(&self, user: &StoredUser) -> zenmotion_rust::error::Result<()> {
        self.inner.save(user).await
    }

    async fn clear(&self) -> zenmotion_rust::error::Result<()> {
        Err(Error::storage("disk full"))
    }
}

#[tokio::test]
async fn test_failed_logout_keeps_session() {
    let store = Arc::new(StuckStore {
        inner: MemorySessionStore::new(),
    });
    store.save(&StoredUser::new(12)).await.unwrap();
    let zen = ZenMotion::with_store(ClientOptions::default(), store.clone()).unwrap();
    zen.auth().restore().await.unwrap();

    let err = zen.auth().logout().await.unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(zen.auth().require_user_id().unwrap(), 12);
    assert_eq!(store.load().await.unwrap().map(|u| u.user_id), Some(12));
}

#[tokio::test]
async fn test_failed_delete_account_logout_keeps_session() {
    let server = MockServer::start().await;
    let store = Arc::new(StuckStore {
        inner: MemorySessionStore::new(),
    });
    store.save(&StoredUser::new(12)).await.unwrap();
    let zen = ZenMotion::with_store(options(&server), store).unwrap();
    zen.auth().restore().await.unwrap();

    Mock::given(method("DELETE"))
        .and(path("/api/user/id/12"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(zen.auth().delete_account().await.is_err());
    assert!(zen.auth().is_authenticated());
}

#[tokio::test]
async fn test_login_with_trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    let mut opts = options(&server);
    opts.base_url = format!("{}/api/", server.uri());
    let zen = ZenMotion::new_with_options(opts).unwrap();

    mount_login(&server, json!({"id": 12})).await;

    let session = zen.auth().login("sarah@example.com", "secret").await.unwrap();
    assert_eq!(session.user_id, 12);
}
