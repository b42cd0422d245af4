//! Fixtures and helpers for tests against a mock backend

use rewear::client::credential_store::MemoryCredentialStore;
use rewear::client::{ApiClient, Config, Credential, Session, SessionManager};
use rewear::shared::{AppConfig, Item, UserProfile};
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GOOD_TOKEN: &str = "good-token";
pub const STALE_TOKEN: &str = "stale-token";

/// Config pointing at the mock server with the default `/api` prefix
pub fn config_for(server: &MockServer) -> Config {
    Config::with_builder(AppConfig::builder().server_url(server.uri())).unwrap()
}

pub fn api_for(server: &MockServer) -> ApiClient {
    ApiClient::new(config_for(server))
}

pub fn manager_for(server: &MockServer) -> SessionManager<MemoryCredentialStore> {
    SessionManager::new(api_for(server), MemoryCredentialStore::new())
}

/// Manager whose store already holds `token`, as after an earlier run
pub fn manager_with_token(server: &MockServer, token: &str) -> SessionManager<MemoryCredentialStore> {
    SessionManager::new(
        api_for(server),
        MemoryCredentialStore::with_credential(Credential::new(token)),
    )
}

pub fn user_json(id: Uuid, username: &str, points: i64) -> Value {
    json!({
        "id": id,
        "email": format!("{}@example.com", username),
        "username": username,
        "points": points,
        "created_at": "2024-05-01T10:00:00.123456"
    })
}

pub fn user(id: Uuid, username: &str, points: i64) -> UserProfile {
    serde_json::from_value(user_json(id, username, points)).unwrap()
}

pub fn session(token: &str, identity: UserProfile) -> Session {
    Session::new(Credential::new(token), identity)
}

pub fn item_json(id: Uuid, owner_id: Uuid, title: &str, price_points: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} in good shape", title),
        "category": "tops",
        "size": "M",
        "condition": "good",
        "tags": ["cotton"],
        "images": [],
        "owner_id": owner_id,
        "owner_username": "owner",
        "price_points": price_points,
        "available": true,
        "created_at": "2024-05-02T09:30:00"
    })
}

pub fn item(id: Uuid, owner_id: Uuid, title: &str, price_points: i64) -> Item {
    serde_json::from_value(item_json(id, owner_id, title, price_points)).unwrap()
}

pub fn swap_json(id: Uuid, requester_id: Uuid, item_id: Uuid, owner_id: Uuid, status: &str) -> Value {
    json!({
        "id": id,
        "requester_id": requester_id,
        "item_id": item_id,
        "owner_id": owner_id,
        "offered_item_id": null,
        "is_points_request": true,
        "status": status,
        "message": "Still available?",
        "created_at": "2024-05-03T12:00:00",
        "item_title": "Denim jacket",
        "requester_username": "requester",
        "owner_username": "owner"
    })
}

/// `GET /api/auth/me` answering `token` with `identity`
pub async fn mount_me(server: &MockServer, token: &str, identity: Value) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(identity))
        .mount(server)
        .await;
}

/// `GET /api/auth/me` refusing `token`
pub async fn mount_me_rejected(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Could not validate credentials" })),
        )
        .mount(server)
        .await;
}
