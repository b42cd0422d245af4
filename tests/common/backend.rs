//! Stateful fake of the item endpoints.
//!
//! `POST /api/items` stores the listing under a fresh id owned by the caller;
//! `GET /api/items/{id}` and `GET /api/my-items` read it back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rewear::shared::marketplace::CreateItemRequest;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[derive(Clone)]
pub struct FakeItemBackend {
    owner_id: Uuid,
    items: Arc<Mutex<HashMap<Uuid, Value>>>,
}

impl FakeItemBackend {
    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Mount the item routes on `server`
    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/items"))
            .respond_with(self.clone())
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/my-items"))
            .respond_with(self.clone())
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/items/[0-9a-f-]{36}$"))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }

    fn create(&self, request: &Request) -> ResponseTemplate {
        let body: CreateItemRequest = match request.body_json() {
            Ok(body) => body,
            Err(e) => {
                return ResponseTemplate::new(422)
                    .set_body_json(json!({ "detail": [{ "msg": e.to_string() }] }))
            }
        };

        let id = Uuid::new_v4();
        let stored = json!({
            "id": id,
            "title": body.title,
            "description": body.description,
            "category": body.category,
            "size": body.size,
            "condition": body.condition,
            "tags": body.tags,
            "images": [],
            "owner_id": self.owner_id,
            "price_points": body.price_points,
            "available": true,
            "created_at": "2024-05-04T08:00:00"
        });
        self.items.lock().unwrap().insert(id, stored.clone());
        ResponseTemplate::new(200).set_body_json(stored)
    }

    fn fetch(&self, id: &str) -> ResponseTemplate {
        let found = Uuid::parse_str(id)
            .ok()
            .and_then(|id| self.items.lock().unwrap().get(&id).cloned());
        match found {
            Some(item) => {
                let mut item = item;
                item["owner_username"] = json!("lister");
                ResponseTemplate::new(200).set_body_json(item)
            }
            None => ResponseTemplate::new(404).set_body_json(json!({ "detail": "Item not found" })),
        }
    }
}

impl Respond for FakeItemBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let route = request.url.path();
        match (request.method.as_str(), route) {
            ("POST", "/api/items") => self.create(request),
            ("GET", "/api/my-items") => {
                let items: Vec<Value> = self.items.lock().unwrap().values().cloned().collect();
                ResponseTemplate::new(200).set_body_json(items)
            }
            ("GET", route) => self.fetch(route.trim_start_matches("/api/items/")),
            _ => ResponseTemplate::new(405),
        }
    }
}
