//! Listing flow: create, upload images, read the listing back.

use assert_matches::assert_matches;
use rewear::client::catalogue::ItemDetail;
use rewear::client::{AppView, ClientError, ErrorKind, ImageUpload, ListingForm};
use rewear::shared::{ItemCategory, ItemCondition};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{header, header_regex, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

fn form() -> ListingForm {
    ListingForm {
        title: "Wool coat".to_string(),
        description: "Warm, barely worn".to_string(),
        category: ItemCategory::Outerwear,
        size: "L".to_string(),
        condition: ItemCondition::Excellent,
        tags: "wool, winter".to_string(),
        price_points: 75,
        images: vec![],
    }
}

#[tokio::test]
async fn test_created_listing_reads_back() {
    let server = MockServer::start().await;
    let me = user(Uuid::new_v4(), "ada", 0);
    let backend = FakeItemBackend::new(me.id);
    backend.mount(&server).await;

    let api = api_for(&server);
    let session = session(GOOD_TOKEN, me.clone());
    let (created, next) = form().submit(&api, &session).await.unwrap();

    assert_eq!(next, AppView::Dashboard);
    assert_eq!(backend.len(), 1);
    assert!(created.is_owned_by(me.id));

    let fetched = api.get_item(created.id).await.unwrap();
    assert_eq!(fetched.title, "Wool coat");
    assert_eq!(fetched.description, "Warm, barely worn");
    assert_eq!(fetched.category, ItemCategory::Outerwear);
    assert_eq!(fetched.size, "L");
    assert_eq!(fetched.condition, ItemCondition::Excellent);
    assert_eq!(fetched.tags, vec!["wool", "winter"]);
    assert_eq!(fetched.price_points, 75);
    assert_eq!(fetched.owner_id, me.id);
    assert!(fetched.available);

    let mine = api.my_items(session.credential()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, created.id);

    let detail = ItemDetail::load(&api, created.id, Some(&session)).await.unwrap();
    assert!(detail.is_own(Some(&session)));
}

#[tokio::test]
async fn test_images_uploaded_in_order() {
    let server = MockServer::start().await;
    let me = user(Uuid::new_v4(), "ada", 0);
    FakeItemBackend::new(me.id).mount(&server).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/api/items/[0-9a-f-]{36}/upload-image$"))
        .and(header("authorization", "Bearer good-token"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "image_url": "/uploads/front.jpg" })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path_regex(r"^/api/items/[0-9a-f-]{36}/upload-image$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "image_url": "/uploads/back.jpg" })))
        .mount(&server)
        .await;

    let mut form = form();
    form.images = vec![
        ImageUpload::new("front.jpg", "image/jpeg", vec![0xFF, 0xD8]).unwrap(),
        ImageUpload::new("back.jpg", "image/jpeg", vec![0xFF, 0xD8]).unwrap(),
    ];

    let (item, _) = form
        .submit(&api_for(&server), &session(GOOD_TOKEN, me))
        .await
        .unwrap();
    assert_eq!(item.images, vec!["/uploads/front.jpg", "/uploads/back.jpg"]);
}

#[tokio::test]
async fn test_upload_failure_is_reported() {
    let server = MockServer::start().await;
    let me = user(Uuid::new_v4(), "ada", 0);
    let backend = FakeItemBackend::new(me.id);
    backend.mount(&server).await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/api/items/[0-9a-f-]{36}/upload-image$"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "File must be an image" })))
        .mount(&server)
        .await;

    let mut form = form();
    form.images = vec![ImageUpload::new("front.jpg", "image/jpeg", vec![1]).unwrap()];

    let err = form
        .submit(&api_for(&server), &session(GOOD_TOKEN, me))
        .await
        .unwrap_err();
    assert_eq!(err.detail(), Some("File must be an image"));
    assert_ne!(err.kind(), ErrorKind::Local);
    // The item itself was created before the upload failed
    assert_eq!(backend.len(), 1);
}

#[tokio::test]
async fn test_invalid_form_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = form();
    form.title.clear();
    let err = form
        .submit(&api_for(&server), &session(GOOD_TOKEN, user(Uuid::new_v4(), "ada", 0)))
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let server = MockServer::start().await;
    FakeItemBackend::new(Uuid::new_v4()).mount(&server).await;

    let err = api_for(&server).get_item(Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status, .. } if status.as_u16() == 404);
    assert_eq!(err.detail(), Some("Item not found"));
}
