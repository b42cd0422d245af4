//! Catalogue reads: featured, browse and item detail.

use rewear::client::catalogue::{self, ItemDetail, FEATURED_LIMIT};
use rewear::client::{Page, SubmitBlocker};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_featured_asks_for_six() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", FEATURED_LIMIT.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            item_json(Uuid::new_v4(), Uuid::new_v4(), "Linen shirt", 30)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items = catalogue::featured(&api_for(&server)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].owner_display(), "owner");
}

#[tokio::test]
async fn test_browse_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(query_param("skip", "20"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let items = catalogue::browse(&api_for(&server), Page::default().next())
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_detail_without_session_has_no_form() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/items/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json(id, Uuid::new_v4(), "Boots", 40)))
        .mount(&server)
        .await;

    let detail = ItemDetail::load(&api_for(&server), id, None).await.unwrap();
    assert_eq!(detail.item.title, "Boots");
    assert!(detail.swap_form.is_none());
    assert!(!detail.is_own(None));
}

#[tokio::test]
async fn test_detail_offers_viewer_items() {
    let server = MockServer::start().await;
    let viewer = user(Uuid::new_v4(), "ada", 10);
    let target = Uuid::new_v4();
    let mine = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/items/{}", target)))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json(target, Uuid::new_v4(), "Boots", 40)))
        .mount(&server)
        .await;
    let mut swapped = item_json(Uuid::new_v4(), viewer.id, "Old hat", 5);
    swapped["available"] = json!(false);
    Mock::given(method("GET"))
        .and(path("/api/my-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            item_json(mine, viewer.id, "Scarf", 20),
            swapped
        ])))
        .mount(&server)
        .await;

    let session = session(GOOD_TOKEN, viewer.clone());
    let detail = ItemDetail::load(&api_for(&server), target, Some(&session)).await.unwrap();
    let mut form = detail.swap_form.unwrap();

    assert_eq!(form.offerable().len(), 1);
    form.select_points();
    assert_eq!(
        form.blocker(&viewer),
        Some(SubmitBlocker::InsufficientPoints { price: 40, balance: 10, missing: 30 })
    );
    form.choose_offered_item(mine).unwrap();
    assert!(form.can_submit(&viewer));
}

#[tokio::test]
async fn test_detail_survives_my_items_failure() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/items/{}", id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(item_json(id, Uuid::new_v4(), "Boots", 40)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/my-items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = session(GOOD_TOKEN, user(Uuid::new_v4(), "ada", 100));
    let detail = ItemDetail::load(&api_for(&server), id, Some(&session)).await.unwrap();
    assert!(detail.swap_form.unwrap().offerable().is_empty());
}

#[tokio::test]
async fn test_closet_lists_one_user() {
    let server = MockServer::start().await;
    let owner = Uuid::new_v4();
    let mut gone = item_json(Uuid::new_v4(), owner, "Old hat", 5);
    gone["available"] = json!(false);
    Mock::given(method("GET"))
        .and(path(format!("/api/items/user/{}", owner)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            item_json(Uuid::new_v4(), owner, "Scarf", 20),
            gone
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let items = catalogue::closet(&api_for(&server), owner).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item.is_owned_by(owner)));
    assert!(!items[1].available);
}
