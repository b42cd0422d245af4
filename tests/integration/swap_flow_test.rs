//! Swap request submission against the backend.

use assert_matches::assert_matches;
use rewear::client::swap_flow::SUBMIT_FALLBACK;
use rewear::client::{AppView, ClientError, SwapForm};
use rewear::shared::SwapMode;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_points_request_goes_to_dashboard() {
    let server = MockServer::start().await;
    let viewer = user(Uuid::new_v4(), "ada", 80);
    let owner_id = Uuid::new_v4();
    let target = item(Uuid::new_v4(), owner_id, "Denim jacket", 50);
    let swap_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/api/swaps"))
        .and(header("authorization", "Bearer good-token"))
        .and(body_json(json!({
            "item_id": target.id,
            "is_points_request": true,
            "message": "Love it"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(swap_json(
            swap_id, viewer.id, target.id, owner_id, "pending",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = SwapForm::new(target, vec![]);
    form.select_points();
    form.set_message("Love it");

    let session = session(GOOD_TOKEN, viewer);
    let (swap, next) = form.submit(&api_for(&server), &session).await.unwrap();

    assert_eq!(swap.id, swap_id);
    assert_eq!(swap.mode(), SwapMode::Points);
    assert!(swap.is_pending());
    assert_eq!(next, AppView::Dashboard);
    assert!(form.error().is_none());
}

#[tokio::test]
async fn test_offer_request_sends_offered_item() {
    let server = MockServer::start().await;
    let viewer = user(Uuid::new_v4(), "ada", 0);
    let mine = item(Uuid::new_v4(), viewer.id, "Striped scarf", 20);
    let owner_id = Uuid::new_v4();
    let target = item(Uuid::new_v4(), owner_id, "Denim jacket", 50);

    let mut created = swap_json(Uuid::new_v4(), viewer.id, target.id, owner_id, "pending");
    created["is_points_request"] = json!(false);
    created["offered_item_id"] = json!(mine.id);

    Mock::given(method("POST"))
        .and(path("/api/swaps"))
        .and(body_json(json!({
            "item_id": target.id,
            "offered_item_id": mine.id,
            "is_points_request": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(created))
        .expect(1)
        .mount(&server)
        .await;

    let mine_id = mine.id;
    let mut form = SwapForm::new(target, vec![mine]);
    form.choose_offered_item(mine_id).unwrap();

    let (swap, _) = form
        .submit(&api_for(&server), &session(GOOD_TOKEN, viewer))
        .await
        .unwrap();
    assert_eq!(swap.mode(), SwapMode::ItemOffer);
    assert_eq!(swap.offered_item_id, Some(mine_id));
}

#[tokio::test]
async fn test_backend_rejection_keeps_form() {
    let server = MockServer::start().await;
    let viewer = user(Uuid::new_v4(), "ada", 80);
    let target = item(Uuid::new_v4(), Uuid::new_v4(), "Denim jacket", 50);

    Mock::given(method("POST"))
        .and(path("/api/swaps"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "detail": "You already have a pending request for this item" })),
        )
        .mount(&server)
        .await;

    let mut form = SwapForm::new(target, vec![]);
    form.select_points();
    form.set_message("Please?");

    let err = form
        .submit(&api_for(&server), &session(GOOD_TOKEN, viewer))
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Api { .. });
    assert_eq!(form.error(), Some("You already have a pending request for this item"));
    assert_eq!(form.mode(), SwapMode::Points);
    assert_eq!(form.message(), "Please?");
}

#[tokio::test]
async fn test_failure_without_detail_uses_fallback() {
    let server = MockServer::start().await;
    let viewer = user(Uuid::new_v4(), "ada", 80);
    let target = item(Uuid::new_v4(), Uuid::new_v4(), "Denim jacket", 50);

    Mock::given(method("POST"))
        .and(path("/api/swaps"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut form = SwapForm::new(target, vec![]);
    form.select_points();
    assert!(form.submit(&api_for(&server), &session(GOOD_TOKEN, viewer)).await.is_err());
    assert_eq!(form.error(), Some(SUBMIT_FALLBACK));
}

#[tokio::test]
async fn test_blocked_form_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/swaps"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let viewer = user(Uuid::new_v4(), "ada", 10);
    let target = item(Uuid::new_v4(), Uuid::new_v4(), "Denim jacket", 50);
    let mut form = SwapForm::new(target, vec![]);
    form.select_points();

    let err = form
        .submit(&api_for(&server), &session(GOOD_TOKEN, viewer))
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Validation(_));
    assert_eq!(form.error(), Some("Insufficient points"));
}
