use crate::helpers::spawn_app;
use serde_json::json;

#[actix_web::test]
async fn confirmations_without_token_are_rejected_with_400() {
    // Prepare
    let test_app = spawn_app().await;

    // Test
    let response = reqwest::get(&format!("{}/api/confirm", test_app.address))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn a_fabricated_token_is_rejected_with_404() {
    let test_app = spawn_app().await;

    let response = test_app.get_confirm("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn the_issued_token_confirms_the_subscription() {
    // Prepare
    let test_app = spawn_app().await;
    test_app.post_create(json!({"email": "a@b.com"})).await;
    let token = test_app.delivery.tokens().pop().unwrap();

    // Test
    let response = test_app.get_confirm(&token).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "a@b.com is now subscribed");
}

#[actix_web::test]
async fn a_confirmed_token_is_removed_from_the_store() {
    let test_app = spawn_app().await;
    test_app.post_create(json!({"email": "a@b.com"})).await;
    let token = test_app.delivery.tokens().pop().unwrap();

    test_app.get_confirm(&token).await;

    assert!(test_app.store.pending_keys().await.is_empty());
}

#[actix_web::test]
async fn a_token_cannot_be_used_twice() {
    // Prepare
    let test_app = spawn_app().await;
    test_app.post_create(json!({"email": "a@b.com"})).await;
    let token = test_app.delivery.tokens().pop().unwrap();

    // First confirmation succeeds.
    let first = test_app.get_confirm(&token).await;
    assert_eq!(first.status().as_u16(), 200);

    // The replay answers exactly like an unknown token.
    let second = test_app.get_confirm(&token).await;
    assert_eq!(second.status().as_u16(), 404);
}
