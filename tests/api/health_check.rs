use crate::helpers::spawn_app;

#[actix_web::test]
async fn health_check_works() {
    let test_app = spawn_app().await;

    let response = reqwest::get(&format!("{}/api/health", test_app.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "healthy");
    assert_eq!(body["data"], serde_json::Value::Null);
}

#[actix_web::test]
async fn api_root_returns_a_welcome_message() {
    let test_app = spawn_app().await;

    let response = reqwest::get(&format!("{}/api/", test_app.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to the newsletter subscription API");
}

#[actix_web::test]
async fn home_page_serves_the_embedded_index() {
    let test_app = spawn_app().await;

    let response = reqwest::get(&format!("{}/", test_app.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("Subscribe"));
}

#[actix_web::test]
async fn unknown_static_assets_return_a_404() {
    let test_app = spawn_app().await;

    let response = reqwest::get(&format!("{}/static/nope.txt", test_app.address))
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
}
