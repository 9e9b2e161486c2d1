use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use menu::model::Dish;
use server::{config::Config, state::State};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const PAYLOAD: &str = r#"{"menu":[
    {"id":1,"title":"Greek Salad","image":"","price":"12.99","description":"","category":"Starters"},
    {"id":2,"title":"Lemon Dessert","image":"","price":"6.00","description":"","category":"Desserts"}
]}"#;

fn test_app(menu_url: String, dir: &TempDir) -> (Router, Arc<State>) {
    let state = State::with_config(Config {
        port: 0,
        menu_url,
        data_dir: dir.path().to_path_buf(),
    });

    (server::app(state.clone()), state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn post_json(app: &Router, uri: &str, body: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

fn titles(body: &[u8]) -> Vec<String> {
    let dishes: Vec<Dish> = serde_json::from_slice(body).unwrap();
    dishes.into_iter().map(|d| d.title).collect()
}

#[tokio::test]
async fn test_menu_syncs_once_and_searches() {
    let remote = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/menu.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAYLOAD))
        .expect(1)
        .mount(&remote)
        .await;

    let dir = TempDir::new().unwrap();
    let (app, _state) = test_app(format!("{}/menu.json", remote.uri()), &dir);

    let (status, body) = get(&app, "/menu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Greek Salad", "Lemon Dessert"]);

    // second request hits the cache, not the remote source
    let (status, body) = get(&app, "/menu?q=lemon").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Lemon Dessert"]);

    let (_, body) = get(&app, "/menu?category=Starters").await;
    assert_eq!(titles(&body), ["Greek Salad"]);
}

#[tokio::test]
async fn test_menu_answers_empty_when_source_is_down() {
    let remote = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/menu.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&remote)
        .await;

    let dir = TempDir::new().unwrap();
    let (app, _state) = test_app(format!("{}/menu.json", remote.uri()), &dir);

    // sync fails, the handler still answers with the (empty) cache
    let (status, body) = get(&app, "/menu").await;
    assert_eq!(status, StatusCode::OK);
    assert!(titles(&body).is_empty());

    // no retry on the next request
    let (status, _) = get(&app, "/menu").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dish_detail() {
    let dir = TempDir::new().unwrap();
    let (app, state) = test_app("http://unused.invalid/menu.json".to_string(), &dir);

    state
        .store
        .replace_all(vec![Dish {
            id: 1,
            title: "Greek Salad".to_string(),
            image: "".to_string(),
            price: "12.99".to_string(),
            description: Some("Crisp and fresh.".to_string()),
            category: Some("Starters".to_string()),
        }])
        .unwrap();

    let (status, body) = get(&app, "/menu/1").await;
    assert_eq!(status, StatusCode::OK);
    let dish: Dish = serde_json::from_slice(&body).unwrap();
    assert_eq!(dish.title, "Greek Salad");
    assert_eq!(dish.price, "12.99");

    let (status, _) = get(&app, "/menu/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_onboarding_round_trip() {
    let dir = TempDir::new().unwrap();
    let (app, _state) = test_app("http://unused.invalid/menu.json".to_string(), &dir);

    let (status, _) = get(&app, "/profile").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let status = post_json(
        &app,
        "/register",
        r#"{"first_name":"Tilly","last_name":"Lemon","email":"tilly@littlelemon.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("tilly@littlelemon.com"));

    let status = post_json(&app, "/logout", "").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/profile").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation() {
    let dir = TempDir::new().unwrap();
    let (app, _state) = test_app("http://unused.invalid/menu.json".to_string(), &dir);

    let status = post_json(
        &app,
        "/register",
        r#"{"first_name":"Tilly","last_name":"Lemon","email":"not-an-email"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = post_json(
        &app,
        "/register",
        r#"{"first_name":"","last_name":"Lemon","email":"tilly@littlelemon.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
