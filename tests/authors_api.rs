mod common;

use axum::http::{Method, StatusCode};
use blog_api::data::post_store::PostStore;
use serde_json::{Value, json};

use common::{delete, get, json_request, read_json, send, test_app};

async fn create_author(app: &common::TestApp, user_name: &str) -> Value {
    let payload = json!({
        "firstName": "Sarah",
        "lastName": "Clarke",
        "userName": user_name
    });
    let response = send(&app.router, json_request(Method::POST, "/authors", &payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[tokio::test]
async fn create_author_returns_the_serialized_view() {
    let app = test_app();
    let body = create_author(&app, "sclarke").await;

    assert_eq!(body["name"], "Sarah Clarke");
    assert_eq!(body["userName"], "sclarke");
    assert!(!body["id"].as_str().expect("id must be assigned").is_empty());
    let fields = body.as_object().expect("author must be an object");
    assert_eq!(fields.len(), 3, "view must hide the stored name parts");
}

#[tokio::test]
async fn create_author_checks_required_fields_in_order() {
    let app = test_app();

    let response = send(
        &app.router,
        json_request(Method::POST, "/authors", &json!({"lastName": "Clarke"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .expect("message must be set")
            .contains("firstName")
    );
}

#[tokio::test]
async fn duplicate_user_name_is_rejected() {
    let app = test_app();
    create_author(&app, "sclarke").await;

    let payload = json!({
        "firstName": "Sam",
        "lastName": "Clarke",
        "userName": "sclarke"
    });
    let response = send(&app.router, json_request(Method::POST, "/authors", &payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .expect("message must be set")
            .contains("userName")
    );
}

#[tokio::test]
async fn list_returns_all_authors() {
    let app = test_app();
    create_author(&app, "a_author").await;
    create_author(&app, "b_author").await;

    let response = send(&app.router, get("/authors")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.as_array().expect("array").len(), 2);
}

#[tokio::test]
async fn update_author_applies_partial_patch() {
    let app = test_app();
    let author = create_author(&app, "sclarke").await;
    let id = author["id"].as_str().expect("id");

    let payload = json!({"id": id, "firstName": "Sally"});
    let response = send(
        &app.router,
        json_request(Method::PUT, &format!("/authors/{id}"), &payload),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["name"], "Sally Clarke");
    assert_eq!(body["userName"], "sclarke");
}

#[tokio::test]
async fn update_author_with_mismatched_ids_returns_400() {
    let app = test_app();
    let author = create_author(&app, "sclarke").await;
    let id = author["id"].as_str().expect("id");

    let payload = json!({"id": "ffffffffffffffffffffffff", "firstName": "Sally"});
    let response = send(
        &app.router,
        json_request(Method::PUT, &format!("/authors/{id}"), &payload),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn post_created_with_author_reference_resolves_the_name() {
    let app = test_app();
    let author = create_author(&app, "sclarke").await;
    let author_id = author["id"].as_str().expect("id");

    let payload = json!({
        "title": "referenced",
        "content": "resolved at read time",
        "author": author_id
    });
    let response = send(&app.router, json_request(Method::POST, "/posts", &payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["author"], "Sarah Clarke");

    let id = body["id"].as_str().expect("id");
    let fetched = read_json(send(&app.router, get(&format!("/posts/{id}"))).await).await;
    assert_eq!(fetched["author"], "Sarah Clarke");
}

#[tokio::test]
async fn post_referencing_unknown_author_is_rejected() {
    let app = test_app();

    let payload = json!({
        "title": "t",
        "content": "c",
        "author": "ffffffffffffffffffffffff"
    });
    let response = send(&app.router, json_request(Method::POST, "/posts", &payload)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_an_author_cascades_to_their_posts() {
    let app = test_app();
    let author = create_author(&app, "sclarke").await;
    let author_id = author["id"].as_str().expect("id");

    let payload = json!({
        "title": "doomed",
        "content": "goes with its author",
        "author": author_id
    });
    let response = send(&app.router, json_request(Method::POST, "/posts", &payload)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(&app.router, delete(&format!("/authors/{author_id}"))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(app.posts.count().await.expect("count"), 0);
    let authors = read_json(send(&app.router, get("/authors")).await).await;
    assert!(authors.as_array().expect("array").is_empty());
}
