#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use chrono::Utc;
use http_body_util::BodyExt;
use rand::Rng;
use serde_json::Value;
use tower::ServiceExt;

use blog_api::data::post_store::{NewPost, PostStore};
use blog_api::data::stores::memory::{MemoryAuthorStore, MemoryPostStore};
use blog_api::domain::post::PostAuthor;
use blog_api::presentation::{AppState, routes};

pub struct TestApp {
    pub router: Router,
    pub posts: Arc<MemoryPostStore>,
    pub authors: Arc<MemoryAuthorStore>,
}

/// The real router over hermetic in-memory stores; each test gets a fresh
/// one, so there is no cross-test state.
pub fn test_app() -> TestApp {
    let posts = Arc::new(MemoryPostStore::new());
    let authors = Arc::new(MemoryAuthorStore::new());
    let state = AppState::new(posts.clone(), authors.clone());
    TestApp {
        router: routes::router(state),
        posts,
        authors,
    }
}

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "tempor",
];
const FIRST_NAMES: &[&str] = &["Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald"];
const LAST_NAMES: &[&str] = &["Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth"];

fn pick(words: &[&str]) -> String {
    let index = rand::rng().random_range(0..words.len());
    words[index].to_string()
}

pub fn generate_post_data() -> NewPost {
    NewPost {
        title: format!("{} {} {}", pick(WORDS), pick(WORDS), pick(WORDS)),
        content: format!("{} {} {} {}", pick(WORDS), pick(WORDS), pick(WORDS), pick(WORDS)),
        author: PostAuthor::Embedded {
            first_name: pick(FIRST_NAMES),
            last_name: pick(LAST_NAMES),
        },
        created: Utc::now(),
    }
}

pub async fn seed_posts(app: &TestApp, count: usize) -> Vec<String> {
    let inputs = (0..count).map(|_| generate_post_data()).collect();
    app.posts
        .insert_many(inputs)
        .await
        .expect("seeding must succeed")
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("request must produce a response")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request must build")
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .expect("request must build")
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request must build")
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = read_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body must be JSON")
}

pub async fn read_bytes(response: Response<Body>) -> axum::body::Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("body must be readable")
        .to_bytes()
}
