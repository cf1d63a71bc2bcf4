use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;
use super::app_error::ErrorBody;

pub mod authors;
pub mod posts;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/posts", posts::router())
        .nest("/authors", authors::router())
        .fallback(not_found)
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Not Found".to_string(),
        }),
    )
}
