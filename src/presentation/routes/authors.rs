use axum::Router;
use axum::routing::{get, put};

use crate::presentation::AppState;
use crate::presentation::handlers::authors::{
    create_author, delete_author, list_authors, update_author,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route("/{id}", put(update_author).delete(delete_author))
}
