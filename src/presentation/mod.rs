use std::sync::Arc;

use crate::application::{AuthorService, PostService};
use crate::data::author_store::AuthorStore;
use crate::data::post_store::PostStore;

pub mod app_error;
pub mod handlers;
pub mod middleware;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService>,
    pub author_service: Arc<AuthorService>,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostStore>, authors: Arc<dyn AuthorStore>) -> Self {
        Self {
            post_service: Arc::new(PostService::new(posts.clone(), authors.clone())),
            author_service: Arc::new(AuthorService::new(authors, posts)),
        }
    }
}
