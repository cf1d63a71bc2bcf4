use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostAuthor};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created: DateTime<Utc>,
}

/// Partial update: only fields that are `Some` are written.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<PostAuthor>,
}

/// The post collection of the external document store. Implementations own
/// id assignment; a malformed id surfaces as `DomainError::Store`.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Post>, DomainError>;
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    /// Returns whether a document matched the id.
    async fn update(&self, id: &str, patch: PostPatch) -> Result<bool, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn delete_by_author(&self, author_id: &str) -> Result<u64, DomainError>;
    /// Bulk seeding; returns the assigned ids in input order.
    async fn insert_many(&self, inputs: Vec<NewPost>) -> Result<Vec<String>, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    /// Full-collection drop, test teardown only.
    async fn clear(&self) -> Result<(), DomainError>;
}
