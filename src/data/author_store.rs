use async_trait::async_trait;

use crate::domain::author::Author;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

/// The author collection. `userName` uniqueness is enforced here (unique
/// index in MongoDB, an explicit check in the memory backend), never by the
/// application layer.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn create(&self, input: NewAuthor) -> Result<Author, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Author>, DomainError>;
    async fn list(&self) -> Result<Vec<Author>, DomainError>;
    /// Returns the updated author, or `None` when the id matched nothing.
    async fn update(&self, id: &str, patch: AuthorPatch) -> Result<Option<Author>, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn clear(&self) -> Result<(), DomainError>;
}
