use std::collections::HashMap;
use std::sync::atomic::AtomicU64;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::next_id;
use crate::data::author_store::{AuthorPatch, AuthorStore, NewAuthor};
use crate::domain::author::Author;
use crate::domain::error::DomainError;

#[derive(Default)]
pub struct MemoryAuthorStore {
    authors: RwLock<HashMap<String, Author>>,
    sequence: AtomicU64,
}

impl MemoryAuthorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_name_taken(authors: &HashMap<String, Author>, user_name: &str, own_id: &str) -> bool {
    authors
        .values()
        .any(|author| author.user_name == user_name && author.id != own_id)
}

fn duplicate_user_name() -> DomainError {
    DomainError::Validation {
        field: "userName",
        message: "already taken",
    }
}

#[async_trait]
impl AuthorStore for MemoryAuthorStore {
    async fn create(&self, input: NewAuthor) -> Result<Author, DomainError> {
        let mut authors = self.authors.write().await;
        if user_name_taken(&authors, &input.user_name, "") {
            return Err(duplicate_user_name());
        }
        let author = Author {
            id: next_id(&self.sequence),
            first_name: input.first_name,
            last_name: input.last_name,
            user_name: input.user_name,
        };
        authors.insert(author.id.clone(), author.clone());
        Ok(author)
    }

    async fn get(&self, id: &str) -> Result<Option<Author>, DomainError> {
        let authors = self.authors.read().await;
        Ok(authors.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Author>, DomainError> {
        let authors = self.authors.read().await;
        let mut authors: Vec<Author> = authors.values().cloned().collect();
        authors.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(authors)
    }

    async fn update(&self, id: &str, patch: AuthorPatch) -> Result<Option<Author>, DomainError> {
        let mut authors = self.authors.write().await;
        if let Some(user_name) = &patch.user_name
            && user_name_taken(&authors, user_name, id)
        {
            return Err(duplicate_user_name());
        }
        let Some(author) = authors.get_mut(id) else {
            return Ok(None);
        };
        if let Some(first_name) = patch.first_name {
            author.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            author.last_name = last_name;
        }
        if let Some(user_name) = patch.user_name {
            author.user_name = user_name;
        }
        Ok(Some(author.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut authors = self.authors.write().await;
        Ok(authors.remove(id).is_some())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut authors = self.authors.write().await;
        authors.clear();
        Ok(())
    }
}
