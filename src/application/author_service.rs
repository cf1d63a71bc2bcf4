use std::sync::Arc;

use crate::data::author_store::{AuthorPatch, AuthorStore, NewAuthor};
use crate::data::post_store::PostStore;
use crate::domain::author::{Author, CreateAuthorRequest, UpdateAuthorRequest};
use crate::domain::error::DomainError;

pub struct AuthorService {
    authors: Arc<dyn AuthorStore>,
    posts: Arc<dyn PostStore>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { authors, posts }
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>, DomainError> {
        self.authors.list().await
    }

    pub async fn create_author(&self, req: CreateAuthorRequest) -> Result<Author, DomainError> {
        let draft = req.validate()?;
        self.authors
            .create(NewAuthor {
                first_name: draft.first_name,
                last_name: draft.last_name,
                user_name: draft.user_name,
            })
            .await
    }

    pub async fn update_author(
        &self,
        id: &str,
        req: UpdateAuthorRequest,
    ) -> Result<Author, DomainError> {
        let patch = req.validate()?;
        self.authors
            .update(
                id,
                AuthorPatch {
                    first_name: patch.first_name,
                    last_name: patch.last_name,
                    user_name: patch.user_name,
                },
            )
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("author {id}")))
    }

    /// Cascade: the author's posts go first, then the author, so no post is
    /// ever left with a dangling reference.
    pub async fn delete_author(&self, id: &str) -> Result<(), DomainError> {
        self.posts.delete_by_author(id).await?;
        self.authors.delete(id).await?;
        Ok(())
    }
}
