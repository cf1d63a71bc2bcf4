use std::sync::Arc;

use crate::data::author_store::AuthorStore;
use crate::data::post_store::{NewPost, PostPatch, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, PostAuthor, UpdatePostRequest};

pub struct PostService {
    posts: Arc<dyn PostStore>,
    authors: Arc<dyn AuthorStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, authors: Arc<dyn AuthorStore>) -> Self {
        Self { posts, authors }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.list().await?;
        let mut resolved = Vec::with_capacity(posts.len());
        for post in posts {
            resolved.push(self.resolve_author(post).await?);
        }
        Ok(resolved)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        let post = self
            .posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post {id}")))?;
        self.resolve_author(post).await
    }

    pub async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let draft = req.validate()?;
        self.check_reference(&draft.author).await?;

        let post = self
            .posts
            .create(NewPost {
                title: draft.title,
                content: draft.content,
                author: draft.author,
                created: draft.created,
            })
            .await?;
        self.resolve_author(post).await
    }

    /// Applies whichever whitelisted fields the patch carries. A missing id
    /// is not distinguished from a matched one; both yield success.
    pub async fn update_post(&self, id: &str, req: UpdatePostRequest) -> Result<(), DomainError> {
        let patch = req.validate()?;
        if let Some(author) = &patch.author {
            self.check_reference(author).await?;
        }

        self.posts
            .update(
                id,
                PostPatch {
                    title: patch.title,
                    content: patch.content,
                    author: patch.author,
                },
            )
            .await?;
        Ok(())
    }

    /// Idempotent: deleting an id that no longer exists is still a success.
    pub async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        self.posts.delete(id).await?;
        Ok(())
    }

    /// Two-step read: a referenced author is fetched and joined into the
    /// post before anything gets serialized.
    async fn resolve_author(&self, mut post: Post) -> Result<Post, DomainError> {
        if let PostAuthor::Reference(author_id) = &post.author {
            let author = self.authors.get(author_id).await?.ok_or_else(|| {
                DomainError::Store(format!(
                    "post {} references missing author {author_id}",
                    post.id
                ))
            })?;
            post.author = PostAuthor::Embedded {
                first_name: author.first_name,
                last_name: author.last_name,
            };
        }
        Ok(post)
    }

    async fn check_reference(&self, author: &PostAuthor) -> Result<(), DomainError> {
        if let PostAuthor::Reference(author_id) = author
            && self.authors.get(author_id).await?.is_none()
        {
            return Err(DomainError::Validation {
                field: "author",
                message: "referenced author does not exist",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::PostService;
    use crate::data::author_store::{AuthorStore, NewAuthor};
    use crate::data::post_store::PostStore;
    use crate::data::stores::memory::{MemoryAuthorStore, MemoryPostStore};
    use crate::domain::error::DomainError;
    use crate::domain::post::{AuthorField, CreatePostRequest, PostAuthor, UpdatePostRequest};

    fn service() -> (PostService, Arc<MemoryPostStore>, Arc<MemoryAuthorStore>) {
        let posts = Arc::new(MemoryPostStore::new());
        let authors = Arc::new(MemoryAuthorStore::new());
        (
            PostService::new(posts.clone(), authors.clone()),
            posts,
            authors,
        )
    }

    fn embedded_request(title: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: Some(title.to_string()),
            content: Some("content".to_string()),
            author: Some(AuthorField::Embedded {
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
            }),
            created: None,
        }
    }

    #[tokio::test]
    async fn create_post_persists_and_returns_entity() {
        let (service, posts, _) = service();

        let post = service
            .create_post(embedded_request("hello"))
            .await
            .expect("create must succeed");

        assert_eq!(post.title, "hello");
        assert_eq!(post.author_name().expect("resolved"), "Jane Doe");
        assert_eq!(posts.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn create_post_rejects_missing_title_before_store_call() {
        let (service, posts, _) = service();

        let err = service
            .create_post(CreatePostRequest {
                content: Some("content".to_string()),
                ..Default::default()
            })
            .await
            .expect_err("missing title must fail");

        assert!(matches!(err, DomainError::MissingField("title")));
        assert_eq!(posts.count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn create_post_rejects_unknown_author_reference() {
        let (service, _, _) = service();

        let err = service
            .create_post(CreatePostRequest {
                title: Some("t".to_string()),
                content: Some("c".to_string()),
                author: Some(AuthorField::Reference(
                    "000000000000000000000000".to_string(),
                )),
                created: None,
            })
            .await
            .expect_err("dangling reference must fail");
        assert!(matches!(err, DomainError::Validation { field: "author", .. }));
    }

    #[tokio::test]
    async fn get_post_resolves_author_reference() {
        let (service, _, authors) = service();

        let author = authors
            .create(NewAuthor {
                first_name: "Great".to_string(),
                last_name: "Author".to_string(),
                user_name: "greatness".to_string(),
            })
            .await
            .expect("author create");

        let created = service
            .create_post(CreatePostRequest {
                title: Some("t".to_string()),
                content: Some("c".to_string()),
                author: Some(AuthorField::Reference(author.id.clone())),
                created: None,
            })
            .await
            .expect("post create");

        let fetched = service.get_post(&created.id).await.expect("get");
        assert_eq!(fetched.author_name().expect("resolved"), "Great Author");
        assert!(matches!(fetched.author, PostAuthor::Embedded { .. }));
    }

    #[tokio::test]
    async fn get_post_returns_not_found_for_missing_id() {
        let (service, _, _) = service();
        let err = service
            .get_post("ffffffffffffffffffffffff")
            .await
            .expect_err("missing post");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_is_partial() {
        let (service, _, _) = service();
        let post = service
            .create_post(embedded_request("before"))
            .await
            .expect("create");

        service
            .update_post(
                &post.id,
                UpdatePostRequest {
                    title: Some("after".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update");

        let fetched = service.get_post(&post.id).await.expect("get");
        assert_eq!(fetched.title, "after");
        assert_eq!(fetched.content, "content");
        assert_eq!(fetched.created, post.created);
    }

    #[tokio::test]
    async fn delete_post_succeeds_for_missing_id() {
        let (service, _, _) = service();
        service
            .delete_post("ffffffffffffffffffffffff")
            .await
            .expect("delete must be idempotent");
    }
}
