use std::collections::HashMap;
use std::sync::atomic::AtomicU64;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::next_id;
use crate::data::post_store::{NewPost, PostPatch, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostAuthor};

#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<HashMap<String, Post>>,
    sequence: AtomicU64,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn build_post(&self, input: NewPost) -> Post {
        Post {
            id: next_id(&self.sequence),
            title: input.title,
            content: input.content,
            author: input.author,
            created: input.created,
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let post = self.build_post(input);
        let mut posts = self.posts.write().await;
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.posts.read().await;
        let mut posts: Vec<Post> = posts.values().cloned().collect();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(posts)
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(id) else {
            return Ok(false);
        };
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(author) = patch.author {
            post.author = author;
        }
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(id).is_some())
    }

    async fn delete_by_author(&self, author_id: &str) -> Result<u64, DomainError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|_, post| {
            !matches!(&post.author, PostAuthor::Reference(id) if id == author_id)
        });
        Ok((before - posts.len()) as u64)
    }

    async fn insert_many(&self, inputs: Vec<NewPost>) -> Result<Vec<String>, DomainError> {
        let mut posts = self.posts.write().await;
        let mut ids = Vec::with_capacity(inputs.len());
        for input in inputs {
            let post = self.build_post(input);
            ids.push(post.id.clone());
            posts.insert(post.id.clone(), post);
        }
        Ok(ids)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.len() as u64)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        posts.clear();
        Ok(())
    }
}
