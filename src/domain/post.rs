use chrono::{DateTime, Utc};

use super::author::{author_name, normalize_present, require_field};
use super::error::DomainError;

/// Author of a post: either name parts embedded in the post document, or a
/// reference to a stored Author that must be resolved before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostAuthor {
    Embedded {
        first_name: String,
        last_name: String,
    },
    Reference(String),
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created: DateTime<Utc>,
}

impl Post {
    /// Derived display name. Fails on an unresolved reference: resolution is
    /// a prerequisite for serialization, not something this entity does.
    pub fn author_name(&self) -> Result<String, DomainError> {
        match &self.author {
            PostAuthor::Embedded {
                first_name,
                last_name,
            } => Ok(author_name(first_name, last_name)),
            PostAuthor::Reference(id) => Err(DomainError::Store(format!(
                "post {} serialized with unresolved author reference {id}",
                self.id
            ))),
        }
    }
}

/// Author field as submitted by a client, before required-field checks.
#[derive(Debug, Clone)]
pub enum AuthorField {
    Embedded {
        first_name: Option<String>,
        last_name: Option<String>,
    },
    Reference(String),
}

impl AuthorField {
    fn validate(self) -> Result<PostAuthor, DomainError> {
        match self {
            AuthorField::Embedded {
                first_name,
                last_name,
            } => Ok(PostAuthor::Embedded {
                first_name: require_field("author.firstName", first_name)?,
                last_name: require_field("author.lastName", last_name)?,
            }),
            AuthorField::Reference(id) => {
                let id = id.trim();
                if id.is_empty() {
                    return Err(DomainError::Validation {
                        field: "author",
                        message: "author reference must not be empty",
                    });
                }
                Ok(PostAuthor::Reference(id.to_string()))
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorField>,
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created: DateTime<Utc>,
}

impl CreatePostRequest {
    /// Required-field check in fixed order: title, content, author. The
    /// first missing field wins. `created` defaults to now.
    pub fn validate(self) -> Result<PostDraft, DomainError> {
        let title = require_field("title", self.title)?;
        let content = require_field("content", self.content)?;
        let author = self
            .author
            .ok_or(DomainError::MissingField("author"))?
            .validate()?;
        Ok(PostDraft {
            title,
            content,
            author,
            created: self.created.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorField>,
}

#[derive(Debug, Clone, Default)]
pub struct PostPatchDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<PostAuthor>,
}

impl UpdatePostRequest {
    /// Only whitelisted fields present in the body are applied.
    pub fn validate(self) -> Result<PostPatchDraft, DomainError> {
        Ok(PostPatchDraft {
            title: normalize_present("title", self.title)?,
            content: normalize_present("content", self.content)?,
            author: self.author.map(AuthorField::validate).transpose()?,
        })
    }
}
