use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::post::{AuthorField, CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

/// Author as submitted on the wire: a bare string is a reference to a stored
/// author, an object carries the embedded name parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AuthorDto {
    Reference(String),
    Embedded {
        #[serde(rename = "firstName")]
        first_name: Option<String>,
        #[serde(rename = "lastName")]
        last_name: Option<String>,
    },
}

impl From<AuthorDto> for AuthorField {
    fn from(dto: AuthorDto) -> Self {
        match dto {
            AuthorDto::Reference(id) => AuthorField::Reference(id),
            AuthorDto::Embedded {
                first_name,
                last_name,
            } => AuthorField::Embedded {
                first_name,
                last_name,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePostDto {
    title: Option<String>,
    content: Option<String>,
    author: Option<AuthorDto>,
    created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatePostDto {
    id: Option<String>,
    title: Option<String>,
    content: Option<String>,
    author: Option<AuthorDto>,
}

/// Serialized view: exactly the whitelisted fields, author flattened into
/// the derived display name.
#[derive(Debug, Serialize)]
pub(crate) struct PostDto {
    id: String,
    title: String,
    content: String,
    author: String,
    created: DateTime<Utc>,
}

impl TryFrom<Post> for PostDto {
    type Error = DomainError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        let author = post.author_name()?;
        Ok(Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            created: post.created,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ListPostsResponseDto {
    posts: Vec<PostDto>,
}

pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let posts = state.post_service.list_posts().await?;
    let posts = posts
        .into_iter()
        .map(PostDto::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((StatusCode::OK, Json(ListPostsResponseDto { posts })))
}

pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.post_service.get_post(&id).await?;
    Ok((StatusCode::OK, Json(PostDto::try_from(post)?)))
}

pub(crate) async fn create_post(
    State(state): State<AppState>,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = CreatePostRequest {
        title: dto.title,
        content: dto.content,
        author: dto.author.map(AuthorField::from),
        created: dto.created,
    };
    let post = state.post_service.create_post(req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::try_from(post)?)))
}

pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<StatusCode> {
    if dto.id.as_deref() != Some(id.as_str()) {
        return Err(AppError::IdMismatch {
            path_id: id,
            body_id: dto.id.unwrap_or_default(),
        });
    }

    let req = UpdatePostRequest {
        title: dto.title,
        content: dto.content,
        author: dto.author.map(AuthorField::from),
    };
    state.post_service.update_post(&id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
