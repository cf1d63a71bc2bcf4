use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::domain::author::{Author, CreateAuthorRequest, UpdateAuthorRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateAuthorDto {
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
    #[serde(rename = "userName")]
    user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateAuthorDto {
    id: Option<String>,
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
    #[serde(rename = "userName")]
    user_name: Option<String>,
}

/// Serialized view: id, derived display name, userName.
#[derive(Debug, Serialize)]
pub(crate) struct AuthorDto {
    id: String,
    name: String,
    #[serde(rename = "userName")]
    user_name: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        let name = author.name();
        Self {
            id: author.id,
            name,
            user_name: author.user_name,
        }
    }
}

pub(crate) async fn list_authors(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<AuthorDto>>)> {
    let authors = state.author_service.list_authors().await?;
    let authors = authors.into_iter().map(AuthorDto::from).collect();
    Ok((StatusCode::OK, Json(authors)))
}

pub(crate) async fn create_author(
    State(state): State<AppState>,
    Json(dto): Json<CreateAuthorDto>,
) -> AppResult<(StatusCode, Json<AuthorDto>)> {
    let req = CreateAuthorRequest {
        first_name: dto.first_name,
        last_name: dto.last_name,
        user_name: dto.user_name,
    };
    let author = state.author_service.create_author(req).await?;
    Ok((StatusCode::CREATED, Json(AuthorDto::from(author))))
}

pub(crate) async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(dto): Json<UpdateAuthorDto>,
) -> AppResult<(StatusCode, Json<AuthorDto>)> {
    if dto.id.as_deref() != Some(id.as_str()) {
        return Err(AppError::IdMismatch {
            path_id: id,
            body_id: dto.id.unwrap_or_default(),
        });
    }

    let req = UpdateAuthorRequest {
        first_name: dto.first_name,
        last_name: dto.last_name,
        user_name: dto.user_name,
    };
    let author = state.author_service.update_author(&id, req).await?;
    Ok((StatusCode::OK, Json(AuthorDto::from(author))))
}

pub(crate) async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.author_service.delete_author(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
