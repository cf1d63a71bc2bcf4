use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("missing `{0}` in request body")]
    MissingField(&'static str),

    #[error("invalid `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(String),
}
