use super::error::DomainError;

/// Display name derived from the stored name parts. Computed at
/// serialization time, never stored.
pub fn author_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

#[derive(Debug, Clone)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl Author {
    pub fn name(&self) -> String {
        author_name(&self.first_name, &self.last_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthorDraft {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
}

impl CreateAuthorRequest {
    /// Required-field check in fixed order: firstName, lastName, userName.
    pub fn validate(self) -> Result<AuthorDraft, DomainError> {
        let first_name = require_field("firstName", self.first_name)?;
        let last_name = require_field("lastName", self.last_name)?;
        let user_name = require_field("userName", self.user_name)?;
        Ok(AuthorDraft {
            first_name,
            last_name,
            user_name,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AuthorPatchDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_name: Option<String>,
}

impl UpdateAuthorRequest {
    /// Normalizes whichever whitelisted fields are present; absent fields
    /// stay untouched.
    pub fn validate(self) -> Result<AuthorPatchDraft, DomainError> {
        Ok(AuthorPatchDraft {
            first_name: normalize_present("firstName", self.first_name)?,
            last_name: normalize_present("lastName", self.last_name)?,
            user_name: normalize_present("userName", self.user_name)?,
        })
    }
}

pub(super) fn require_field(
    field: &'static str,
    value: Option<String>,
) -> Result<String, DomainError> {
    let value = value.ok_or(DomainError::MissingField(field))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value.to_string())
}

pub(super) fn normalize_present(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, DomainError> {
    value.map(|value| require_field(field, Some(value))).transpose()
}
