use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Serialize};

use crate::data::author_store::{AuthorPatch, AuthorStore, NewAuthor};
use crate::domain::author::Author;
use crate::domain::error::DomainError;

const COLLECTION: &str = "authors";

#[derive(Debug, Clone)]
pub struct MongoAuthorStore {
    collection: Collection<AuthorDocument>,
}

impl MongoAuthorStore {
    pub fn new(database: &mongodb::Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Unique index on `userName`; uniqueness lives in the store, not here.
    pub async fn ensure_indexes(&self) -> Result<(), DomainError> {
        let index = IndexModel::builder()
            .keys(doc! { "userName": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection
            .create_index(index)
            .await
            .map_err(map_author_error)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct AuthorDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    #[serde(rename = "userName")]
    user_name: String,
}

impl AuthorDocument {
    fn from_new(input: NewAuthor) -> Self {
        Self {
            id: None,
            first_name: input.first_name,
            last_name: input.last_name,
            user_name: input.user_name,
        }
    }

    fn into_author(self) -> Result<Author, DomainError> {
        let id = self
            .id
            .ok_or_else(|| DomainError::Store("author document missing _id".to_string()))?
            .to_hex();
        Ok(Author {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            user_name: self.user_name,
        })
    }
}

fn parse_object_id(id: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id).map_err(|err| DomainError::Store(format!("malformed id `{id}`: {err}")))
}

fn map_author_error(err: mongodb::error::Error) -> DomainError {
    if is_duplicate_key(&err) {
        return DomainError::Validation {
            field: "userName",
            message: "already taken",
        };
    }
    DomainError::Store(err.to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl AuthorStore for MongoAuthorStore {
    async fn create(&self, input: NewAuthor) -> Result<Author, DomainError> {
        let mut document = AuthorDocument::from_new(input);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_author_error)?;
        document.id = result.inserted_id.as_object_id();
        document.into_author()
    }

    async fn get(&self, id: &str) -> Result<Option<Author>, DomainError> {
        let oid = parse_object_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_author_error)?;
        document.map(AuthorDocument::into_author).transpose()
    }

    async fn list(&self) -> Result<Vec<Author>, DomainError> {
        let documents: Vec<AuthorDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "userName": 1 })
            .await
            .map_err(map_author_error)?
            .try_collect()
            .await
            .map_err(map_author_error)?;
        documents
            .into_iter()
            .map(AuthorDocument::into_author)
            .collect()
    }

    async fn update(&self, id: &str, patch: AuthorPatch) -> Result<Option<Author>, DomainError> {
        let oid = parse_object_id(id)?;

        let mut set = Document::new();
        if let Some(first_name) = patch.first_name {
            set.insert("firstName", first_name);
        }
        if let Some(last_name) = patch.last_name {
            set.insert("lastName", last_name);
        }
        if let Some(user_name) = patch.user_name {
            set.insert("userName", user_name);
        }
        if set.is_empty() {
            return self.get(id).await;
        }

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_author_error)?;
        document.map(AuthorDocument::into_author).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_author_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.collection
            .delete_many(doc! {})
            .await
            .map_err(map_author_error)?;
        Ok(())
    }
}
