use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc};
use serde::{Deserialize, Serialize};

use crate::data::post_store::{NewPost, PostPatch, PostStore};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostAuthor};

const COLLECTION: &str = "posts";

#[derive(Debug, Clone)]
pub struct MongoPostStore {
    collection: Collection<PostDocument>,
}

impl MongoPostStore {
    pub fn new(database: &mongodb::Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EmbeddedAuthor {
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
}

/// Wire shape of a stored post. Exactly one of `author` (embedded name
/// parts) and `authorId` (reference) is set.
#[derive(Debug, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    title: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<EmbeddedAuthor>,
    #[serde(rename = "authorId", skip_serializing_if = "Option::is_none")]
    author_id: Option<ObjectId>,
    created: BsonDateTime,
}

impl PostDocument {
    fn from_new(input: NewPost) -> Result<Self, DomainError> {
        let (author, author_id) = split_author(input.author)?;
        Ok(Self {
            id: None,
            title: input.title,
            content: input.content,
            author,
            author_id,
            created: BsonDateTime::from_millis(input.created.timestamp_millis()),
        })
    }

    fn into_post(self) -> Result<Post, DomainError> {
        let id = self
            .id
            .ok_or_else(|| DomainError::Store("post document missing _id".to_string()))?
            .to_hex();
        let author = match (self.author, self.author_id) {
            (Some(author), _) => PostAuthor::Embedded {
                first_name: author.first_name,
                last_name: author.last_name,
            },
            (None, Some(author_id)) => PostAuthor::Reference(author_id.to_hex()),
            (None, None) => {
                return Err(DomainError::Store(format!("post {id} has no author field")));
            }
        };
        let created = chrono::DateTime::from_timestamp_millis(self.created.timestamp_millis())
            .ok_or_else(|| DomainError::Store(format!("post {id} has an invalid timestamp")))?;
        Ok(Post {
            id,
            title: self.title,
            content: self.content,
            author,
            created,
        })
    }
}

fn split_author(
    author: PostAuthor,
) -> Result<(Option<EmbeddedAuthor>, Option<ObjectId>), DomainError> {
    match author {
        PostAuthor::Embedded {
            first_name,
            last_name,
        } => Ok((
            Some(EmbeddedAuthor {
                first_name,
                last_name,
            }),
            None,
        )),
        PostAuthor::Reference(id) => Ok((None, Some(parse_object_id(&id)?))),
    }
}

fn parse_object_id(id: &str) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id).map_err(|err| DomainError::Store(format!("malformed id `{id}`: {err}")))
}

fn map_store_error(err: mongodb::error::Error) -> DomainError {
    DomainError::Store(err.to_string())
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn create(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut document = PostDocument::from_new(input)?;
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(map_store_error)?;
        document.id = result.inserted_id.as_object_id();
        document.into_post()
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let oid = parse_object_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": oid })
            .await
            .map_err(map_store_error)?;
        document.map(PostDocument::into_post).transpose()
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let documents: Vec<PostDocument> = self
            .collection
            .find(doc! {})
            .sort(doc! { "created": 1, "_id": 1 })
            .await
            .map_err(map_store_error)?
            .try_collect()
            .await
            .map_err(map_store_error)?;
        documents
            .into_iter()
            .map(PostDocument::into_post)
            .collect()
    }

    async fn update(&self, id: &str, patch: PostPatch) -> Result<bool, DomainError> {
        let oid = parse_object_id(id)?;

        let mut set = Document::new();
        let mut unset = Document::new();
        if let Some(title) = patch.title {
            set.insert("title", title);
        }
        if let Some(content) = patch.content {
            set.insert("content", content);
        }
        match patch.author {
            Some(PostAuthor::Embedded {
                first_name,
                last_name,
            }) => {
                set.insert(
                    "author",
                    doc! { "firstName": first_name, "lastName": last_name },
                );
                unset.insert("authorId", "");
            }
            Some(PostAuthor::Reference(author_id)) => {
                set.insert("authorId", parse_object_id(&author_id)?);
                unset.insert("author", "");
            }
            None => {}
        }

        let mut update = Document::new();
        if !set.is_empty() {
            update.insert("$set", set);
        }
        if !unset.is_empty() {
            update.insert("$unset", unset);
        }
        if update.is_empty() {
            // empty patch, nothing to write
            return Ok(true);
        }

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, update)
            .await
            .map_err(map_store_error)?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(map_store_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_by_author(&self, author_id: &str) -> Result<u64, DomainError> {
        let oid = parse_object_id(author_id)?;
        let result = self
            .collection
            .delete_many(doc! { "authorId": oid })
            .await
            .map_err(map_store_error)?;
        Ok(result.deleted_count)
    }

    async fn insert_many(&self, inputs: Vec<NewPost>) -> Result<Vec<String>, DomainError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        let documents = inputs
            .into_iter()
            .map(PostDocument::from_new)
            .collect::<Result<Vec<_>, _>>()?;
        let result = self
            .collection
            .insert_many(&documents)
            .await
            .map_err(map_store_error)?;

        let mut ids = vec![String::new(); documents.len()];
        for (index, id) in &result.inserted_ids {
            if let Some(oid) = id.as_object_id() {
                ids[*index] = oid.to_hex();
            }
        }
        Ok(ids)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(map_store_error)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.collection
            .delete_many(doc! {})
            .await
            .map_err(map_store_error)?;
        Ok(())
    }
}
