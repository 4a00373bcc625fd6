//! MongoDB storage backend using the official MongoDB async driver.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One collection per entity type, named after `T::resource_name()`
//! ("validities", "rates", "users").
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents, so ids and timestamps are stored as
//! strings. Documents already carry `_id`, so the wire shape and the stored
//! shape are identical and [`Criteria`] field names apply unchanged.
//!
//! No unique indexes are created: uniqueness is a service-level rule.

use crate::core::{Criteria, DataService, Entity, StorageError};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    match mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?
    {
        Bson::Document(d) => Ok(d),
        _ => Err(anyhow!("Expected BSON document, got non-object")),
    }
}

/// Convert a BSON Document back into a serde_json::Value
fn document_to_json(doc: Document) -> serde_json::Value {
    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Build an equality filter from search criteria
fn criteria_to_filter(criteria: &Criteria) -> Result<Document> {
    let mut filter = Document::new();
    for (field, value) in criteria.fields() {
        let bson = mongodb::bson::to_bson(value)
            .map_err(|e| anyhow!("Failed to convert criterion '{}': {}", field, e))?;
        filter.insert(field.as_str(), bson);
    }
    Ok(filter)
}

fn connection_error(err: mongodb::error::Error) -> StorageError {
    StorageError::Connection {
        backend: "MongoDB".to_string(),
        message: err.to_string(),
    }
}

/// Connect, select the configured database and ping it
pub async fn connect(uri: &str, database: &str) -> std::result::Result<Database, StorageError> {
    let client = Client::with_uri_str(uri).await.map_err(connection_error)?;
    let db = client.database(database);
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(connection_error)?;
    Ok(db)
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Document collection backed by MongoDB
///
/// # Example
///
/// ```rust,ignore
/// let db = connect("mongodb://localhost:27017", "gymdesk").await?;
/// let validities = MongoDataService::<Validity>::new(db);
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T: Entity + Serialize + DeserializeOwned> MongoDataService<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    fn entity_to_document(entity: &T) -> Result<Document> {
        let json = serde_json::to_value(entity).map_err(|e| {
            anyhow!("Failed to serialize {}: {}", T::resource_name_singular(), e)
        })?;
        json_to_document(json)
    }

    fn document_to_entity(doc: Document) -> Result<T> {
        serde_json::from_value(document_to_json(doc)).map_err(|e| {
            anyhow!(
                "Failed to deserialize {} from document: {}",
                T::resource_name_singular(),
                e
            )
        })
    }

    async fn find_one(&self, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::resource_name_singular(), e))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", T::resource_name(), e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::resource_name(), e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }
}

#[async_trait]
impl<T: Entity + Serialize + DeserializeOwned> DataService<T> for MongoDataService<T> {
    /// Insert the document and read it back to return the stored version.
    async fn create(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", T::resource_name_singular(), e))?;

        self.find_one(&entity.id())
            .await?
            .ok_or_else(|| anyhow!("{} not found after insert", T::resource_name_singular()))
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        self.find_one(id).await
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.find_many(doc! {}).await
    }

    /// Replace the whole document. Fails if no document matched.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update {}: {}", T::resource_name_singular(), e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("{} not found: {}", T::resource_name_singular(), id));
        }

        self.find_one(id)
            .await?
            .ok_or_else(|| anyhow!("{} not found after update", T::resource_name_singular()))
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        self.collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", T::resource_name_singular(), e))?;

        Ok(())
    }

    async fn search(&self, criteria: &Criteria) -> Result<Vec<T>> {
        self.find_many(criteria_to_filter(criteria)?).await
    }

    async fn count(&self, criteria: &Criteria) -> Result<u64> {
        self.collection()
            .count_documents(criteria_to_filter(criteria)?)
            .await
            .map_err(|e| anyhow!("Failed to count {}: {}", T::resource_name(), e))
    }
}

#[cfg(test)]
#[cfg(feature = "mongodb_backend")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_to_document_keeps_underscore_id() {
        let doc = json_to_document(json!({"_id": "abc", "months": 1})).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), "abc");
        assert_eq!(doc.get_i64("months").unwrap(), 1);
    }

    #[test]
    fn json_to_document_non_object_returns_error() {
        let err = json_to_document(json!("string")).unwrap_err();
        assert!(err.to_string().contains("non-object"));
    }

    #[test]
    fn document_to_json_preserves_fields() {
        let json = document_to_json(doc! { "_id": "abc", "name": "Basic", "amount": 500.5 });

        assert_eq!(json["_id"], "abc");
        assert_eq!(json["name"], "Basic");
        assert_eq!(json["amount"], 500.5);
    }

    #[test]
    fn criteria_become_an_equality_filter() {
        let criteria = Criteria::new().eq("months", 1u32).eq("validity", "abc");
        let filter = criteria_to_filter(&criteria).unwrap();

        assert_eq!(filter.get_i64("months").unwrap(), 1);
        assert_eq!(filter.get_str("validity").unwrap(), "abc");
    }

    #[test]
    fn empty_criteria_match_everything() {
        assert!(criteria_to_filter(&Criteria::new()).unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_uri_is_a_connection_error() {
        let err = connect("not-a-mongodb-uri", "gymdesk").await.unwrap_err();

        assert!(matches!(
            &err,
            StorageError::Connection { backend, .. } if backend == "MongoDB"
        ));
        assert!(err.to_string().starts_with("Failed to connect to MongoDB"));
    }
}
