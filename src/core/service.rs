//! Storage service trait shared by every entity collection

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Service trait for managing stored documents
///
/// Implementations provide CRUD operations for a specific entity type.
/// Business rules (uniqueness, referential checks) live in the entity
/// services above this seam; backends only store and match documents.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new document
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a document by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all documents, in no particular order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing document
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete a document; missing ids are not an error
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Documents whose serialized fields equal every criterion
    async fn search(&self, criteria: &Criteria) -> Result<Vec<T>>;

    /// Number of documents matching `criteria`
    async fn count(&self, criteria: &Criteria) -> Result<u64> {
        Ok(self.search(criteria).await?.len() as u64)
    }
}

/// Conjunction of field equality tests over the wire representation
/// (`_id`, camelCase field names)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    fields: Vec<(String, Value)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.push((field.to_string(), value.into()));
        self
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Test a serialized document against every criterion
    pub fn matches(&self, document: &Value) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field).is_some_and(|v| same_value(v, expected)))
    }
}

/// Numbers compare by value so `3` and `3.0` match, as they do in a document store
fn same_value(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_criteria_must_match() {
        let doc = json!({"months": 1, "days": 0, "validity": "1 Month"});

        assert!(Criteria::new().eq("months", 1u32).matches(&doc));
        assert!(Criteria::new().eq("months", 1u32).eq("days", 0u32).matches(&doc));
        assert!(!Criteria::new().eq("months", 1u32).eq("days", 1u32).matches(&doc));
        assert!(!Criteria::new().eq("weeks", 0u32).matches(&doc));
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        assert!(Criteria::new().matches(&json!({})));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(Criteria::new().eq("amount", 500).matches(&json!({"amount": 500.0})));
    }

    #[test]
    fn test_strings_are_case_sensitive() {
        let doc = json!({"name": "Basic"});
        assert!(Criteria::new().eq("name", "Basic").matches(&doc));
        assert!(!Criteria::new().eq("name", "basic").matches(&doc));
    }
}
