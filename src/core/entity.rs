//! Entity trait shared by every stored document

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all stored documents.
///
/// All entities have:
/// - id: Unique identifier (serialized as `_id`)
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// Storage backends rely on this trait to key documents and to name the
/// collection they live in.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The collection name (e.g., "validities", "rates")
    fn resource_name() -> &'static str;

    /// Human-facing singular name used in error messages (e.g., "Validity")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at` to now
    fn touch(&mut self);
}
