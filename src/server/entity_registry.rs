//! Registry collecting the route groups of every entity

use super::state::AppState;
use axum::Router;
use std::collections::BTreeMap;

/// Describes how an entity mounts its HTTP routes
///
/// Each entity (Validity, Rate, User, ...) implements this trait and returns
/// its routes already wrapped in the auth policy they need.
pub trait EntityDescriptor: Send + Sync {
    /// Singular type name (e.g. "rate"), the registry key
    fn entity_type(&self) -> &str;

    /// Collection name (e.g. "rates")
    fn plural(&self) -> &str;

    fn build_routes(&self, state: &AppState) -> Router;
}

/// Descriptors keyed by entity type; registering a type twice replaces it
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        self.descriptors
            .insert(descriptor.entity_type().to_string(), descriptor);
    }

    /// Merge every descriptor's routes, in entity type order
    pub fn build_routes(&self, state: &AppState) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                tracing::debug!(
                    entity = descriptor.entity_type(),
                    collection = descriptor.plural(),
                    "mounting routes"
                );
                router.merge(descriptor.build_routes(state))
            })
    }

    /// Registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(String::as_str).collect()
    }
}
