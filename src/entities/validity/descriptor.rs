//! Entity descriptor for Validity

use super::handlers::{create_validity, delete_validity, list_validities, update_validity};
use crate::core::auth::AuthPolicy;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::guard::protect;
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Descriptor for the Validity entity
pub struct ValidityDescriptor;

impl EntityDescriptor for ValidityDescriptor {
    fn entity_type(&self) -> &str {
        "validity"
    }

    fn plural(&self) -> &str {
        "validities"
    }

    fn build_routes(&self, state: &AppState) -> Router {
        let routes = Router::new()
            .route("/api/admin/validities", get(list_validities))
            .route("/api/admin/create-validity", post(create_validity))
            .route("/api/admin/update-validity/{id}", put(update_validity))
            .route("/api/admin/delete-validity/{id}", delete(delete_validity));

        protect(routes, state, AuthPolicy::admin_only()).with_state(state.clone())
    }
}
