//! Entity descriptor for Rate

use super::handlers::{create_rate, delete_rate, list_rates, update_rate};
use crate::core::auth::AuthPolicy;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::guard::protect;
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Descriptor for the Rate entity
pub struct RateDescriptor;

impl EntityDescriptor for RateDescriptor {
    fn entity_type(&self) -> &str {
        "rate"
    }

    fn plural(&self) -> &str {
        "rates"
    }

    fn build_routes(&self, state: &AppState) -> Router {
        let routes = Router::new()
            .route("/api/admin/rates", get(list_rates))
            .route("/api/admin/create-rate", post(create_rate))
            .route("/api/admin/update-rate/{id}", put(update_rate))
            .route("/api/admin/delete-rate/{id}", delete(delete_rate));

        protect(routes, state, AuthPolicy::admin_only()).with_state(state.clone())
    }
}
