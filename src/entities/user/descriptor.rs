//! Entity descriptor for User

use super::handlers::{create_user, delete_user, list_staff, update_profile};
use crate::core::auth::AuthPolicy;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::guard::protect;
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Descriptor for the User entity
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self, state: &AppState) -> Router {
        let admin = Router::new()
            .route("/api/admin/staffs", get(list_staff))
            .route("/api/admin/create-user", post(create_user))
            .route("/api/admin/delete-user/{id}", delete(delete_user));

        // ownership is checked in the handler, once the target id is known
        let profile = Router::new().route("/api/user/update-profile/{id}", put(update_profile));

        protect(admin, state, AuthPolicy::admin_only())
            .merge(protect(profile, state, AuthPolicy::Authenticated))
            .with_state(state.clone())
    }
}
