//! Route descriptor for session endpoints

use super::handlers::{check, check_admin, create_admin, login, logout};
use crate::core::auth::AuthPolicy;
use crate::server::entity_registry::EntityDescriptor;
use crate::server::guard::protect;
use crate::server::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for `/api/auth`
pub struct AuthDescriptor;

impl EntityDescriptor for AuthDescriptor {
    fn entity_type(&self) -> &str {
        "session"
    }

    fn plural(&self) -> &str {
        "auth"
    }

    fn build_routes(&self, state: &AppState) -> Router {
        let public = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/check-admin", get(check_admin))
            .route("/api/auth/create-admin", post(create_admin));

        let session = Router::new().route("/api/auth/check", get(check));

        public
            .merge(protect(session, state, AuthPolicy::Authenticated))
            .with_state(state.clone())
    }
}
