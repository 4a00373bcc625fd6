//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::state::AppState;
use crate::config::{CorsConfig, ServerConfig};
use crate::entities::{AuthDescriptor, RateDescriptor, UserDescriptor, ValidityDescriptor};
use crate::storage::Stores;
use anyhow::Result;
use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server with all entity routes registered
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new(config)
///     .with_stores(Stores::in_memory())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    stores: Option<Stores>,
    entity_registry: EntityRegistry,
}

impl ServerBuilder {
    /// Create a builder with the standard gymdesk entities registered
    pub fn new(config: ServerConfig) -> Self {
        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(AuthDescriptor));
        entity_registry.register(Box::new(ValidityDescriptor));
        entity_registry.register(Box::new(RateDescriptor));
        entity_registry.register(Box::new(UserDescriptor));

        Self {
            config,
            stores: None,
            entity_registry,
        }
    }

    /// Set the document stores (required)
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Build the shared state and the complete router
    pub fn build(self) -> Result<Router> {
        let stores = self
            .stores
            .ok_or_else(|| anyhow::anyhow!("Stores are required. Call .with_stores()"))?;
        let state = AppState::new(&stores, &self.config.auth);

        let app = health_routes().merge(self.entity_registry.build_routes(&state));

        tracing::debug!(entities = ?self.entity_registry.entity_types(), "routes registered");

        Ok(app
            .layer(cors_layer(&self.config.cors)?)
            .layer(TraceLayer::new_for_http()))
    }

    /// Build the router and serve it until the process stops
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let app = self.build()?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "gymdesk listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Credentialed CORS; `*` mirrors the caller's origin since browsers
/// refuse a literal wildcard alongside cookies
fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let origins = if config.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let list = config
            .allowed_origins
            .iter()
            .map(|o| HeaderValue::from_str(o))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(list)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::AUTHORIZATION]))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "gymdesk"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_stores() {
        let err = ServerBuilder::new(ServerConfig::default()).build().unwrap_err();
        assert!(err.to_string().contains("Stores are required"));
    }

    #[test]
    fn test_bad_origin_is_rejected() {
        let config = CorsConfig {
            allowed_origins: vec!["http://bad\norigin".to_string()],
        };
        assert!(cors_layer(&config).is_err());
    }

    #[test]
    fn test_registers_standard_entities() {
        let builder = ServerBuilder::new(ServerConfig::default());
        assert_eq!(
            builder.entity_registry.entity_types(),
            vec!["rate", "session", "user", "validity"]
        );
    }
}
