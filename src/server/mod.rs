//! Server module for building the HTTP server
//!
//! `ServerBuilder` wires the stores into [`AppState`], collects every
//! entity's routes through the [`EntityRegistry`] and adds the ambient
//! layers (CORS, request tracing) and the health check.

pub mod builder;
pub mod entity_registry;
pub mod guard;
pub mod state;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use state::AppState;
