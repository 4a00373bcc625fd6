//! Core module containing the traits and types shared by every entity

pub mod auth;
pub mod entity;
pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod validation;

pub use auth::{AuthContext, AuthPolicy, Role};
pub use entity::Entity;
pub use error::{ConflictError, GymError, GymResult, StorageError, ValidationError};
pub use password::PasswordHasher;
pub use service::{Criteria, DataService};
pub use session::{Claims, TOKEN_COOKIE, TokenCodec};
pub use validation::{EntityId, JsonBody, Validated};
