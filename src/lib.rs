//! # gymdesk
//!
//! REST back office for a gym: staff accounts, membership rates and the
//! validity periods those rates are sold for.
//!
//! ## Features
//!
//! - **Validity normalizer**: `(months, days)` durations with a derived,
//!   stored label (`"1 Month 15 Days"`) and duration uniqueness
//! - **Rate registry**: uniquely named prices bound to a validity; a
//!   validity cannot be deleted while a rate references it
//! - **Identity & access**: bcrypt passwords, JWT session cookie, flat role
//!   allow-lists and owner-or-admin profile edits
//! - **Pluggable storage**: in-memory collections, or MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gymdesk::prelude::*;
//!
//! let mut config = ServerConfig::default();
//! config.auth.jwt_secret = "change-me".to_string();
//!
//! let app = ServerBuilder::new(config)
//!     .with_stores(Stores::in_memory())
//!     .build()?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, Role},
        entity::Entity,
        error::{ConflictError, GymError, GymResult, StorageError, ValidationError},
        password::PasswordHasher,
        service::{Criteria, DataService},
        session::{TOKEN_COOKIE, TokenCodec},
        validation::{EntityId, JsonBody, Validated},
    };

    // === Entities ===
    pub use crate::entities::{
        auth::AuthService,
        rate::{Rate, RateService, RateView},
        user::{PublicUser, User, UserService},
        validity::{Period, Validity, ValidityService, validity_label},
    };

    // === Macros ===
    pub use crate::{document_struct, impl_entity};

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, Stores};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Config ===
    pub use crate::config::{AuthConfig, CorsConfig, ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
