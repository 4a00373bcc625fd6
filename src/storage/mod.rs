//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryDataService;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoDataService;

use crate::config::StorageConfig;
use crate::core::DataService;
use crate::entities::{Rate, User, Validity};
use anyhow::Result;
use std::sync::Arc;

/// One collection per entity, shared by every service
#[derive(Clone)]
pub struct Stores {
    pub validities: Arc<dyn DataService<Validity>>,
    pub rates: Arc<dyn DataService<Rate>>,
    pub users: Arc<dyn DataService<User>>,
}

impl Stores {
    /// Fresh, empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            validities: Arc::new(InMemoryDataService::<Validity>::new()),
            rates: Arc::new(InMemoryDataService::<Rate>::new()),
            users: Arc::new(InMemoryDataService::<User>::new()),
        }
    }

    #[cfg(feature = "mongodb_backend")]
    pub fn mongodb(database: ::mongodb::Database) -> Self {
        Self {
            validities: Arc::new(MongoDataService::<Validity>::new(database.clone())),
            rates: Arc::new(MongoDataService::<Rate>::new(database.clone())),
            users: Arc::new(MongoDataService::<User>::new(database)),
        }
    }

    /// Open the backend selected by configuration
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        match config {
            StorageConfig::InMemory => {
                tracing::info!("using in-memory storage");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "mongodb_backend")]
            StorageConfig::Mongodb { uri, database } => {
                tracing::info!(database = %database, "connecting to MongoDB");
                let db = self::mongodb::connect(uri, database).await?;
                Ok(Self::mongodb(db))
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StorageConfig::Mongodb { .. } => Err(anyhow::anyhow!(
                "MongoDB storage requested but the `mongodb_backend` feature is disabled"
            )),
        }
    }
}
