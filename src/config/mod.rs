//! Configuration loading and management
//!
//! Settings come from an optional YAML file, then environment variables
//! override individual values:
//!
//! | Variable      | Overrides                                   |
//! |---------------|---------------------------------------------|
//! | `PORT`        | `port`                                      |
//! | `DB_URL`      | `storage` (switches to MongoDB)             |
//! | `DB_NAME`     | MongoDB database name                       |
//! | `JWT_SECRET`  | `auth.jwt_secret`                           |
//! | `GYMDESK_ENV` | `production` turns on secure cookies        |

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

const DEFAULT_DATABASE: &str = "gymdesk";

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

/// Session and password settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    /// Mark the session cookie `Secure` (HTTPS only)
    pub secure_cookies: bool,
}

/// Storage backend selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    #[default]
    InMemory,
    Mongodb {
        uri: String,
        #[serde(default = "default_database")]
        database: String,
    },
}

/// Browser origins allowed to call the API with credentials
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Exact origins; `*` mirrors any requesting origin
    pub allowed_origins: Vec<String>,
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: 24,
            bcrypt_cost: crate::core::password::DEFAULT_COST,
            secure_cookies: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?;
        }

        if let Some(uri) = lookup("DB_URL").filter(|s| !s.is_empty()) {
            let database = lookup("DB_NAME")
                .filter(|s| !s.is_empty())
                .or_else(|| match &self.storage {
                    StorageConfig::Mongodb { database, .. } => Some(database.clone()),
                    StorageConfig::InMemory => None,
                })
                .unwrap_or_else(default_database);
            self.storage = StorageConfig::Mongodb { uri, database };
        }

        if let Some(secret) = lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            self.auth.jwt_secret = secret;
        }

        if lookup("GYMDESK_ENV").as_deref() == Some("production") {
            self.auth.secure_cookies = true;
        }

        Ok(self)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            bail!("auth.jwt_secret (or JWT_SECRET) must be set");
        }
        if self.auth.token_ttl_hours <= 0 {
            bail!("auth.token_ttl_hours must be positive");
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            bail!("auth.bcrypt_cost must be between 4 and 31");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
