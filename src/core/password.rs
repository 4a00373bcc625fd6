//! Password hashing
//!
//! Passwords are stored as bcrypt hashes. The cost factor comes from
//! configuration (10 in production); tests drop it to the bcrypt minimum.

use crate::core::error::{GymError, GymResult};
use tokio::task;
use uuid::Uuid;

/// Production bcrypt cost
pub const DEFAULT_COST: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash on the blocking pool; bcrypt at production cost takes tens of milliseconds
    pub async fn hash(&self, plain: &str) -> GymResult<String> {
        let plain = plain.to_owned();
        let cost = self.cost;
        let hashed = task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| GymError::Internal(format!("password hashing task failed: {}", e)))?;
        Ok(hashed?)
    }

    /// Constant-time comparison against a stored hash, off the async workers
    pub async fn verify(&self, plain: &str, hash: &str) -> bool {
        let (plain, hash) = (plain.to_owned(), hash.to_owned());
        match task::spawn_blocking(move || bcrypt::verify(plain, &hash)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "stored password hash is unreadable");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

/// One-time password for the bootstrap admin.
///
/// Built from a v4 UUID and framed so it always satisfies the password
/// policy (upper, lower, special, 8-24 characters).
pub fn generate_one_time_password() -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("Gy{}#m", &entropy[..16])
}
