//! Session tokens and the cookie that carries them
//!
//! A session is a signed JWT of `(user id, role)` with a fixed lifetime,
//! stored in an http-only, `SameSite=Strict` cookie named [`TOKEN_COOKIE`].

use crate::core::auth::Role;
use crate::core::error::{GymError, GymResult};
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the session cookie
pub const TOKEN_COOKIE: &str = "token";

/// Claims signed into every session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub id: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
    secure_cookies: bool,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_hours: i64, secure_cookies: bool) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::hours(ttl_hours),
            secure_cookies,
        }
    }

    /// Sign a token for `user_id` expiring after the configured lifetime
    pub fn issue(&self, user_id: Uuid, role: Role) -> GymResult<String> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| GymError::Internal(format!("failed to sign session token: {}", e)))
    }

    /// Decode and check signature and expiry
    pub fn verify(&self, token: &str) -> GymResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, "rejected session token");
                GymError::unauthenticated("Invalid or expired token")
            })
    }

    /// Cookie carrying a freshly issued token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure_cookies)
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .build()
    }

    /// Cookie that, once removed from the jar, clears the session client-side
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure_cookies)
            .build()
    }
}
