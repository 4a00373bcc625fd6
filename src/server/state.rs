//! Shared handler state

use crate::config::AuthConfig;
use crate::core::password::PasswordHasher;
use crate::core::session::TokenCodec;
use crate::entities::auth::AuthService;
use crate::entities::rate::RateService;
use crate::entities::user::UserService;
use crate::entities::validity::ValidityService;
use crate::storage::Stores;
use std::sync::Arc;

/// Services every handler can reach
///
/// Cheap to clone: services hold `Arc`s to the stores.
#[derive(Clone)]
pub struct AppState {
    pub validities: ValidityService,
    pub rates: RateService,
    pub users: UserService,
    pub auth: AuthService,
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    pub fn new(stores: &Stores, auth: &AuthConfig) -> Self {
        let hasher = PasswordHasher::new(auth.bcrypt_cost);

        Self {
            validities: ValidityService::new(stores.validities.clone(), stores.rates.clone()),
            rates: RateService::new(stores.rates.clone(), stores.validities.clone()),
            users: UserService::new(stores.users.clone(), hasher),
            auth: AuthService::new(stores.users.clone(), hasher),
            tokens: Arc::new(TokenCodec::new(
                &auth.jwt_secret,
                auth.token_ttl_hours,
                auth.secure_cookies,
            )),
        }
    }
}
