//! Login, session resolution and the one-time admin bootstrap

use crate::core::auth::{AuthContext, Role};
use crate::core::error::{ConflictError, GymError, GymResult};
use crate::core::password::{PasswordHasher, generate_one_time_password};
use crate::core::service::DataService;
use crate::core::session::Claims;
use crate::entities::user::{User, UserService};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

const BAD_CREDENTIALS: &str = "Incorrect username or password";

/// Body of a login request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Bootstrap admin together with its plaintext one-time password
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub user: User,
    pub password: String,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    store: Arc<dyn DataService<User>>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(store: Arc<dyn DataService<User>>, hasher: PasswordHasher) -> Self {
        Self {
            users: UserService::new(store.clone(), hasher),
            store,
            hasher,
        }
    }

    /// Check credentials; unknown users and wrong passwords are indistinguishable
    pub async fn login(&self, credentials: Credentials) -> GymResult<User> {
        let (Some(user_name), Some(password)) = (
            credentials.user_name.filter(|s| !s.trim().is_empty()),
            credentials.password.filter(|s| !s.is_empty()),
        ) else {
            return Err(GymError::invalid("Username and password are required"));
        };

        let Some(user) = self.users.find_by_user_name(user_name.trim()).await? else {
            tracing::warn!(user_name = %user_name, "login for unknown user");
            return Err(GymError::unauthenticated(BAD_CREDENTIALS));
        };

        if !self.hasher.verify(&password, &user.password).await {
            tracing::warn!(user_name = %user.user_name, "login with wrong password");
            return Err(GymError::unauthenticated(BAD_CREDENTIALS));
        }

        tracing::info!(id = %user.id, user_name = %user.user_name, "user logged in");
        Ok(user)
    }

    /// Resolve verified token claims to the user behind them
    pub async fn session(&self, claims: &Claims) -> GymResult<AuthContext> {
        let Some(user) = self.store.get(&claims.id).await? else {
            tracing::warn!(id = %claims.id, "session for a deleted user");
            return Err(GymError::unauthenticated("User no longer exists"));
        };

        // the stored role wins over the one signed into the token
        Ok(AuthContext::User {
            user_id: user.id,
            user_name: user.user_name,
            role: user.role,
        })
    }

    pub async fn has_admin(&self) -> GymResult<bool> {
        Ok(self.users.count_by_role(Role::Admin).await? > 0)
    }

    /// Create the first admin account; refused once any admin exists
    pub async fn create_admin(&self) -> GymResult<BootstrapAdmin> {
        if self.has_admin().await? {
            return Err(ConflictError::AdminExists.into());
        }

        let password = generate_one_time_password();
        let now = Utc::now();
        let admin = User {
            id: Uuid::new_v4(),
            first_name: "System".to_string(),
            last_name: "Admin".to_string(),
            gender: "Other".to_string(),
            birth_date: now.date_naive(),
            address: "System".to_string(),
            phone_number: "0000000000".to_string(),
            user_name: "admin".to_string(),
            password: self.hasher.hash(&password).await?,
            role: Role::Admin,
            created_at: now,
            updated_at: now,
        };

        let user = self.store.create(admin).await?;
        tracing::info!(id = %user.id, "bootstrap admin created");
        Ok(BootstrapAdmin { user, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryDataService;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryDataService::new()), PasswordHasher::new(4))
    }

    fn credentials(user_name: &str, password: &str) -> Credentials {
        Credentials {
            user_name: Some(user_name.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_admin_once() {
        let service = service();
        assert!(!service.has_admin().await.unwrap());

        let admin = service.create_admin().await.unwrap();
        assert_eq!(admin.user.user_name, "admin");
        assert_eq!(admin.user.role, Role::Admin);
        assert_ne!(admin.user.password, admin.password);
        assert!(service.has_admin().await.unwrap());

        let err = service.create_admin().await.unwrap_err();
        assert_eq!(err.to_string(), "Admin user already exists");
    }

    #[tokio::test]
    async fn test_login_with_bootstrap_password() {
        let service = service();
        let admin = service.create_admin().await.unwrap();

        let user = service.login(credentials("admin", &admin.password)).await.unwrap();
        assert_eq!(user.id, admin.user.id);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let service = service();
        service.create_admin().await.unwrap();

        let err = service.login(credentials("admin", "Wrong#Pass1")).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), BAD_CREDENTIALS);

        let err = service.login(credentials("nobody01", "Wrong#Pass1")).await.unwrap_err();
        assert_eq!(err.to_string(), BAD_CREDENTIALS);

        let err = service.login(Credentials::default()).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_session_reads_current_user() {
        let service = service();
        let admin = service.create_admin().await.unwrap();
        let claims = Claims {
            id: admin.user.id,
            role: Role::Admin,
            iat: 0,
            exp: 0,
        };

        let context = service.session(&claims).await.unwrap();
        assert!(context.is_admin());

        let stranger = Claims {
            id: Uuid::new_v4(),
            ..claims
        };
        assert!(service.session(&stranger).await.is_err());
    }
}
