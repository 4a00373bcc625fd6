//! Authorization primitives
//!
//! A request carries an explicit [`AuthContext`] (injected by the
//! `authenticate` middleware) and each route group declares an
//! [`AuthPolicy`]. Roles form a closed, flat set: a policy lists the roles it
//! admits and nothing is inherited.

use crate::core::error::{GymError, GymResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Closed set of roles governing endpoint access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Customer,
    Member,
    Trainer,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Staff,
        Role::Customer,
        Role::Member,
        Role::Trainer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Customer => "customer",
            Role::Member => "member",
            Role::Trainer => "trainer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = GymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| GymError::invalid(format!("Unknown role: {}", s)))
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated user, resolved from the session cookie
    User {
        user_id: Uuid,
        user_name: String,
        role: Role,
    },

    /// No session
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            AuthContext::User { role, .. } => Some(*role),
            AuthContext::Anonymous => None,
        }
    }

    /// Check if context represents an admin
    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    /// Fail with 403 unless the context satisfies `policy`
    pub fn require(&self, policy: &AuthPolicy) -> GymResult<()> {
        if policy.check(self) {
            Ok(())
        } else {
            Err(GymError::forbidden(
                "You do not have permission to perform this action",
            ))
        }
    }

    /// Owner-or-admin gate for per-user resources
    pub fn require_owner_or_admin(&self, resource_owner: &Uuid) -> GymResult<()> {
        let is_owner = self.user_id().as_ref() == Some(resource_owner);
        if is_owner || self.is_admin() {
            Ok(())
        } else {
            Err(GymError::forbidden(
                "Access denied. You can only update your own account or must be an admin.",
            ))
        }
    }
}

/// Authorization policy for a route group
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// User must have one of these roles
    HasRole(Vec<Role>),
}

impl AuthPolicy {
    pub fn admin_only() -> Self {
        AuthPolicy::HasRole(vec![Role::Admin])
    }

    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,

            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),

            AuthPolicy::HasRole(allowed) => context.role().is_some_and(|r| allowed.contains(&r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthContext {
        AuthContext::User {
            user_id: Uuid::new_v4(),
            user_name: "someone01".to_string(),
            role,
        }
    }

    #[test]
    fn test_policy_check() {
        let admin = user(Role::Admin);
        assert!(AuthPolicy::Authenticated.check(&admin));
        assert!(AuthPolicy::admin_only().check(&admin));

        let anon = AuthContext::Anonymous;
        assert!(AuthPolicy::Public.check(&anon));
        assert!(!AuthPolicy::Authenticated.check(&anon));
        assert!(!AuthPolicy::admin_only().check(&anon));
    }

    #[test]
    fn test_roles_do_not_inherit() {
        // staff is not a lesser admin, and admin is not implicitly staff
        assert!(!AuthPolicy::admin_only().check(&user(Role::Staff)));
        assert!(!AuthPolicy::HasRole(vec![Role::Staff]).check(&user(Role::Admin)));
        assert!(AuthPolicy::HasRole(vec![Role::Staff, Role::Trainer]).check(&user(Role::Trainer)));
    }

    #[test]
    fn test_require_maps_to_forbidden() {
        let err = user(Role::Member)
            .require(&AuthPolicy::admin_only())
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_owner_or_admin() {
        let owner_id = Uuid::new_v4();
        let owner = AuthContext::User {
            user_id: owner_id,
            user_name: "owner0001".to_string(),
            role: Role::Member,
        };
        assert!(owner.require_owner_or_admin(&owner_id).is_ok());
        assert!(user(Role::Admin).require_owner_or_admin(&owner_id).is_ok());
        assert!(user(Role::Staff).require_owner_or_admin(&owner_id).is_err());
        assert!(AuthContext::Anonymous.require_owner_or_admin(&owner_id).is_err());
    }

    #[test]
    fn test_role_round_trip_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("coach".parse::<Role>().is_err());
        assert_eq!(serde_json::to_value(Role::Trainer).unwrap(), "trainer");
    }
}
