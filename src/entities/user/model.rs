//! User documents and the payloads that create or edit them

use crate::core::auth::Role;
use crate::core::validation::filters::{lenient_date, non_empty};
use crate::core::validation::validators::{
    PHONE_NUMBER_RE, USER_NAME_RE, validate_age, validate_password,
};
use crate::{document_struct, impl_entity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

document_struct! {
    /// A person with a login: admin, staff, or gym client
    pub struct User {
        pub first_name: String,
        pub last_name: String,
        pub gender: String,
        pub birth_date: NaiveDate,
        pub address: String,
        pub phone_number: String,
        pub user_name: String,
        /// bcrypt hash, never sent to clients
        pub password: String,
        pub role: Role,
    }
}

impl_entity!(User, "users", "User");

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            user_name: self.user_name.clone(),
            role: self.role,
        }
    }
}

/// User without credentials, as returned by listings and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub address: String,
    pub phone_number: String,
    pub user_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            birth_date: user.birth_date,
            address: user.address,
            phone_number: user.phone_number,
            user_name: user.user_name,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_name: String,
    pub role: Role,
}

/// Body of `create-user`; every field is required
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    #[serde(default, deserialize_with = "non_empty")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "lenient_date")]
    #[validate(custom(function = "validate_age"))]
    pub birth_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "non_empty")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(regex(
        path = *PHONE_NUMBER_RE,
        message = "Phone number must start with 09 followed by 9 digits"
    ))]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(regex(
        path = *USER_NAME_RE,
        message = "Username must be 8-16 characters long and contain only letters and numbers"
    ))]
    pub user_name: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(custom(function = "validate_password"))]
    pub password: Option<String>,

    #[serde(default)]
    pub role: Option<Role>,
}

/// A create-user request with every field present
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub address: String,
    pub phone_number: String,
    pub user_name: String,
    pub password: String,
    pub role: Role,
}

impl CreateUserInput {
    /// `None` when any field is missing or blank
    pub fn complete(self) -> Option<NewUser> {
        Some(NewUser {
            first_name: self.first_name?,
            last_name: self.last_name?,
            gender: self.gender?,
            birth_date: self.birth_date?,
            address: self.address?,
            phone_number: self.phone_number?,
            user_name: self.user_name?,
            password: self.password?,
            role: self.role?,
        })
    }
}

/// Body of `update-profile`; blank or missing fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[serde(default, deserialize_with = "non_empty")]
    pub first_name: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub last_name: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "lenient_date")]
    #[validate(custom(function = "validate_age"))]
    pub birth_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "non_empty")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(regex(
        path = *PHONE_NUMBER_RE,
        message = "Phone number must start with 09 followed by 9 digits"
    ))]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(regex(
        path = *USER_NAME_RE,
        message = "Username must be 8-16 characters long and contain only letters and numbers"
    ))]
    pub user_name: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    #[validate(custom(function = "validate_password"))]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::validators::{AGE_MESSAGE, PASSWORD_MESSAGE};
    use chrono::{Datelike, Months};
    use serde_json::{Value, json};

    fn birth_date_aged(years: u32) -> String {
        let today = Utc::now().date_naive();
        (today - Months::new(12 * years)).format("%Y-%m-%d").to_string()
    }

    fn full_payload() -> Value {
        json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "gender": "Female",
            "birthDate": birth_date_aged(30),
            "address": "1 Main St",
            "phoneNumber": "09123456789",
            "userName": "janedoe01",
            "password": "Secret#Pass1",
            "role": "staff"
        })
    }

    fn messages(errors: validator::ValidationErrors) -> Vec<String> {
        match crate::core::error::ValidationError::from(errors) {
            crate::core::error::ValidationError::FieldErrors(fields) => {
                fields.into_iter().map(|f| f.message).collect()
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_complete_payload_is_valid() {
        let input: CreateUserInput = serde_json::from_value(full_payload()).unwrap();
        assert!(input.validate().is_ok());

        let user = input.complete().unwrap();
        assert_eq!(user.role, Role::Staff);
        assert_eq!(user.birth_date.year(), Utc::now().date_naive().year() - 30);
    }

    #[test]
    fn test_blank_field_is_incomplete() {
        let mut payload = full_payload();
        payload["address"] = json!("   ");
        let input: CreateUserInput = serde_json::from_value(payload).unwrap();
        assert!(input.complete().is_none());
    }

    #[test]
    fn test_format_rules() {
        let mut payload = full_payload();
        payload["password"] = json!("weakpass");
        payload["birthDate"] = json!(birth_date_aged(60));
        let input: CreateUserInput = serde_json::from_value(payload).unwrap();

        let found = messages(input.validate().unwrap_err());
        assert!(found.contains(&PASSWORD_MESSAGE.to_string()));
        assert!(found.contains(&AGE_MESSAGE.to_string()));
    }

    #[test]
    fn test_unknown_role_does_not_parse() {
        let mut payload = full_payload();
        payload["role"] = json!("coach");
        assert!(serde_json::from_value::<CreateUserInput>(payload).is_err());
    }

    #[test]
    fn test_profile_update_only_checks_provided_fields() {
        let input: UpdateProfileInput = serde_json::from_value(json!({"address": "2 Side St"})).unwrap();
        assert!(input.validate().is_ok());

        let input: UpdateProfileInput =
            serde_json::from_value(json!({"phoneNumber": "12345", "userName": ""})).unwrap();
        assert_eq!(
            messages(input.validate().unwrap_err()),
            vec!["Phone number must start with 09 followed by 9 digits"]
        );
    }

    #[test]
    fn test_public_user_has_no_password() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            gender: "Female".to_string(),
            birth_date: now.date_naive(),
            address: "1 Main St".to_string(),
            phone_number: "09123456789".to_string(),
            user_name: "janedoe01".to_string(),
            password: "$2b$04$hash".to_string(),
            role: Role::Staff,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(user.full_name(), "Jane Doe");

        let value = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["userName"], json!("janedoe01"));
        assert_eq!(value["role"], json!("staff"));
    }
}
