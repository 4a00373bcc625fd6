//! Staff administration and profile edits

use super::model::{CreateUserInput, NewUser, PublicUser, UpdateProfileInput, User};
use crate::core::auth::Role;
use crate::core::error::{ConflictError, GymError, GymResult};
use crate::core::password::PasswordHasher;
use crate::core::service::{Criteria, DataService};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn DataService<User>>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(users: Arc<dyn DataService<User>>, hasher: PasswordHasher) -> Self {
        Self { users, hasher }
    }

    pub async fn get(&self, id: &Uuid) -> GymResult<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| GymError::not_found("User", *id))
    }

    pub async fn find_by_user_name(&self, user_name: &str) -> GymResult<Option<User>> {
        let mut found = self
            .users
            .search(&Criteria::new().eq("userName", user_name))
            .await?;
        Ok(found.pop())
    }

    pub async fn count_by_role(&self, role: Role) -> GymResult<u64> {
        Ok(self
            .users
            .count(&Criteria::new().eq("role", role.as_str()))
            .await?)
    }

    /// Staff members ordered by last name, then first name
    pub async fn list_staff(&self) -> GymResult<Vec<PublicUser>> {
        let mut staff = self
            .users
            .search(&Criteria::new().eq("role", Role::Staff.as_str()))
            .await?;
        if staff.is_empty() {
            return Err(GymError::nothing_found("No staff members found"));
        }

        staff.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(staff.into_iter().map(PublicUser::from).collect())
    }

    async fn ensure_unique_phone(&self, phone_number: &str, exclude: Option<&Uuid>) -> GymResult<()> {
        let taken = self
            .users
            .search(&Criteria::new().eq("phoneNumber", phone_number))
            .await?
            .into_iter()
            .any(|u| Some(&u.id) != exclude);
        if taken {
            return Err(ConflictError::DuplicatePhoneNumber {
                phone_number: phone_number.to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn ensure_unique_user_name(&self, user_name: &str, exclude: Option<&Uuid>) -> GymResult<()> {
        let taken = self
            .users
            .search(&Criteria::new().eq("userName", user_name))
            .await?
            .into_iter()
            .any(|u| Some(&u.id) != exclude);
        if taken {
            return Err(ConflictError::DuplicateUserName {
                user_name: user_name.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Register a user from an admin-submitted form
    pub async fn create(&self, input: CreateUserInput) -> GymResult<User> {
        let checked = input.validate();
        // a missing field is reported before any format problem
        let new_user = input
            .complete()
            .ok_or_else(|| GymError::invalid("Please fill all the required fields"))?;
        checked.map_err(|e| GymError::Validation(e.into()))?;

        self.ensure_unique_phone(&new_user.phone_number, None).await?;
        self.ensure_unique_user_name(&new_user.user_name, None).await?;

        let user = self.build_user(new_user).await?;
        let created = self.users.create(user).await?;

        tracing::info!(id = %created.id, user_name = %created.user_name, role = %created.role, "user created");
        Ok(created)
    }

    async fn build_user(&self, new_user: NewUser) -> GymResult<User> {
        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            gender: new_user.gender,
            birth_date: new_user.birth_date,
            address: new_user.address,
            phone_number: new_user.phone_number,
            user_name: new_user.user_name,
            password: self.hasher.hash(&new_user.password).await?,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Remove a user, returning the deleted document
    pub async fn delete(&self, id: &Uuid) -> GymResult<User> {
        let user = self.get(id).await?;
        self.users.delete(id).await?;
        tracing::info!(id = %id, user_name = %user.user_name, "user deleted");
        Ok(user)
    }

    /// Apply the provided, non-blank fields of a profile edit
    pub async fn update_profile(&self, id: &Uuid, input: UpdateProfileInput) -> GymResult<User> {
        let mut user = self.get(id).await?;
        input
            .validate()
            .map_err(|e| GymError::Validation(e.into()))?;

        if let Some(phone_number) = &input.phone_number {
            self.ensure_unique_phone(phone_number, Some(id)).await?;
        }
        if let Some(user_name) = &input.user_name {
            self.ensure_unique_user_name(user_name, Some(id)).await?;
        }

        let UpdateProfileInput {
            first_name,
            last_name,
            gender,
            birth_date,
            address,
            phone_number,
            user_name,
            password,
        } = input;

        if let Some(password) = password {
            user.password = self.hasher.hash(&password).await?;
        }
        if let Some(v) = first_name {
            user.first_name = v;
        }
        if let Some(v) = last_name {
            user.last_name = v;
        }
        if let Some(v) = gender {
            user.gender = v;
        }
        if let Some(v) = birth_date {
            user.birth_date = v;
        }
        if let Some(v) = address {
            user.address = v;
        }
        if let Some(v) = phone_number {
            user.phone_number = v;
        }
        if let Some(v) = user_name {
            user.user_name = v;
        }
        user.updated_at = Utc::now();

        let updated = self.users.update(id, user).await?;
        tracing::info!(id = %id, user_name = %updated.user_name, "profile updated");
        Ok(updated)
    }
}
