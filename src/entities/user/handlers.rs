//! User administration and profile handlers

use super::model::{CreateUserInput, UpdateProfileInput};
use crate::core::auth::AuthContext;
use crate::core::error::GymResult;
use crate::core::validation::{EntityId, JsonBody};
use crate::server::state::AppState;
use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};

pub async fn list_staff(State(state): State<AppState>) -> GymResult<Json<Value>> {
    let staff = state.users.list_staff().await?;
    Ok(Json(json!({
        "success": true,
        "count": staff.len(),
        "data": staff
    })))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateUserInput>,
) -> GymResult<(StatusCode, Json<Value>)> {
    let user = state.users.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("{} created successfully", user.full_name()),
            "user": user.summary()
        })),
    ))
}

pub async fn delete_user(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> GymResult<Json<Value>> {
    let user = state.users.delete(&id).await?;
    Ok(Json(json!({
        "message": format!("{} deleted successfully", user.full_name())
    })))
}

/// Owners may edit themselves; admins may edit anyone
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateProfileInput>,
) -> GymResult<Json<Value>> {
    context.require_owner_or_admin(&id)?;

    let user = state.users.update_profile(&id, input).await?;
    Ok(Json(json!({
        "message": format!("{} updated successfully", user.full_name()),
        "user": user.summary()
    })))
}
