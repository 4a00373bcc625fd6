//! Validity HTTP handlers

use super::model::ValidityInput;
use crate::core::error::GymResult;
use crate::core::validation::{EntityId, JsonBody};
use crate::server::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

pub async fn list_validities(State(state): State<AppState>) -> GymResult<Json<Value>> {
    let validities = state.validities.list().await?;
    Ok(Json(json!({
        "success": true,
        "data": validities
    })))
}

pub async fn create_validity(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ValidityInput>,
) -> GymResult<(StatusCode, Json<Value>)> {
    let validity = state.validities.create(input.into_period()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": validity
        })),
    ))
}

pub async fn update_validity(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<ValidityInput>,
) -> GymResult<Json<Value>> {
    let validity = state.validities.update(&id, input.into_period()?).await?;
    Ok(Json(json!({
        "success": true,
        "data": validity
    })))
}

pub async fn delete_validity(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> GymResult<Json<Value>> {
    state.validities.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Validity deleted successfully"
    })))
}
