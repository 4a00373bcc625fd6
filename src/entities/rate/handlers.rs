//! Rate HTTP handlers

use super::model::RateInput;
use crate::core::error::GymResult;
use crate::core::validation::{EntityId, Validated};
use crate::server::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

pub async fn list_rates(State(state): State<AppState>) -> GymResult<Json<Value>> {
    let rates = state.rates.list().await?;
    Ok(Json(json!({
        "success": true,
        "data": rates
    })))
}

pub async fn create_rate(
    State(state): State<AppState>,
    Validated(input): Validated<RateInput>,
) -> GymResult<(StatusCode, Json<Value>)> {
    let rate = state.rates.create(input.into_draft()?).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": rate
        })),
    ))
}

pub async fn update_rate(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Validated(input): Validated<RateInput>,
) -> GymResult<Json<Value>> {
    let rate = state.rates.update(&id, input.into_draft()?).await?;
    Ok(Json(json!({
        "success": true,
        "data": rate
    })))
}

pub async fn delete_rate(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> GymResult<Json<Value>> {
    state.rates.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Rate deleted successfully"
    })))
}
