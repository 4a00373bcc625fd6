//! Session endpoints: login, logout, check and admin bootstrap

use super::service::Credentials;
use crate::core::auth::AuthContext;
use crate::core::error::{GymError, GymResult};
use crate::core::session::TOKEN_COOKIE;
use crate::core::validation::JsonBody;
use crate::entities::user::PublicUser;
use crate::server::state::AppState;
use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(credentials): JsonBody<Credentials>,
) -> GymResult<impl IntoResponse> {
    let user = state.auth.login(credentials).await?;
    let token = state.tokens.issue(user.id, user.role)?;
    let bearer = format!("Bearer {}", token);

    Ok((
        jar.add(state.tokens.session_cookie(token)),
        [(header::AUTHORIZATION, bearer)],
        Json(json!({
            "user": PublicUser::from(user),
            "message": "Login successful"
        })),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> GymResult<impl IntoResponse> {
    if jar.get(TOKEN_COOKIE).is_none() {
        return Err(GymError::unauthenticated("No active session found"));
    }

    Ok((
        jar.remove(state.tokens.removal_cookie()),
        Json(json!({
            "success": true,
            "message": "Logged out successfully"
        })),
    ))
}

pub async fn check(Extension(context): Extension<AuthContext>) -> GymResult<Json<Value>> {
    match context {
        AuthContext::User {
            user_id,
            user_name,
            role,
        } => Ok(Json(json!({
            "user": {
                "_id": user_id,
                "userName": user_name,
                "role": role
            }
        }))),
        AuthContext::Anonymous => Err(GymError::unauthenticated("Not authenticated")),
    }
}

pub async fn check_admin(State(state): State<AppState>) -> GymResult<Json<Value>> {
    let has_admin = state.auth.has_admin().await?;
    Ok(Json(json!({ "hasAdmin": has_admin })))
}

/// The generated password is returned here and never again
pub async fn create_admin(
    State(state): State<AppState>,
    jar: CookieJar,
) -> GymResult<impl IntoResponse> {
    let admin = state.auth.create_admin().await?;
    let token = state.tokens.issue(admin.user.id, admin.user.role)?;
    let bearer = format!("Bearer {}", token);

    Ok((
        StatusCode::CREATED,
        jar.add(state.tokens.session_cookie(token)),
        [(header::AUTHORIZATION, bearer)],
        Json(json!({
            "message": "Admin user created successfully",
            "adminCredentials": {
                "userName": admin.user.user_name,
                "password": admin.password,
                "role": admin.user.role
            }
        })),
    ))
}
