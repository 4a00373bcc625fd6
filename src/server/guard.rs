//! Authentication and authorization middleware
//!
//! `authenticate` turns the session cookie into an [`AuthContext`] request
//! extension; `authorize` checks that context against a route group's
//! [`AuthPolicy`]. Handlers read the context with `Extension<AuthContext>`.

use super::state::AppState;
use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::error::{GymError, GymResult};
use crate::core::session::TOKEN_COOKIE;
use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

/// Resolve the session cookie to the current user
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> GymResult<Response> {
    let token = jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| GymError::unauthenticated("Access denied. No token provided."))?;

    let claims = state.tokens.verify(token)?;
    let context = state.auth.session(&claims).await?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Enforce a route group's policy on the authenticated context
pub async fn authorize(
    State(policy): State<AuthPolicy>,
    req: Request,
    next: Next,
) -> GymResult<Response> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or(AuthContext::Anonymous);

    if let Err(err) = context.require(&policy) {
        tracing::warn!(
            path = %req.uri().path(),
            role = ?context.role(),
            "request rejected by role policy"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}

/// Wrap every route of `router` with authentication then `policy`
pub fn protect(router: Router<AppState>, state: &AppState, policy: AuthPolicy) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(policy, authorize))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
}
