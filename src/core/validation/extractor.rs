//! Axum extractors for request payloads and path identifiers
//!
//! All rejections are converted into [`GymError`] so that malformed input
//! produces the same JSON error body as any other validation failure.

use crate::core::error::{GymError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// JSON body whose deserialization failures become validation errors
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = GymError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
            GymError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;
        Ok(JsonBody(payload))
    }
}

/// Axum extractor that deserializes then validates a payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_rate(
///     Validated(input): Validated<RateInput>,
/// ) -> GymResult<Json<Value>> {
///     // input already passed its #[validate(...)] rules
/// }
/// ```
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = GymError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(payload) = JsonBody::<T>::from_request(req, state).await?;
        payload
            .validate()
            .map_err(|errors| GymError::Validation(errors.into()))?;
        Ok(Validated(payload))
    }
}

/// `:id` path segment parsed as a document id
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub Uuid);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = GymError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| GymError::invalid(e.body_text()))?;
        parse_id(&raw).map(EntityId)
    }
}

/// Parse a document id supplied by a client
pub fn parse_id(raw: &str) -> Result<Uuid, GymError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        GymError::Validation(ValidationError::InvalidId {
            value: raw.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_validated_accepts_good_payload() {
        let Validated(payload) = Validated::<Payload>::from_request(json_request(r#"{"name":"x"}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.name, "x");
    }

    #[tokio::test]
    async fn test_validated_rejects_rule_violation() {
        let err = Validated::<Payload>::from_request(json_request(r#"{"name":""}"#), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[tokio::test]
    async fn test_bad_json_is_a_validation_error() {
        let err = JsonBody::<Payload>::from_request(json_request("{nope"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "INVALID_JSON");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_id("42").unwrap_err().error_code(), "INVALID_ID");
    }
}
