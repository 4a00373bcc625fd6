//! Typed error handling for gymdesk
//!
//! Every handler returns [`GymResult`], so failures always reach the client
//! as a JSON body of the shape `{success: false, code, message, error?}`.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed or out-of-policy input (400)
//! - [`ConflictError`]: uniqueness and referential violations (400)
//! - [`GymError::NotFound`]: missing identifier (404)
//! - [`GymError::Authentication`]: missing or invalid credentials/token (401)
//! - [`GymError::Authorization`]: role or ownership mismatch (403)
//! - [`StorageError`]: unexpected store failure (500)
//!
//! # Example
//!
//! ```rust,ignore
//! use gymdesk::prelude::*;
//!
//! async fn load(id: Uuid) -> GymResult<Validity> {
//!     store.get(&id).await?.ok_or_else(|| GymError::not_found("Validity", id))
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for gymdesk
#[derive(Debug, Error)]
pub enum GymError {
    /// Malformed or out-of-policy input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Uniqueness or referential-integrity violation
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Identifier does not resolve to a stored document, or a listing is empty
    #[error("{message}")]
    NotFound { message: String, id: Option<Uuid> },

    /// Missing or invalid credentials or session token
    #[error("{message}")]
    Authentication { message: String },

    /// Authenticated, but not allowed to perform the action
    #[error("{message}")]
    Authorization { message: String },

    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable message, shown by the client as a notification
    pub message: String,
    /// Underlying cause, only for unexpected failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldValidationError>>,
}

impl GymError {
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        GymError::NotFound {
            message: format!("{} not found", entity_type),
            id: Some(id),
        }
    }

    /// A listing that the client expects to be non-empty came back empty
    pub fn nothing_found(message: impl Into<String>) -> Self {
        GymError::NotFound {
            message: message.into(),
            id: None,
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        GymError::Authentication {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        GymError::Authorization {
            message: message.into(),
        }
    }

    /// Shorthand for a single-message validation failure
    pub fn invalid(message: impl Into<String>) -> Self {
        GymError::Validation(ValidationError::Invalid {
            message: message.into(),
        })
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GymError::Validation(_) => StatusCode::BAD_REQUEST,
            GymError::Conflict(_) => StatusCode::BAD_REQUEST,
            GymError::NotFound { .. } => StatusCode::NOT_FOUND,
            GymError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            GymError::Authorization { .. } => StatusCode::FORBIDDEN,
            GymError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GymError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GymError::Validation(e) => e.error_code(),
            GymError::Conflict(e) => e.error_code(),
            GymError::NotFound { .. } => "NOT_FOUND",
            GymError::Authentication { .. } => "UNAUTHENTICATED",
            GymError::Authorization { .. } => "FORBIDDEN",
            GymError::Storage(_) => "STORAGE_ERROR",
            GymError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        let (message, error) = match self {
            GymError::Storage(e) => ("Unexpected storage failure".to_string(), Some(e.to_string())),
            GymError::Internal(msg) => ("Unexpected server error".to_string(), Some(msg.clone())),
            other => (other.to_string(), None),
        };

        let fields = match self {
            GymError::Validation(ValidationError::FieldErrors(errors)) => Some(errors.clone()),
            _ => None,
        };

        ErrorResponse {
            success: false,
            code: self.error_code().to_string(),
            message,
            error,
            fields,
        }
    }
}

impl IntoResponse for GymError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single message, mirrored from the business rule that rejected the input
    #[error("{message}")]
    Invalid { message: String },

    /// Multiple field validation errors
    #[error("{}", join_messages(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body could not be parsed
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Identifier in the path or body is not a valid id
    #[error("Invalid id format: {value}")]
    InvalidId { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_messages(errors: &[FieldValidationError]) -> String {
    let mut messages: Vec<&str> = Vec::with_capacity(errors.len());
    for e in errors {
        if !messages.contains(&e.message.as_str()) {
            messages.push(&e.message);
        }
    }
    messages.join("; ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Invalid { .. } => "VALIDATION_ERROR",
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidId { .. } => "INVALID_ID",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                })
            })
            .collect();
        // HashMap order is unstable; keep responses deterministic
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Conflict Errors
// =============================================================================

/// Uniqueness and referential-integrity violations
#[derive(Debug, Error)]
pub enum ConflictError {
    #[error("Validity with this duration already exists")]
    DuplicateDuration { months: u32, days: u32 },

    #[error("Cannot delete validity as it is being used by existing rates")]
    ValidityInUse { id: Uuid, rate_count: u64 },

    #[error("Rate with this name already exists")]
    DuplicateRateName { name: String },

    #[error("Username already exists")]
    DuplicateUserName { user_name: String },

    #[error("Phone number already exists")]
    DuplicatePhoneNumber { phone_number: String },

    #[error("Admin user already exists")]
    AdminExists,
}

impl ConflictError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConflictError::DuplicateDuration { .. } => "DUPLICATE_DURATION",
            ConflictError::ValidityInUse { .. } => "VALIDITY_IN_USE",
            ConflictError::DuplicateRateName { .. } => "DUPLICATE_RATE_NAME",
            ConflictError::DuplicateUserName { .. } => "DUPLICATE_USER_NAME",
            ConflictError::DuplicatePhoneNumber { .. } => "DUPLICATE_PHONE_NUMBER",
            ConflictError::AdminExists => "ADMIN_EXISTS",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to {backend}: {message}")]
    Connection { backend: String, message: String },

    #[error("Storage query failed: {message}")]
    Query { message: String },
}

/// Store traits speak `anyhow`; anything surfacing from them is a backend failure
impl From<anyhow::Error> for GymError {
    fn from(err: anyhow::Error) -> Self {
        GymError::Storage(StorageError::Query {
            message: err.to_string(),
        })
    }
}

impl From<bcrypt::BcryptError> for GymError {
    fn from(err: bcrypt::BcryptError) -> Self {
        GymError::Internal(format!("password hashing failed: {}", err))
    }
}

/// A specialized Result type for gymdesk operations
pub type GymResult<T> = Result<T, GymError>;
