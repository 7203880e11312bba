use poem_openapi::{payload::Json, ApiResponse, Object};
use sea_orm::DbErr;
use std::fmt;

use crate::errors::auth::AuthError;

/// Standardized error response body for domain endpoints
#[derive(Object, Debug)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional field-level detail
    pub details: Option<String>,
}

/// Domain error types shared by the patient, appointment and dashboard APIs
#[derive(ApiResponse, Debug)]
pub enum ApiError {
    /// Malformed input or a domain conflict (duplicate unique field, slot taken)
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),

    /// Missing or invalid bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),

    /// Role or permission mismatch
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),

    /// Referenced record does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// Unexpected store or runtime error, message redacted
    #[oai(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl ApiError {
    fn bad_request(error: impl Into<String>, details: Option<String>) -> Self {
        ApiError::BadRequest(Json(ErrorResponse {
            error: error.into(),
            details,
        }))
    }

    /// Create a validation error with field-level detail
    pub fn validation(details: impl Into<String>) -> Self {
        Self::bad_request("Validation failed", Some(details.into()))
    }

    /// Create a PatientNotFound error (400, referential check on create)
    pub fn patient_not_found() -> Self {
        Self::bad_request("Patient not found", None)
    }

    /// Create a DoctorNotFound error (400, referential check on create)
    pub fn doctor_not_found() -> Self {
        Self::bad_request("Doctor not found", None)
    }

    /// Create a SlotConflict error
    pub fn slot_conflict() -> Self {
        Self::bad_request("Doctor is not available at this time", None)
    }

    /// Create a duplicate national id conflict error
    pub fn duplicate_national_id() -> Self {
        Self::bad_request("Patient with this National ID already exists", None)
    }

    /// Create a NotFound error for a missing record
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(Json(ErrorResponse {
            error: format!("{} not found", what),
            details: None,
        }))
    }

    /// Create an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(Json(ErrorResponse {
            error: message.into(),
            details: None,
        }))
    }

    /// Create a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(Json(ErrorResponse {
            error: message.into(),
            details: None,
        }))
    }

    /// Create an Internal error, logging the detail server-side only
    pub fn internal(message: impl Into<String>) -> Self {
        tracing::error!("internal error: {}", message.into());
        ApiError::Internal(Json(ErrorResponse {
            error: "Internal server error".to_string(),
            details: None,
        }))
    }

    /// Convert a database error into a redacted internal error
    pub fn database(err: DbErr) -> Self {
        Self::internal(format!("Database error: {}", err))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(json) => json.0.error.clone(),
            ApiError::Unauthorized(json) => json.0.error.clone(),
            ApiError::Forbidden(json) => json.0.error.clone(),
            ApiError::NotFound(json) => json.0.error.clone(),
            ApiError::Internal(json) => json.0.error.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials(_)
            | AuthError::InvalidToken(_)
            | AuthError::ExpiredToken(_) => Self::unauthorized(err.message()),
            AuthError::InsufficientRole(_) | AuthError::InsufficientPermission(_) => {
                Self::forbidden(err.message())
            }
            AuthError::InvalidCurrentPassword(_) | AuthError::DuplicateEmail(_) => {
                Self::bad_request(err.message(), None)
            }
            AuthError::UserNotFound(_) => Self::not_found("User"),
            AuthError::InternalError(_) => ApiError::Internal(Json(ErrorResponse {
                error: "Internal server error".to_string(),
                details: None,
            })),
        }
    }
}
