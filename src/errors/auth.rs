use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication and authorization error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid email or password (never reveals which check failed)
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Caller's role is not in the allowed set
    #[oai(status = 403)]
    InsufficientRole(Json<AuthErrorResponse>),

    /// Caller's role lacks a required permission
    #[oai(status = 403)]
    InsufficientPermission(Json<AuthErrorResponse>),

    /// Current password did not verify during a password change
    #[oai(status = 400)]
    InvalidCurrentPassword(Json<AuthErrorResponse>),

    /// Email already registered
    #[oai(status = 400)]
    DuplicateEmail(Json<AuthErrorResponse>),

    /// User record not found
    #[oai(status = 404)]
    UserNotFound(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid credentials".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(AuthErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or expired token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(AuthErrorResponse {
            error: "expired_token".to_string(),
            message: "Invalid or expired token".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InsufficientRole error
    pub fn insufficient_role() -> Self {
        AuthError::InsufficientRole(Json(AuthErrorResponse {
            error: "insufficient_role".to_string(),
            message: "Insufficient permissions".to_string(),
            status_code: 403,
        }))
    }

    /// Create an InsufficientPermission error
    pub fn insufficient_permission(permission: &str) -> Self {
        AuthError::InsufficientPermission(Json(AuthErrorResponse {
            error: "insufficient_permission".to_string(),
            message: format!("Missing required permission: {}", permission),
            status_code: 403,
        }))
    }

    /// Create an InvalidCurrentPassword error
    pub fn invalid_current_password() -> Self {
        AuthError::InvalidCurrentPassword(Json(AuthErrorResponse {
            error: "invalid_current_password".to_string(),
            message: "Current password is incorrect".to_string(),
            status_code: 400,
        }))
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(AuthErrorResponse {
            error: "duplicate_email".to_string(),
            message: "User with this email already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create a UserNotFound error
    pub fn user_not_found() -> Self {
        AuthError::UserNotFound(Json(AuthErrorResponse {
            error: "user_not_found".to_string(),
            message: "User not found".to_string(),
            status_code: 404,
        }))
    }

    /// Create an InternalError, logging the detail server-side only
    pub fn internal_error(message: String) -> Self {
        tracing::error!("internal auth error: {}", message);
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message: "Internal server error".to_string(),
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::InsufficientRole(json) => json.0.message.clone(),
            AuthError::InsufficientPermission(json) => json.0.message.clone(),
            AuthError::InvalidCurrentPassword(json) => json.0.message.clone(),
            AuthError::DuplicateEmail(json) => json.0.message.clone(),
            AuthError::UserNotFound(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
