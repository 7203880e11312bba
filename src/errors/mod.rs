// Errors layer - Error type definitions
pub mod api;
pub mod auth;

// Re-exports for convenience
pub use api::ApiError;
pub use auth::AuthError;
