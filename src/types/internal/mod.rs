pub mod auth;
pub mod scheduling;
