pub mod appointments;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod patients;
