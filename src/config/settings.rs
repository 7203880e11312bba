use std::env;

use crate::services::scheduling::ConflictPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVariable(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Application settings, loaded once from the environment at startup
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub jwt_expiration_minutes: i64,
    pub conflict_policy: ConflictPolicy,
    /// When set, the booking conflict check and insert share a transaction;
    /// when cleared, the historical unguarded check-then-insert is kept.
    pub atomic_booking: bool,
}

impl AppSettings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://hospital.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVariable("JWT_SECRET"))?;

        // Tokens default to a 7 day lifetime
        let jwt_expiration_minutes = match env::var("JWT_EXPIRES_MINUTES") {
            Ok(value) => value
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRES_MINUTES", value))?,
            Err(_) => 7 * 24 * 60,
        };

        let conflict_policy = match env::var("SLOT_CONFLICT_POLICY") {
            Ok(value) => ConflictPolicy::parse(&value)
                .ok_or(ConfigError::InvalidValue("SLOT_CONFLICT_POLICY", value))?,
            Err(_) => ConflictPolicy::default(),
        };

        let atomic_booking = match env::var("ATOMIC_BOOKING") {
            Ok(value) => value
                .parse::<bool>()
                .map_err(|_| ConfigError::InvalidValue("ATOMIC_BOOKING", value))?,
            Err(_) => true,
        };

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            jwt_expiration_minutes,
            conflict_policy,
            atomic_booking,
        })
    }
}
