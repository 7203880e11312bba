use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use chrono::Utc;
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::db::user;
use crate::types::internal::auth::{Claims, Role};

/// Manages JWT token generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret and token lifetime
    pub fn new(jwt_secret: String, jwt_expiration_minutes: i64) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes,
        }
    }

    /// Generate a JWT for the given user record
    ///
    /// The payload embeds the user id, email, role and optional staff id.
    ///
    /// # Returns
    /// * `Result<String, AuthError>` - The encoded JWT or an error
    pub fn generate_jwt(&self, user: &user::Model) -> Result<String, AuthError> {
        let role = Role::parse(&user.role)
            .ok_or_else(|| AuthError::internal_error(format!("Unknown role: {}", user.role)))?;

        let now = Utc::now().timestamp();
        let expiration = now + (self.jwt_expiration_minutes * 60);

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role,
            staff_id: user.staff_id.clone(),
            exp: expiration,
            iat: now,
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate JWT: {}", e)))?;

        Ok(token)
    }

    /// Validate a JWT and return the claims
    ///
    /// # Returns
    /// * `Result<Claims, AuthError>` - The decoded claims or an error
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            // Check if the error is due to expiration
            if e.to_string().contains("ExpiredSignature") {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .finish()
    }
}
