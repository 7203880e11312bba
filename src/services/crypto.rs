use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::Rng;

use crate::errors::auth::AuthError;
use crate::types::internal::auth::Role;

/// Hash a password with Argon2id and a fresh random salt
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored Argon2 hash
///
/// A malformed stored hash verifies as false rather than erroring, so
/// callers cannot distinguish it from a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Generate a human-readable staff number: role prefix, department prefix
/// and a random four digit suffix, e.g. `DOCCAR4821`
pub fn generate_staff_number(role: Role, department: &str) -> String {
    let dept_prefix: String = department
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    let dept_prefix = if dept_prefix.is_empty() {
        "GEN".to_string()
    } else {
        dept_prefix
    };

    let mut rng = rand::rng();
    let suffix: u32 = rng.random_range(1000..10000);

    format!("{}{}{}", role.staff_prefix(), dept_prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn staff_number_uses_role_and_department_prefixes() {
        let number = generate_staff_number(Role::Doctor, "Cardiology");
        assert!(number.starts_with("DOCCAR"));
        assert_eq!(number.len(), 10);
    }

    #[test]
    fn staff_number_falls_back_to_general_department() {
        let number = generate_staff_number(Role::Nurse, "");
        assert!(number.starts_with("NURGEN"));
    }
}
