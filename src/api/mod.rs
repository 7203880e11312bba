// API layer - HTTP endpoints
pub mod appointments;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod patients;

pub use appointments::AppointmentApi;
pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use health::HealthApi;
pub use patients::PatientApi;

use poem_openapi::{auth::Bearer, SecurityScheme};

use crate::errors::auth::AuthError;
use crate::services::{PermissionTable, TokenService};
use crate::types::internal::auth::{Claims, Role};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Decode and validate the bearer token, returning the caller's claims
pub fn authenticate(tokens: &TokenService, auth: &BearerAuth) -> Result<Claims, AuthError> {
    tokens.validate_jwt(&auth.0.token)
}

/// Require that the caller's role is one of the allowed roles
pub fn require_role(claims: &Claims, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(AuthError::insufficient_role())
    }
}

/// Require that the caller's role grants a permission string
pub fn require_permission(
    table: &PermissionTable,
    claims: &Claims,
    permission: &str,
) -> Result<(), AuthError> {
    if table.has_permission(claims.role, permission) {
        Ok(())
    } else {
        Err(AuthError::insufficient_permission(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims_for(role: Role) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "user-1".to_string(),
            email: "user@hospital.test".to_string(),
            role,
            staff_id: None,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn role_gate_accepts_listed_roles_only() {
        let claims = claims_for(Role::Nurse);
        assert!(require_role(&claims, &[Role::Admin, Role::Nurse]).is_ok());
        assert!(matches!(
            require_role(&claims, &[Role::Admin]),
            Err(AuthError::InsufficientRole(_))
        ));
    }

    #[test]
    fn appointment_mutations_require_the_write_grant() {
        let table = PermissionTable::defaults();

        for role in [Role::Admin, Role::Doctor, Role::Nurse, Role::Receptionist] {
            assert!(
                require_permission(&table, &claims_for(role), "appointments.write").is_ok(),
                "role {} cannot mutate appointments",
                role
            );
        }
        for role in [
            Role::Pharmacist,
            Role::LabTech,
            Role::Radiologist,
            Role::Finance,
            Role::Researcher,
        ] {
            assert!(matches!(
                require_permission(&table, &claims_for(role), "appointments.write"),
                Err(AuthError::InsufficientPermission(_))
            ));
        }
    }

    #[test]
    fn permission_gate_honors_wildcard() {
        let table = PermissionTable::defaults();
        let admin = claims_for(Role::Admin);
        let finance = claims_for(Role::Finance);

        assert!(require_permission(&table, &admin, "appointments.write").is_ok());
        assert!(matches!(
            require_permission(&table, &finance, "appointments.write"),
            Err(AuthError::InsufficientPermission(_))
        ));
    }
}
