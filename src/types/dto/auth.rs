use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::staff;
use crate::types::internal::auth::Role;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email address of the user
    pub email: String,

    /// Password for authentication
    #[oai(validator(min_length = 6))]
    pub password: String,
}

/// Staff profile attached to a user account
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    pub id: String,
    pub staff_number: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub specialization: Option<String>,
    pub hire_date: String,
}

impl From<staff::Model> for StaffProfile {
    fn from(model: staff::Model) -> Self {
        Self {
            id: model.id,
            staff_number: model.staff_number,
            first_name: model.first_name,
            last_name: model.last_name,
            middle_name: model.middle_name,
            phone: model.phone,
            email: model.email,
            department: model.department,
            position: model.position,
            specialization: model.specialization,
            hire_date: model.hire_date,
        }
    }
}

/// User identity as returned to clients, never includes the password hash
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub staff_id: Option<String>,
    pub is_active: bool,
    pub staff: Option<StaffProfile>,
}

/// Response model for a successful login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed bearer token
    pub token: String,

    /// The authenticated user
    pub user: UserSummary,
}

/// Response model for the profile endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserSummary,
}

/// Request model for changing the caller's password
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[oai(validator(min_length = 6))]
    pub new_password: String,
}

/// Request model for registering a staff member with a login account
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct RegisterStaffRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub email: String,
    #[oai(validator(pattern = r"^\+254[0-9]{9}$"))]
    pub phone: String,
    pub department: String,
    pub position: String,
    pub role: Role,
    pub specialization: Option<String>,
    #[oai(validator(min_length = 6))]
    pub password: String,
}

/// Response model for staff registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct StaffRegisteredResponse {
    pub message: String,
    pub user: UserSummary,
}
