use poem_openapi::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of user categories determining default permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
    Pharmacist,
    LabTech,
    Radiologist,
    Finance,
    Researcher,
}

impl Role {
    /// Every role, used to validate that the permission table is total
    pub const ALL: [Role; 9] = [
        Role::Admin,
        Role::Doctor,
        Role::Nurse,
        Role::Receptionist,
        Role::Pharmacist,
        Role::LabTech,
        Role::Radiologist,
        Role::Finance,
        Role::Researcher,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Nurse => "NURSE",
            Role::Receptionist => "RECEPTIONIST",
            Role::Pharmacist => "PHARMACIST",
            Role::LabTech => "LAB_TECH",
            Role::Radiologist => "RADIOLOGIST",
            Role::Finance => "FINANCE",
            Role::Researcher => "RESEARCHER",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "DOCTOR" => Some(Role::Doctor),
            "NURSE" => Some(Role::Nurse),
            "RECEPTIONIST" => Some(Role::Receptionist),
            "PHARMACIST" => Some(Role::Pharmacist),
            "LAB_TECH" => Some(Role::LabTech),
            "RADIOLOGIST" => Some(Role::Radiologist),
            "FINANCE" => Some(Role::Finance),
            "RESEARCHER" => Some(Role::Researcher),
            _ => None,
        }
    }

    /// Three-letter prefix used when generating staff numbers
    pub fn staff_prefix(&self) -> &'static str {
        match self {
            Role::Admin => "ADM",
            Role::Doctor => "DOC",
            Role::Nurse => "NUR",
            Role::Receptionist => "REC",
            Role::Pharmacist => "PHR",
            Role::LabTech => "LAB",
            Role::Radiologist => "RAD",
            Role::Finance => "FIN",
            Role::Researcher => "RES",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Email of the authenticated user
    pub email: String,

    /// Role of the authenticated user
    pub role: Role,

    /// Linked staff record id, when the user has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}
