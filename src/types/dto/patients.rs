use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};

use crate::types::db::patient;
use crate::types::dto::common::Pagination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

/// Request model for registering a new patient
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct RegisterPatientRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: Gender,
    #[oai(validator(pattern = r"^\+254[0-9]{9}$"))]
    pub phone: String,
    pub email: Option<String>,
    pub county: String,
    pub national_id: String,
    pub nhif_number: Option<String>,
    pub emergency_contact_name: String,
    #[oai(validator(pattern = r"^\+254[0-9]{9}$"))]
    pub emergency_contact_phone: String,
}

/// Partial update for a patient record. The patient number and audit
/// timestamps are not updatable and deliberately have no field here.
#[derive(Object, Debug, Default, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub county: Option<String>,
    pub nhif_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

/// Condensed patient row for list views
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: String,
    pub patient_number: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub county: String,
    pub nhif_number: Option<String>,
    pub created_at: i64,
}

impl From<patient::Model> for PatientSummary {
    fn from(model: patient::Model) -> Self {
        Self {
            id: model.id,
            patient_number: model.patient_number,
            first_name: model.first_name,
            last_name: model.last_name,
            middle_name: model.middle_name,
            date_of_birth: model.date_of_birth,
            gender: model.gender,
            phone: model.phone,
            email: model.email,
            county: model.county,
            nhif_number: model.nhif_number,
            created_at: model.created_at,
        }
    }
}

/// Full patient record as returned on create/get/update
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PatientView {
    pub id: String,
    pub patient_number: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: String,
    pub gender: String,
    pub phone: String,
    pub email: Option<String>,
    pub county: String,
    pub national_id: String,
    pub nhif_number: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<patient::Model> for PatientView {
    fn from(model: patient::Model) -> Self {
        Self {
            id: model.id,
            patient_number: model.patient_number,
            first_name: model.first_name,
            last_name: model.last_name,
            middle_name: model.middle_name,
            date_of_birth: model.date_of_birth,
            gender: model.gender,
            phone: model.phone,
            email: model.email,
            county: model.county,
            national_id: model.national_id,
            nhif_number: model.nhif_number,
            emergency_contact_name: model.emergency_contact_name,
            emergency_contact_phone: model.emergency_contact_phone,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Minimal patient row returned by the quick search endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PatientMatch {
    pub id: String,
    pub patient_number: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: String,
}

impl From<patient::Model> for PatientMatch {
    fn from(model: patient::Model) -> Self {
        Self {
            id: model.id,
            patient_number: model.patient_number,
            first_name: model.first_name,
            last_name: model.last_name,
            middle_name: model.middle_name,
            phone: model.phone,
            date_of_birth: model.date_of_birth,
            gender: model.gender,
        }
    }
}

/// Response model for the quick search endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PatientSearchResponse {
    pub patients: Vec<PatientMatch>,
}

/// Response model for the paginated patient list
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PatientListResponse {
    pub patients: Vec<PatientSummary>,
    pub pagination: Pagination,
}

/// Response model for patient registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PatientCreatedResponse {
    pub message: String,
    pub patient: PatientView,
}

/// Response model for a single patient
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PatientResponse {
    pub patient: PatientView,
}

/// Response model for patient statistics
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PatientStatsResponse {
    pub total_patients: u64,
    pub new_patients_this_month: u64,
    pub active_patients: u64,
    pub patients_with_nhif: u64,
    /// Percent of patients holding NHIF cover, one decimal, `"0"` when empty
    pub nhif_coverage: String,
}
