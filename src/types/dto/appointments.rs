use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::appointment;
use crate::types::dto::common::Pagination;
use crate::types::internal::scheduling::{AppointmentStatus, AppointmentType};

/// Request model for booking an appointment
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Slot label, `HH:MM`
    #[oai(validator(pattern = r"^([01][0-9]|2[0-3]):[0-5][0-9]$"))]
    pub time: String,
    /// Duration in minutes, defaults to 30
    pub duration: Option<i32>,
    #[oai(rename = "type")]
    #[serde(rename = "type")]
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

/// Partial update for an appointment. The id, creator and audit timestamps
/// are not updatable and deliberately have no field here.
#[derive(Object, Debug, Default, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub date: Option<String>,
    #[oai(validator(pattern = r"^([01][0-9]|2[0-3]):[0-5][0-9]$"))]
    pub time: Option<String>,
    pub duration: Option<i32>,
    #[oai(rename = "type")]
    #[serde(rename = "type")]
    pub appointment_type: Option<AppointmentType>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

/// Request model for cancelling an appointment
#[derive(Object, Debug, Default, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: Option<String>,
}

/// Condensed patient reference attached to appointment responses
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PatientBrief {
    pub id: String,
    pub patient_number: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Condensed doctor reference attached to appointment responses
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct DoctorBrief {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub specialization: Option<String>,
}

/// Appointment as returned to clients, with patient/doctor summaries
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AppointmentView {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub created_by: String,
    pub date: String,
    pub time: String,
    pub duration: i32,
    #[oai(rename = "type")]
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub patient: Option<PatientBrief>,
    pub doctor: Option<DoctorBrief>,
}

impl AppointmentView {
    pub fn from_model(
        model: appointment::Model,
        patient: Option<PatientBrief>,
        doctor: Option<DoctorBrief>,
    ) -> Self {
        Self {
            id: model.id,
            patient_id: model.patient_id,
            doctor_id: model.doctor_id,
            created_by: model.created_by,
            date: model.date,
            time: model.time,
            duration: model.duration,
            appointment_type: model.appointment_type,
            status: model.status,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
            patient,
            doctor,
        }
    }
}

/// Response model for the paginated appointment list
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentView>,
    pub pagination: Pagination,
}

/// Response model carrying a message and the affected appointment
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub message: String,
    pub appointment: AppointmentView,
}

/// Response model for a single appointment lookup
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AppointmentDetailResponse {
    pub appointment: AppointmentView,
}

/// Response model for the availability endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Open slot labels in ascending order
    pub available_slots: Vec<String>,
}

/// Response model for appointment statistics
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStatsResponse {
    pub today_appointments: u64,
    pub week_appointments: u64,
    pub total_appointments: u64,
    pub completed_appointments: u64,
    pub cancelled_appointments: u64,
    pub pending_appointments: u64,
    /// Percent of completed appointments, one decimal, `"0"` when empty
    pub completion_rate: String,
}
