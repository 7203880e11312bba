use poem_openapi::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Statuses that block a slot for conflict and availability purposes.
    /// Cancelled, completed and no-show appointments free the slot.
    pub const ACTIVE: [AppointmentStatus; 3] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::InProgress => "IN_PROGRESS",
            AppointmentStatus::Completed => "COMPLETED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::NoShow => "NO_SHOW",
        }
    }

    pub fn parse(value: &str) -> Option<AppointmentStatus> {
        match value {
            "SCHEDULED" => Some(AppointmentStatus::Scheduled),
            "CONFIRMED" => Some(AppointmentStatus::Confirmed),
            "IN_PROGRESS" => Some(AppointmentStatus::InProgress),
            "COMPLETED" => Some(AppointmentStatus::Completed),
            "CANCELLED" => Some(AppointmentStatus::Cancelled),
            "NO_SHOW" => Some(AppointmentStatus::NoShow),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Enum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[oai(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Procedure,
    Emergency,
    RoutineCheckup,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "CONSULTATION",
            AppointmentType::FollowUp => "FOLLOW_UP",
            AppointmentType::Procedure => "PROCEDURE",
            AppointmentType::Emergency => "EMERGENCY",
            AppointmentType::RoutineCheckup => "ROUTINE_CHECKUP",
        }
    }

    pub fn parse(value: &str) -> Option<AppointmentType> {
        match value {
            "CONSULTATION" => Some(AppointmentType::Consultation),
            "FOLLOW_UP" => Some(AppointmentType::FollowUp),
            "PROCEDURE" => Some(AppointmentType::Procedure),
            "EMERGENCY" => Some(AppointmentType::Emergency),
            "ROUTINE_CHECKUP" => Some(AppointmentType::RoutineCheckup),
            _ => None,
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
