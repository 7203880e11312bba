use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// A single dashboard stat card
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub change: String,
    pub change_type: String,
    pub description: String,
}

/// Response model for dashboard overview statistics
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DashboardStatsResponse {
    pub stats: Vec<StatCard>,
}

/// Recent activity entry derived from the latest appointments
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ActivityItem {
    pub id: String,
    #[oai(rename = "type")]
    #[serde(rename = "type")]
    pub activity_type: String,
    pub patient: String,
    pub department: String,
    pub time: String,
    pub status: String,
}

/// Response model for recent activities
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ActivitiesResponse {
    pub activities: Vec<ActivityItem>,
}

/// Department utilization row (placeholder figures, not derived from data)
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DepartmentLoad {
    pub name: String,
    pub patients: u32,
    pub capacity: u32,
    pub utilization: u32,
}

/// Response model for department utilization
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DepartmentsResponse {
    pub departments: Vec<DepartmentLoad>,
}

/// A critical alert entry
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AlertItem {
    pub id: String,
    #[oai(rename = "type")]
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
    pub time: String,
}

/// Response model for critical alerts
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertItem>,
}
