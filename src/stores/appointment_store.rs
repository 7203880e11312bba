use chrono::{Datelike, Days, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::api::ApiError;
use crate::services::scheduling::{self, ConflictPolicy};
use crate::types::db::appointment::{self, Entity as Appointment};
use crate::types::db::patient::Entity as Patient;
use crate::types::db::user::{self, Entity as User};
use crate::types::dto::appointments::{
    AppointmentStatsResponse, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use crate::types::internal::auth::Role;
use crate::types::internal::scheduling::AppointmentStatus;

/// Filters for the paginated appointment list
#[derive(Debug, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub doctor_id: Option<String>,
    pub patient_id: Option<String>,
    pub date: Option<String>,
    pub page: u64,
    pub limit: u64,
}

/// AppointmentStore manages appointment rows and the slot booking rules
pub struct AppointmentStore {
    db: DatabaseConnection,
    conflict_policy: ConflictPolicy,
    atomic_booking: bool,
}

fn active_status_values() -> Vec<&'static str> {
    AppointmentStatus::ACTIVE.iter().map(|s| s.as_str()).collect()
}

fn normalize_date(value: &str) -> Result<String, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.to_string())
        .map_err(|_| ApiError::validation("Valid appointment date is required"))
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection, conflict_policy: ConflictPolicy, atomic_booking: bool) -> Self {
        Self {
            db,
            conflict_policy,
            atomic_booking,
        }
    }

    /// Paginated appointment list ordered by date then time
    pub async fn list(
        &self,
        filter: AppointmentFilter,
    ) -> Result<(Vec<appointment::Model>, u64), ApiError> {
        let mut query = Appointment::find();

        if let Some(status) = filter.status {
            query = query.filter(appointment::Column::Status.eq(status.as_str()));
        }
        if let Some(doctor_id) = filter.doctor_id {
            query = query.filter(appointment::Column::DoctorId.eq(doctor_id));
        }
        if let Some(patient_id) = filter.patient_id {
            query = query.filter(appointment::Column::PatientId.eq(patient_id));
        }
        if let Some(date) = filter.date {
            query = query.filter(appointment::Column::Date.eq(normalize_date(&date)?));
        }

        let paginator = query
            .order_by_asc(appointment::Column::Date)
            .order_by_asc(appointment::Column::Time)
            .paginate(&self.db, filter.limit.max(1));

        let total = paginator.num_items().await.map_err(ApiError::database)?;
        let appointments = paginator
            .fetch_page(filter.page.saturating_sub(1))
            .await
            .map_err(ApiError::database)?;

        Ok((appointments, total))
    }

    /// Find an appointment by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<appointment::Model>, ApiError> {
        Appointment::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Slot labels and durations of active appointments for a doctor/day
    async fn active_slot_usage<C: ConnectionTrait>(
        &self,
        conn: &C,
        doctor_id: &str,
        date: &str,
    ) -> Result<Vec<(String, i32)>, ApiError> {
        Appointment::find()
            .select_only()
            .column(appointment::Column::Time)
            .column(appointment::Column::Duration)
            .filter(appointment::Column::DoctorId.eq(doctor_id))
            .filter(appointment::Column::Date.eq(date))
            .filter(appointment::Column::Status.is_in(active_status_values()))
            .into_tuple::<(String, i32)>()
            .all(conn)
            .await
            .map_err(ApiError::database)
    }

    async fn insert_guarded<C: ConnectionTrait>(
        &self,
        conn: &C,
        created_by: &str,
        request: &CreateAppointmentRequest,
        date: &str,
        duration: i32,
    ) -> Result<appointment::Model, ApiError> {
        let usage = self
            .active_slot_usage(conn, &request.doctor_id, date)
            .await?;
        if scheduling::conflicts(self.conflict_policy, &usage, &request.time, duration) {
            return Err(ApiError::slot_conflict());
        }

        let timestamp = Utc::now().timestamp();
        let row = appointment::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            patient_id: Set(request.patient_id.clone()),
            doctor_id: Set(request.doctor_id.clone()),
            created_by: Set(created_by.to_string()),
            date: Set(date.to_string()),
            time: Set(request.time.clone()),
            duration: Set(duration),
            appointment_type: Set(request.appointment_type.as_str().to_string()),
            status: Set(AppointmentStatus::Scheduled.as_str().to_string()),
            notes: Set(request.notes.clone()),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };

        row.insert(conn).await.map_err(ApiError::database)
    }

    /// Book an appointment.
    ///
    /// Referential checks (patient exists, doctor is an active DOCTOR user)
    /// run first and surface as 400s. The conflict check follows the
    /// configured [`ConflictPolicy`]; with `atomic_booking` the check and
    /// the insert share one transaction, otherwise the historical unguarded
    /// check-then-insert window is preserved.
    pub async fn create(
        &self,
        created_by: &str,
        request: CreateAppointmentRequest,
    ) -> Result<appointment::Model, ApiError> {
        let date = normalize_date(&request.date)?;
        let duration = request.duration.unwrap_or(30);
        if duration <= 0 {
            return Err(ApiError::validation("Duration must be positive"));
        }

        let patient = Patient::find_by_id(&request.patient_id)
            .one(&self.db)
            .await
            .map_err(ApiError::database)?;
        if patient.is_none() {
            return Err(ApiError::patient_not_found());
        }

        let doctor = User::find()
            .filter(user::Column::Id.eq(&request.doctor_id))
            .filter(user::Column::Role.eq(Role::Doctor.as_str()))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(ApiError::database)?;
        if doctor.is_none() {
            return Err(ApiError::doctor_not_found());
        }

        if self.atomic_booking {
            let txn = self.db.begin().await.map_err(ApiError::database)?;
            let row = self
                .insert_guarded(&txn, created_by, &request, &date, duration)
                .await?;
            txn.commit().await.map_err(ApiError::database)?;
            Ok(row)
        } else {
            self.insert_guarded(&self.db, created_by, &request, &date, duration)
                .await
        }
    }

    /// Apply a partial update. The id, creator and audit timestamps are not
    /// updatable by construction of the request type; dates are normalized
    /// to calendar-day granularity.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<appointment::Model, ApiError> {
        let appointment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Appointment"))?;

        let mut active: appointment::ActiveModel = appointment.into();

        if let Some(patient_id) = request.patient_id {
            active.patient_id = Set(patient_id);
        }
        if let Some(doctor_id) = request.doctor_id {
            active.doctor_id = Set(doctor_id);
        }
        if let Some(date) = request.date {
            active.date = Set(normalize_date(&date)?);
        }
        if let Some(time) = request.time {
            active.time = Set(time);
        }
        if let Some(duration) = request.duration {
            if duration <= 0 {
                return Err(ApiError::validation("Duration must be positive"));
            }
            active.duration = Set(duration);
        }
        if let Some(appointment_type) = request.appointment_type {
            active.appointment_type = Set(appointment_type.as_str().to_string());
        }
        if let Some(status) = request.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(notes) = request.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(ApiError::database)
    }

    /// Cancel an appointment, recording the reason in its notes.
    /// Cancelling an already-cancelled appointment is a successful no-op.
    pub async fn cancel(
        &self,
        id: &str,
        reason: Option<String>,
    ) -> Result<appointment::Model, ApiError> {
        let appointment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Appointment"))?;

        if appointment.status == AppointmentStatus::Cancelled.as_str() {
            return Ok(appointment);
        }

        let cancellation_note = match reason {
            Some(reason) if !reason.is_empty() => format!("Cancelled: {}", reason),
            _ => "Cancelled".to_string(),
        };
        let notes = match &appointment.notes {
            Some(existing) if !existing.is_empty() => {
                format!("{}\n{}", existing, cancellation_note)
            }
            _ => cancellation_note,
        };

        let mut active: appointment::ActiveModel = appointment.into();
        active.status = Set(AppointmentStatus::Cancelled.as_str().to_string());
        active.notes = Set(Some(notes));
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(ApiError::database)
    }

    /// Open slot labels for a doctor on a date, ascending
    pub async fn availability(
        &self,
        doctor_id: &str,
        date: &str,
    ) -> Result<Vec<String>, ApiError> {
        let date = normalize_date(date)?;
        let usage = self.active_slot_usage(&self.db, doctor_id, &date).await?;
        let booked: Vec<String> = usage.into_iter().map(|(time, _)| time).collect();
        Ok(scheduling::available_slots(&booked))
    }

    async fn count_with_status(&self, statuses: &[AppointmentStatus]) -> Result<u64, ApiError> {
        Appointment::find()
            .filter(
                appointment::Column::Status
                    .is_in(statuses.iter().map(|s| s.as_str()).collect::<Vec<_>>()),
            )
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Appointments created within a timestamp range
    pub async fn count_created_between(&self, from: i64, to: i64) -> Result<u64, ApiError> {
        Appointment::find()
            .filter(appointment::Column::CreatedAt.gte(from))
            .filter(appointment::Column::CreatedAt.lt(to))
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Appointments scheduled for a calendar day
    pub async fn count_on_date(&self, date: &str) -> Result<u64, ApiError> {
        Appointment::find()
            .filter(appointment::Column::Date.eq(date))
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Aggregate statistics for the appointments stats endpoint.
    /// The week is Sunday-based; the completion rate divides completed by
    /// total and reports `"0"` for an empty table.
    pub async fn stats(&self) -> Result<AppointmentStatsResponse, ApiError> {
        let today = Utc::now().date_naive();
        let week_start = today - Days::new(today.weekday().num_days_from_sunday() as u64);
        let week_end = week_start + Days::new(7);

        let today_appointments = self.count_on_date(&today.to_string()).await?;

        let week_appointments = Appointment::find()
            .filter(appointment::Column::Date.gte(week_start.to_string()))
            .filter(appointment::Column::Date.lt(week_end.to_string()))
            .count(&self.db)
            .await
            .map_err(ApiError::database)?;

        let total_appointments = Appointment::find()
            .count(&self.db)
            .await
            .map_err(ApiError::database)?;
        let completed_appointments = self
            .count_with_status(&[AppointmentStatus::Completed])
            .await?;
        let cancelled_appointments = self
            .count_with_status(&[AppointmentStatus::Cancelled])
            .await?;
        let pending_appointments = self
            .count_with_status(&[AppointmentStatus::Scheduled, AppointmentStatus::Confirmed])
            .await?;

        let completion_rate = if total_appointments > 0 {
            format!(
                "{:.1}",
                (completed_appointments as f64 / total_appointments as f64) * 100.0
            )
        } else {
            "0".to_string()
        };

        Ok(AppointmentStatsResponse {
            today_appointments,
            week_appointments,
            total_appointments,
            completed_appointments,
            cancelled_appointments,
            pending_appointments,
            completion_rate,
        })
    }

    /// Most recent appointments for the dashboard activity feed
    pub async fn recent(&self, limit: u64) -> Result<Vec<appointment::Model>, ApiError> {
        Appointment::find()
            .order_by_desc(appointment::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(ApiError::database)
    }
}
