use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    ApiResponse, OpenApi, Tags,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{authenticate, require_permission, require_role, BearerAuth};
use crate::errors::api::ApiError;
use crate::services::{PermissionTable, TokenService};
use crate::stores::{AppointmentFilter, AppointmentStore, PatientStore, UserStore};
use crate::types::db::appointment;
use crate::types::dto::appointments::{
    AppointmentDetailResponse, AppointmentListResponse, AppointmentResponse,
    AppointmentStatsResponse, AppointmentView, AvailabilityResponse, CancelAppointmentRequest,
    CreateAppointmentRequest, DoctorBrief, PatientBrief, UpdateAppointmentRequest,
};
use crate::types::dto::common::Pagination;
use crate::types::internal::auth::Role;
use crate::types::internal::scheduling::AppointmentStatus;

/// Roles allowed to book and update appointments
const APPOINTMENT_WRITER_ROLES: [Role; 4] =
    [Role::Admin, Role::Doctor, Role::Nurse, Role::Receptionist];

/// Appointment scheduling API endpoints
pub struct AppointmentApi {
    appointment_store: Arc<AppointmentStore>,
    patient_store: Arc<PatientStore>,
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
    permissions: Arc<PermissionTable>,
}

impl AppointmentApi {
    pub fn new(
        appointment_store: Arc<AppointmentStore>,
        patient_store: Arc<PatientStore>,
        user_store: Arc<UserStore>,
        token_service: Arc<TokenService>,
        permissions: Arc<PermissionTable>,
    ) -> Self {
        Self {
            appointment_store,
            patient_store,
            user_store,
            token_service,
            permissions,
        }
    }

    /// Attach patient and doctor summaries to appointment rows with two
    /// batched lookups instead of one pair per row
    async fn attach_summaries(
        &self,
        models: Vec<appointment::Model>,
    ) -> Result<Vec<AppointmentView>, ApiError> {
        let patient_ids: Vec<String> = models.iter().map(|m| m.patient_id.clone()).collect();
        let doctor_ids: Vec<String> = models.iter().map(|m| m.doctor_id.clone()).collect();

        let patients: HashMap<String, PatientBrief> = self
            .patient_store
            .find_by_ids(&patient_ids)
            .await?
            .into_iter()
            .map(|p| {
                (
                    p.id.clone(),
                    PatientBrief {
                        id: p.id,
                        patient_number: p.patient_number,
                        first_name: p.first_name,
                        last_name: p.last_name,
                        phone: p.phone,
                    },
                )
            })
            .collect();

        let doctors: HashMap<String, DoctorBrief> = self
            .user_store
            .find_by_ids_with_staff(&doctor_ids)
            .await
            .map_err(ApiError::from)?
            .into_iter()
            .map(|(user, staff)| {
                (
                    user.id.clone(),
                    DoctorBrief {
                        id: user.id,
                        email: user.email,
                        first_name: staff.as_ref().map(|s| s.first_name.clone()),
                        last_name: staff.as_ref().map(|s| s.last_name.clone()),
                        department: staff.as_ref().map(|s| s.department.clone()),
                        specialization: staff.as_ref().and_then(|s| s.specialization.clone()),
                    },
                )
            })
            .collect();

        Ok(models
            .into_iter()
            .map(|model| {
                let patient = patients.get(&model.patient_id).cloned();
                let doctor = doctors.get(&model.doctor_id).cloned();
                AppointmentView::from_model(model, patient, doctor)
            })
            .collect())
    }

    async fn view_of(&self, model: appointment::Model) -> Result<AppointmentView, ApiError> {
        let mut views = self.attach_summaries(vec![model]).await?;
        views
            .pop()
            .ok_or_else(|| ApiError::internal("Appointment view assembly failed"))
    }
}

/// API tags for appointment endpoints
#[derive(Tags)]
enum AppointmentTags {
    /// Appointment scheduling endpoints
    Appointments,
}

/// API response for booking an appointment
#[derive(ApiResponse)]
enum CreateAppointmentApiResponse {
    /// Appointment booked
    #[oai(status = 201)]
    Created(Json<AppointmentResponse>),
}

#[OpenApi(prefix_path = "/appointments")]
impl AppointmentApi {
    /// Paginated appointment list with optional filters
    #[oai(path = "/", method = "get", tag = "AppointmentTags::Appointments")]
    #[allow(clippy::too_many_arguments)]
    async fn list(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        status: Query<Option<String>>,
        #[oai(name = "doctorId")] doctor_id: Query<Option<String>>,
        #[oai(name = "patientId")] patient_id: Query<Option<String>>,
        date: Query<Option<String>>,
    ) -> Result<Json<AppointmentListResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "appointments.read")?;

        let page = page.0.unwrap_or(1).max(1);
        let limit = limit.0.unwrap_or(10).clamp(1, 100);

        let status = match status.0 {
            Some(value) => Some(
                AppointmentStatus::parse(&value)
                    .ok_or_else(|| ApiError::validation("Valid appointment status is required"))?,
            ),
            None => None,
        };

        let (appointments, total) = self
            .appointment_store
            .list(AppointmentFilter {
                status,
                doctor_id: doctor_id.0,
                patient_id: patient_id.0,
                date: date.0,
                page,
                limit,
            })
            .await?;

        Ok(Json(AppointmentListResponse {
            appointments: self.attach_summaries(appointments).await?,
            pagination: Pagination::new(page, limit, total),
        }))
    }

    /// Aggregate appointment statistics
    #[oai(
        path = "/stats/overview",
        method = "get",
        tag = "AppointmentTags::Appointments"
    )]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<AppointmentStatsResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "appointments.read")?;

        Ok(Json(self.appointment_store.stats().await?))
    }

    /// Open 30-minute slots for a doctor on a date
    #[oai(
        path = "/availability/:doctorId/:date",
        method = "get",
        tag = "AppointmentTags::Appointments"
    )]
    async fn availability(
        &self,
        auth: BearerAuth,
        #[oai(name = "doctorId")] doctor_id: Path<String>,
        date: Path<String>,
    ) -> Result<Json<AvailabilityResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "appointments.read")?;

        let available_slots = self
            .appointment_store
            .availability(&doctor_id.0, &date.0)
            .await?;

        Ok(Json(AvailabilityResponse { available_slots }))
    }

    /// Fetch a single appointment
    #[oai(path = "/:id", method = "get", tag = "AppointmentTags::Appointments")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<AppointmentDetailResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "appointments.read")?;

        let appointment = self
            .appointment_store
            .find_by_id(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Appointment"))?;

        Ok(Json(AppointmentDetailResponse {
            appointment: self.view_of(appointment).await?,
        }))
    }

    /// Book an appointment
    #[oai(path = "/", method = "post", tag = "AppointmentTags::Appointments")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateAppointmentRequest>,
    ) -> Result<CreateAppointmentApiResponse, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_role(&claims, &APPOINTMENT_WRITER_ROLES)?;

        let appointment = self.appointment_store.create(&claims.sub, body.0).await?;

        Ok(CreateAppointmentApiResponse::Created(Json(
            AppointmentResponse {
                message: "Appointment created successfully".to_string(),
                appointment: self.view_of(appointment).await?,
            },
        )))
    }

    /// Update an appointment
    #[oai(path = "/:id", method = "put", tag = "AppointmentTags::Appointments")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdateAppointmentRequest>,
    ) -> Result<Json<AppointmentResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_role(&claims, &APPOINTMENT_WRITER_ROLES)?;

        let appointment = self.appointment_store.update(&id.0, body.0).await?;

        Ok(Json(AppointmentResponse {
            message: "Appointment updated successfully".to_string(),
            appointment: self.view_of(appointment).await?,
        }))
    }

    /// Cancel an appointment (idempotent)
    #[oai(
        path = "/:id/cancel",
        method = "patch",
        tag = "AppointmentTags::Appointments"
    )]
    async fn cancel(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<CancelAppointmentRequest>,
    ) -> Result<Json<AppointmentResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "appointments.write")?;

        let appointment = self.appointment_store.cancel(&id.0, body.0.reason).await?;

        Ok(Json(AppointmentResponse {
            message: "Appointment cancelled successfully".to_string(),
            appointment: self.view_of(appointment).await?,
        }))
    }
}
