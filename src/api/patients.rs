use poem_openapi::{
    param::{Path, Query},
    payload::Json,
    ApiResponse, OpenApi, Tags,
};
use std::sync::Arc;

use crate::api::{authenticate, require_permission, require_role, BearerAuth};
use crate::errors::api::ApiError;
use crate::services::{PermissionTable, TokenService};
use crate::stores::PatientStore;
use crate::types::dto::common::Pagination;
use crate::types::dto::patients::{
    PatientCreatedResponse, PatientListResponse, PatientMatch, PatientResponse,
    PatientSearchResponse, PatientStatsResponse, PatientSummary, PatientView,
    RegisterPatientRequest, UpdatePatientRequest,
};
use crate::types::internal::auth::Role;

/// Roles allowed to register and update patients
const PATIENT_WRITER_ROLES: [Role; 3] = [Role::Admin, Role::Receptionist, Role::Nurse];

/// Patient registry API endpoints
pub struct PatientApi {
    patient_store: Arc<PatientStore>,
    token_service: Arc<TokenService>,
    permissions: Arc<PermissionTable>,
}

impl PatientApi {
    pub fn new(
        patient_store: Arc<PatientStore>,
        token_service: Arc<TokenService>,
        permissions: Arc<PermissionTable>,
    ) -> Self {
        Self {
            patient_store,
            token_service,
            permissions,
        }
    }
}

/// API tags for patient endpoints
#[derive(Tags)]
enum PatientTags {
    /// Patient registry endpoints
    Patients,
}

/// API response for patient registration
#[derive(ApiResponse)]
enum RegisterPatientApiResponse {
    /// Patient registered
    #[oai(status = 201)]
    Created(Json<PatientCreatedResponse>),
}

#[OpenApi(prefix_path = "/patients")]
impl PatientApi {
    /// Paginated patient list with optional search
    #[oai(path = "/", method = "get", tag = "PatientTags::Patients")]
    async fn list(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
        search: Query<Option<String>>,
    ) -> Result<Json<PatientListResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "patients.read")?;

        let page = page.0.unwrap_or(1).max(1);
        let limit = limit.0.unwrap_or(10).clamp(1, 100);

        let (patients, total) = self
            .patient_store
            .list(page, limit, search.0.as_deref())
            .await?;

        Ok(Json(PatientListResponse {
            patients: patients.into_iter().map(PatientSummary::from).collect(),
            pagination: Pagination::new(page, limit, total),
        }))
    }

    /// Aggregate patient statistics
    #[oai(path = "/stats/overview", method = "get", tag = "PatientTags::Patients")]
    async fn stats(&self, auth: BearerAuth) -> Result<Json<PatientStatsResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "patients.read")?;

        Ok(Json(self.patient_store.stats().await?))
    }

    /// Quick search, returning up to 20 condensed matches
    #[oai(path = "/search/:query", method = "get", tag = "PatientTags::Patients")]
    async fn search(
        &self,
        auth: BearerAuth,
        query: Path<String>,
    ) -> Result<Json<PatientSearchResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "patients.read")?;

        let patients = self.patient_store.search(&query.0).await?;

        Ok(Json(PatientSearchResponse {
            patients: patients.into_iter().map(PatientMatch::from).collect(),
        }))
    }

    /// Fetch a single patient
    #[oai(path = "/:id", method = "get", tag = "PatientTags::Patients")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<String>,
    ) -> Result<Json<PatientResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_permission(&self.permissions, &claims, "patients.read")?;

        let patient = self
            .patient_store
            .find_by_id(&id.0)
            .await?
            .ok_or_else(|| ApiError::not_found("Patient"))?;

        Ok(Json(PatientResponse {
            patient: PatientView::from(patient),
        }))
    }

    /// Register a new patient
    #[oai(path = "/", method = "post", tag = "PatientTags::Patients")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<RegisterPatientRequest>,
    ) -> Result<RegisterPatientApiResponse, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_role(&claims, &PATIENT_WRITER_ROLES)?;

        let patient = self.patient_store.create(body.0).await?;

        Ok(RegisterPatientApiResponse::Created(Json(
            PatientCreatedResponse {
                message: "Patient registered successfully".to_string(),
                patient: PatientView::from(patient),
            },
        )))
    }

    /// Update a patient record
    #[oai(path = "/:id", method = "put", tag = "PatientTags::Patients")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<String>,
        body: Json<UpdatePatientRequest>,
    ) -> Result<Json<PatientCreatedResponse>, ApiError> {
        let claims = authenticate(&self.token_service, &auth)?;
        require_role(&claims, &PATIENT_WRITER_ROLES)?;

        let patient = self.patient_store.update(&id.0, body.0).await?;

        Ok(Json(PatientCreatedResponse {
            message: "Patient updated successfully".to_string(),
            patient: PatientView::from(patient),
        }))
    }
}
