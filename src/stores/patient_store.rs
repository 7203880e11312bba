use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::api::ApiError;
use crate::types::db::patient::{self, Entity as Patient};
use crate::types::dto::patients::{
    PatientStatsResponse, RegisterPatientRequest, UpdatePatientRequest,
};

/// PatientStore manages patient records
pub struct PatientStore {
    db: DatabaseConnection,
}

impl PatientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Paginated list of active patients, optionally filtered by a search
    /// term over name, patient number, phone and national id. Newest first.
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
        search: Option<&str>,
    ) -> Result<(Vec<patient::Model>, u64), ApiError> {
        let mut query = Patient::find().filter(patient::Column::IsActive.eq(true));

        if let Some(term) = search.filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(patient::Column::FirstName.contains(term))
                    .add(patient::Column::LastName.contains(term))
                    .add(patient::Column::PatientNumber.contains(term))
                    .add(patient::Column::Phone.contains(term))
                    .add(patient::Column::NationalId.contains(term)),
            );
        }

        let paginator = query
            .order_by_desc(patient::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));

        let total = paginator.num_items().await.map_err(ApiError::database)?;
        let patients = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ApiError::database)?;

        Ok((patients, total))
    }

    /// Quick lookup over active patients, capped at 20 matches. Covers the
    /// list-search fields plus the NHIF number.
    pub async fn search(&self, query: &str) -> Result<Vec<patient::Model>, ApiError> {
        Patient::find()
            .filter(patient::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(patient::Column::FirstName.contains(query))
                    .add(patient::Column::LastName.contains(query))
                    .add(patient::Column::PatientNumber.contains(query))
                    .add(patient::Column::Phone.contains(query))
                    .add(patient::Column::NationalId.contains(query))
                    .add(patient::Column::NhifNumber.contains(query)),
            )
            .limit(20)
            .all(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Find a patient by id
    pub async fn find_by_id(&self, id: &str) -> Result<Option<patient::Model>, ApiError> {
        Patient::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Batch load patients for response assembly
    pub async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<patient::Model>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Patient::find()
            .filter(patient::Column::Id.is_in(ids.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Register a new patient, assigning the next sequential patient number
    /// (`P` + zero-padded count). Duplicate national ids are rejected before
    /// any row is written.
    pub async fn create(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<patient::Model, ApiError> {
        let date_of_birth = NaiveDate::parse_from_str(&request.date_of_birth, "%Y-%m-%d")
            .map_err(|_| ApiError::validation("Valid date of birth is required"))?;

        let existing = Patient::find()
            .filter(patient::Column::NationalId.eq(&request.national_id))
            .one(&self.db)
            .await
            .map_err(ApiError::database)?;
        if existing.is_some() {
            return Err(ApiError::duplicate_national_id());
        }

        let count = Patient::find()
            .count(&self.db)
            .await
            .map_err(ApiError::database)?;
        let patient_number = format!("P{:06}", count + 1);

        let timestamp = Utc::now().timestamp();
        let row = patient::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            patient_number: Set(patient_number),
            first_name: Set(request.first_name),
            last_name: Set(request.last_name),
            middle_name: Set(request.middle_name),
            date_of_birth: Set(date_of_birth.to_string()),
            gender: Set(request.gender.as_str().to_string()),
            phone: Set(request.phone),
            email: Set(request.email),
            county: Set(request.county),
            national_id: Set(request.national_id),
            nhif_number: Set(request.nhif_number),
            emergency_contact_name: Set(request.emergency_contact_name),
            emergency_contact_phone: Set(request.emergency_contact_phone),
            is_active: Set(true),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        };

        row.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                ApiError::duplicate_national_id()
            } else {
                ApiError::database(e)
            }
        })
    }

    /// Apply a partial update. The patient number and audit timestamps are
    /// not updatable by construction of the request type.
    pub async fn update(
        &self,
        id: &str,
        request: UpdatePatientRequest,
    ) -> Result<patient::Model, ApiError> {
        let patient = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Patient"))?;

        let mut active: patient::ActiveModel = patient.into();

        if let Some(first_name) = request.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = request.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(middle_name) = request.middle_name {
            active.middle_name = Set(Some(middle_name));
        }
        if let Some(date_of_birth) = request.date_of_birth {
            let parsed = NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d")
                .map_err(|_| ApiError::validation("Valid date of birth is required"))?;
            active.date_of_birth = Set(parsed.to_string());
        }
        if let Some(gender) = request.gender {
            active.gender = Set(gender.as_str().to_string());
        }
        if let Some(phone) = request.phone {
            active.phone = Set(phone);
        }
        if let Some(email) = request.email {
            active.email = Set(Some(email));
        }
        if let Some(county) = request.county {
            active.county = Set(county);
        }
        if let Some(nhif_number) = request.nhif_number {
            active.nhif_number = Set(Some(nhif_number));
        }
        if let Some(name) = request.emergency_contact_name {
            active.emergency_contact_name = Set(name);
        }
        if let Some(phone) = request.emergency_contact_phone {
            active.emergency_contact_phone = Set(phone);
        }
        active.updated_at = Set(Utc::now().timestamp());

        active.update(&self.db).await.map_err(ApiError::database)
    }

    /// Total patient count, active or not
    pub async fn count_all(&self) -> Result<u64, ApiError> {
        Patient::find().count(&self.db).await.map_err(ApiError::database)
    }

    /// Active patient count
    pub async fn count_active(&self) -> Result<u64, ApiError> {
        Patient::find()
            .filter(patient::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Patients created within a timestamp range
    pub async fn count_created_between(&self, from: i64, to: i64) -> Result<u64, ApiError> {
        Patient::find()
            .filter(patient::Column::CreatedAt.gte(from))
            .filter(patient::Column::CreatedAt.lt(to))
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Aggregate statistics for the patients stats endpoint
    pub async fn stats(&self) -> Result<PatientStatsResponse, ApiError> {
        let now = Utc::now();
        let start_of_month = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .map(|dt| dt.timestamp())
            .unwrap_or_default();

        let total_patients = self.count_all().await?;
        let new_patients_this_month = self
            .count_created_between(start_of_month, i64::MAX)
            .await?;
        let active_patients = self.count_active().await?;
        let patients_with_nhif = Patient::find()
            .filter(patient::Column::NhifNumber.is_not_null())
            .filter(patient::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(ApiError::database)?;

        let nhif_coverage = if total_patients > 0 {
            format!(
                "{:.1}",
                (patients_with_nhif as f64 / total_patients as f64) * 100.0
            )
        } else {
            "0".to_string()
        };

        Ok(PatientStatsResponse {
            total_patients,
            new_patients_this_month,
            active_patients,
            patients_with_nhif,
            nhif_coverage,
        })
    }
}
