use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::AppSettings;
use crate::services::{PermissionTable, TokenService};
use crate::stores::{AppointmentStore, CatalogStore, PatientStore, UserStore};

/// Centralized application data following the main-owned stores pattern.
///
/// All dependencies are created once in main.rs and shared across the API
/// structs. The database connection is established and migrated before
/// `AppData::init` runs.
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: AppSettings,
    pub token_service: Arc<TokenService>,
    pub permissions: Arc<PermissionTable>,
    pub user_store: Arc<UserStore>,
    pub patient_store: Arc<PatientStore>,
    pub appointment_store: Arc<AppointmentStore>,
    pub catalog_store: Arc<CatalogStore>,
}

impl AppData {
    /// Initialize all application data
    pub fn init(db: DatabaseConnection, settings: AppSettings) -> Self {
        tracing::info!("Initializing AppData...");

        let token_service = Arc::new(TokenService::new(
            settings.jwt_secret.clone(),
            settings.jwt_expiration_minutes,
        ));
        let permissions = Arc::new(PermissionTable::defaults());

        tracing::debug!("Creating stores...");
        let user_store = Arc::new(UserStore::new(db.clone()));
        let patient_store = Arc::new(PatientStore::new(db.clone()));
        let appointment_store = Arc::new(AppointmentStore::new(
            db.clone(),
            settings.conflict_policy,
            settings.atomic_booking,
        ));
        let catalog_store = Arc::new(CatalogStore::new(db.clone()));
        tracing::debug!("Stores created");

        tracing::info!("AppData initialization complete");

        Self {
            db,
            settings,
            token_service,
            permissions,
            user_store,
            patient_store,
            appointment_store,
            catalog_store,
        }
    }
}
