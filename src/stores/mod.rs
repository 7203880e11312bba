// Stores layer - Data access and repository pattern
pub mod appointment_store;
pub mod catalog_store;
pub mod patient_store;
pub mod user_store;

pub use appointment_store::{AppointmentFilter, AppointmentStore};
pub use catalog_store::CatalogStore;
pub use patient_store::PatientStore;
pub use user_store::UserStore;
