// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use hospital_backend::types::db::user;
use hospital_backend::types::dto::appointments::CreateAppointmentRequest;
use hospital_backend::types::dto::auth::RegisterStaffRequest;
use hospital_backend::types::dto::patients::{Gender, RegisterPatientRequest};
use hospital_backend::types::internal::auth::Role;
use hospital_backend::types::internal::scheduling::AppointmentType;
use hospital_backend::stores::UserStore;

/// Creates an in-memory test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// A well-formed staff registration request for the given email and role
pub fn staff_request(email: &str, role: Role) -> RegisterStaffRequest {
    RegisterStaffRequest {
        first_name: "Grace".to_string(),
        last_name: "Wanjiru".to_string(),
        middle_name: None,
        email: email.to_string(),
        phone: "+254712345678".to_string(),
        department: "General Medicine".to_string(),
        position: "Medical Officer".to_string(),
        role,
        specialization: Some("Internal Medicine".to_string()),
        password: "secret123".to_string(),
    }
}

/// Registers an active doctor account and returns the user row
#[allow(dead_code)]
pub async fn seed_doctor(store: &UserStore, email: &str) -> user::Model {
    let (user, _staff) = store
        .register_staff(staff_request(email, Role::Doctor))
        .await
        .expect("Failed to seed doctor");
    user
}

/// A well-formed patient registration request with the given national id
#[allow(dead_code)]
pub fn patient_request(national_id: &str) -> RegisterPatientRequest {
    RegisterPatientRequest {
        first_name: "Amina".to_string(),
        last_name: "Odhiambo".to_string(),
        middle_name: None,
        date_of_birth: "1990-04-12".to_string(),
        gender: Gender::Female,
        phone: "+254722000111".to_string(),
        email: None,
        county: "Nairobi".to_string(),
        national_id: national_id.to_string(),
        nhif_number: None,
        emergency_contact_name: "Juma Odhiambo".to_string(),
        emergency_contact_phone: "+254722000112".to_string(),
    }
}

/// A consultation booking request for the given patient, doctor and slot
#[allow(dead_code)]
pub fn booking_request(
    patient_id: &str,
    doctor_id: &str,
    date: &str,
    time: &str,
) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id: patient_id.to_string(),
        doctor_id: doctor_id.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        duration: None,
        appointment_type: AppointmentType::Consultation,
        notes: None,
    }
}
