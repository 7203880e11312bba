mod common;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use hospital_backend::errors::api::ApiError;
use hospital_backend::services::ConflictPolicy;
use hospital_backend::stores::{AppointmentFilter, AppointmentStore, PatientStore, UserStore};
use hospital_backend::types::dto::appointments::UpdateAppointmentRequest;
use hospital_backend::types::internal::scheduling::AppointmentStatus;

use common::{booking_request, patient_request, seed_doctor, setup_test_db};

const DATE: &str = "2026-09-15";

struct Fixture {
    store: AppointmentStore,
    patient_id: String,
    doctor_id: String,
    creator_id: String,
}

async fn setup(policy: ConflictPolicy) -> (DatabaseConnection, Fixture) {
    let db = setup_test_db().await;

    let users = UserStore::new(db.clone());
    let doctor = seed_doctor(&users, "doctor@hospital.test").await;
    let patient = PatientStore::new(db.clone())
        .create(patient_request("10000001"))
        .await
        .unwrap();

    let fixture = Fixture {
        store: AppointmentStore::new(db.clone(), policy, true),
        patient_id: patient.id,
        creator_id: doctor.id.clone(),
        doctor_id: doctor.id,
    };
    (db, fixture)
}

fn slot_conflict_message(result: Result<impl std::fmt::Debug, ApiError>) {
    match result {
        Err(ApiError::BadRequest(body)) => {
            assert_eq!(body.0.error, "Doctor is not available at this time");
        }
        other => panic!("expected slot conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn booking_the_same_slot_twice_is_a_conflict() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let first = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "09:00"),
        )
        .await
        .unwrap();
    assert_eq!(first.status, AppointmentStatus::Scheduled.as_str());
    assert_eq!(first.duration, 30);
    assert_eq!(first.created_by, fx.creator_id);

    let second = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "09:00"),
        )
        .await;
    slot_conflict_message(second);

    // Exact matching: the adjacent label is open even though the first
    // appointment notionally runs until 09:30
    fx.store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "09:30"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn overlap_policy_blocks_intersecting_intervals() {
    let (_db, fx) = setup(ConflictPolicy::Overlap).await;

    let mut long_booking = booking_request(&fx.patient_id, &fx.doctor_id, DATE, "09:00");
    long_booking.duration = Some(60);
    fx.store.create(&fx.creator_id, long_booking).await.unwrap();

    let overlapping = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "09:30"),
        )
        .await;
    slot_conflict_message(overlapping);

    fx.store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "10:00"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn unknown_references_are_rejected_before_booking() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let missing_patient = fx
        .store
        .create(
            &fx.creator_id,
            booking_request("ghost", &fx.doctor_id, DATE, "09:00"),
        )
        .await;
    match missing_patient {
        Err(ApiError::BadRequest(body)) => assert_eq!(body.0.error, "Patient not found"),
        other => panic!("expected BadRequest, got {:?}", other),
    }

    // A patient id in the doctor slot fails the role check
    let not_a_doctor = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.patient_id, DATE, "09:00"),
        )
        .await;
    match not_a_doctor {
        Err(ApiError::BadRequest(body)) => assert_eq!(body.0.error, "Doctor not found"),
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn availability_excludes_only_active_bookings() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let open = fx.store.availability(&fx.doctor_id, DATE).await.unwrap();
    assert_eq!(open.len(), 16);
    assert_eq!(open.first().map(String::as_str), Some("09:00"));
    assert_eq!(open.last().map(String::as_str), Some("16:30"));
    for pair in open.windows(2) {
        assert!(pair[0] < pair[1]);
    }

    let booked = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "10:00"),
        )
        .await
        .unwrap();

    let open = fx.store.availability(&fx.doctor_id, DATE).await.unwrap();
    assert_eq!(open.len(), 15);
    assert!(!open.contains(&"10:00".to_string()));

    // Cancelling frees the slot again
    fx.store.cancel(&booked.id, None).await.unwrap();
    let open = fx.store.availability(&fx.doctor_id, DATE).await.unwrap();
    assert_eq!(open.len(), 16);
}

#[tokio::test]
async fn cancel_records_the_reason_and_is_idempotent() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let booked = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "11:00"),
        )
        .await
        .unwrap();

    let cancelled = fx
        .store
        .cancel(&booked.id, Some("Patient travelled".to_string()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled.as_str());
    assert_eq!(
        cancelled.notes.as_deref(),
        Some("Cancelled: Patient travelled")
    );

    let again = fx
        .store
        .cancel(&booked.id, Some("Another reason".to_string()))
        .await
        .unwrap();
    assert_eq!(again.status, AppointmentStatus::Cancelled.as_str());
    assert_eq!(again.notes, cancelled.notes);
}

#[tokio::test]
async fn update_applies_partial_changes_and_normalizes_the_date() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let booked = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "12:00"),
        )
        .await
        .unwrap();

    let updated = fx
        .store
        .update(
            &booked.id,
            UpdateAppointmentRequest {
                date: Some("2026-09-16".to_string()),
                time: Some("14:30".to_string()),
                status: Some(AppointmentStatus::Confirmed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.date, "2026-09-16");
    assert_eq!(updated.time, "14:30");
    assert_eq!(updated.status, AppointmentStatus::Confirmed.as_str());
    assert_eq!(updated.patient_id, booked.patient_id);

    let bad_date = fx
        .store
        .update(
            &booked.id,
            UpdateAppointmentRequest {
                date: Some("16/09/2026".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(bad_date, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn list_filters_by_doctor_and_date() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    fx.store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, DATE, "09:00"),
        )
        .await
        .unwrap();
    fx.store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, "2026-09-16", "09:00"),
        )
        .await
        .unwrap();

    let (rows, total) = fx
        .store
        .list(AppointmentFilter {
            doctor_id: Some(fx.doctor_id.clone()),
            date: Some(DATE.to_string()),
            page: 1,
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].date, DATE);

    let (rows, total) = fx
        .store
        .list(AppointmentFilter {
            doctor_id: Some("someone-else".to_string()),
            page: 1,
            limit: 10,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(total, 0);
    assert!(rows.is_empty());
}

#[tokio::test]
async fn stats_report_zero_rate_on_an_empty_table() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let stats = fx.store.stats().await.unwrap();
    assert_eq!(stats.total_appointments, 0);
    assert_eq!(stats.today_appointments, 0);
    assert_eq!(stats.completion_rate, "0");
}

#[tokio::test]
async fn stats_track_todays_bookings_and_the_completion_rate() {
    let (_db, fx) = setup(ConflictPolicy::ExactSlot).await;

    let today = Utc::now().date_naive().to_string();
    let first = fx
        .store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, &today, "09:00"),
        )
        .await
        .unwrap();
    fx.store
        .create(
            &fx.creator_id,
            booking_request(&fx.patient_id, &fx.doctor_id, &today, "09:30"),
        )
        .await
        .unwrap();

    fx.store
        .update(
            &first.id,
            UpdateAppointmentRequest {
                status: Some(AppointmentStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stats = fx.store.stats().await.unwrap();
    assert_eq!(stats.total_appointments, 2);
    assert_eq!(stats.today_appointments, 2);
    assert_eq!(stats.completed_appointments, 1);
    assert_eq!(stats.pending_appointments, 1);
    assert_eq!(stats.cancelled_appointments, 0);
    assert_eq!(stats.completion_rate, "50.0");
}
