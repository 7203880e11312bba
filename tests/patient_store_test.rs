mod common;

use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};

use hospital_backend::errors::api::ApiError;
use hospital_backend::stores::PatientStore;
use hospital_backend::types::dto::patients::UpdatePatientRequest;

use common::{patient_request, setup_test_db};

#[tokio::test]
async fn patient_numbers_are_sequential_and_zero_padded() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let first = store.create(patient_request("11111111")).await.unwrap();
    let second = store.create(patient_request("22222222")).await.unwrap();

    assert_eq!(first.patient_number, "P000001");
    assert_eq!(second.patient_number, "P000002");
}

#[tokio::test]
async fn duplicate_national_id_is_rejected() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    store.create(patient_request("33333333")).await.unwrap();

    let result = store.create(patient_request("33333333")).await;
    match result {
        Err(ApiError::BadRequest(body)) => {
            assert_eq!(body.0.error, "Patient with this National ID already exists");
        }
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_date_of_birth_is_a_validation_error() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let mut request = patient_request("44444444");
    request.date_of_birth = "12/04/1990".to_string();

    let result = store.create(request).await;
    assert!(matches!(result, Err(ApiError::BadRequest(_))));
}

#[tokio::test]
async fn list_searches_and_paginates() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let mut request = patient_request("55555551");
    request.first_name = "Wambui".to_string();
    store.create(request).await.unwrap();
    store.create(patient_request("55555552")).await.unwrap();
    store.create(patient_request("55555553")).await.unwrap();

    let (page, total) = store.list(1, 2, None).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(total, 3);

    let (page, total) = store.list(2, 2, None).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(total, 3);

    let (matches, total) = store.list(1, 10, Some("Wambui")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(matches[0].first_name, "Wambui");

    // Search also covers the assigned patient number
    let (matches, _) = store.list(1, 10, Some("P000002")).await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].national_id, "55555552");
}

#[tokio::test]
async fn quick_search_covers_nhif_numbers_and_caps_at_twenty() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let mut insured = patient_request("90000000");
    insured.first_name = "Njeri".to_string();
    insured.nhif_number = Some("NH-555777".to_string());
    store.create(insured).await.unwrap();

    for i in 0..21 {
        store
            .create(patient_request(&format!("901000{:02}", i)))
            .await
            .unwrap();
    }

    // NHIF number is searchable here, unlike the paginated list
    let matches = store.search("NH-555777").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].first_name, "Njeri");

    // Every seeded patient shares the default first name; the result set
    // is still capped
    let matches = store.search("Amina").await.unwrap();
    assert_eq!(matches.len(), 20);
}

#[tokio::test]
async fn quick_search_skips_deactivated_patients() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db.clone());

    let patient = store.create(patient_request("91111111")).await.unwrap();

    let mut active = patient.into_active_model();
    active.is_active = Set(false);
    active.update(&db).await.unwrap();

    let matches = store.search("91111111").await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn deactivated_patients_are_hidden_from_the_list() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db.clone());

    let patient = store.create(patient_request("66666666")).await.unwrap();
    store.create(patient_request("66666667")).await.unwrap();

    let mut active = patient.into_active_model();
    active.is_active = Set(false);
    active.update(&db).await.unwrap();

    let (patients, total) = store.list(1, 10, None).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(patients[0].national_id, "66666667");
}

#[tokio::test]
async fn update_changes_only_the_given_fields() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let patient = store.create(patient_request("77777777")).await.unwrap();

    let updated = store
        .update(
            &patient.id,
            UpdatePatientRequest {
                phone: Some("+254733999888".to_string()),
                nhif_number: Some("NH-123".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.phone, "+254733999888");
    assert_eq!(updated.nhif_number.as_deref(), Some("NH-123"));
    assert_eq!(updated.first_name, patient.first_name);
    assert_eq!(updated.patient_number, patient.patient_number);
    assert_eq!(updated.national_id, patient.national_id);
}

#[tokio::test]
async fn updating_a_missing_patient_is_not_found() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let result = store
        .update("no-such-id", UpdatePatientRequest::default())
        .await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn stats_report_zero_coverage_on_an_empty_registry() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_patients, 0);
    assert_eq!(stats.active_patients, 0);
    assert_eq!(stats.nhif_coverage, "0");
}

#[tokio::test]
async fn stats_count_nhif_holders() {
    let db = setup_test_db().await;
    let store = PatientStore::new(db);

    let mut insured = patient_request("88888881");
    insured.nhif_number = Some("NH-881".to_string());
    store.create(insured).await.unwrap();
    store.create(patient_request("88888882")).await.unwrap();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.total_patients, 2);
    assert_eq!(stats.active_patients, 2);
    assert_eq!(stats.patients_with_nhif, 1);
    assert_eq!(stats.nhif_coverage, "50.0");
    assert_eq!(stats.new_patients_this_month, 2);
}
