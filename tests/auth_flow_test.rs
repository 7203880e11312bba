mod common;

use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};

use hospital_backend::errors::auth::AuthError;
use hospital_backend::services::TokenService;
use hospital_backend::stores::UserStore;
use hospital_backend::types::internal::auth::Role;

use common::{setup_test_db, staff_request};

#[tokio::test]
async fn registered_staff_can_login_and_receive_a_valid_token() {
    let db = setup_test_db().await;
    let store = UserStore::new(db);
    let tokens = TokenService::new("test-secret".to_string(), 60);

    let (user, staff) = store
        .register_staff(staff_request("doctor@hospital.test", Role::Doctor))
        .await
        .unwrap();
    assert!(staff.staff_number.starts_with("DOC"));
    assert_eq!(user.staff_id.as_deref(), Some(staff.id.as_str()));

    let verified = store
        .verify_credentials("doctor@hospital.test", "secret123")
        .await
        .unwrap();
    assert_eq!(verified.id, user.id);

    let token = tokens.generate_jwt(&verified).unwrap();
    let claims = tokens.validate_jwt(&token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "doctor@hospital.test");
    assert_eq!(claims.role, Role::Doctor);
    assert_eq!(claims.staff_id, user.staff_id);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let db = setup_test_db().await;
    let store = UserStore::new(db);

    store
        .register_staff(staff_request("nurse@hospital.test", Role::Nurse))
        .await
        .unwrap();

    let wrong_password = store
        .verify_credentials("nurse@hospital.test", "not-the-password")
        .await;
    assert!(matches!(
        wrong_password,
        Err(AuthError::InvalidCredentials(_))
    ));

    let unknown_email = store
        .verify_credentials("nobody@hospital.test", "secret123")
        .await;
    assert!(matches!(
        unknown_email,
        Err(AuthError::InvalidCredentials(_))
    ));
}

#[tokio::test]
async fn deactivated_account_cannot_login() {
    let db = setup_test_db().await;
    let store = UserStore::new(db.clone());

    let (user, _) = store
        .register_staff(staff_request("locked@hospital.test", Role::LabTech))
        .await
        .unwrap();

    let mut active = user.into_active_model();
    active.is_active = Set(false);
    active.update(&db).await.unwrap();

    let result = store
        .verify_credentials("locked@hospital.test", "secret123")
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = setup_test_db().await;
    let store = UserStore::new(db);

    store
        .register_staff(staff_request("taken@hospital.test", Role::Doctor))
        .await
        .unwrap();

    let result = store
        .register_staff(staff_request("taken@hospital.test", Role::Nurse))
        .await;
    assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
}

#[tokio::test]
async fn change_password_requires_the_current_one() {
    let db = setup_test_db().await;
    let store = UserStore::new(db);

    let (user, _) = store
        .register_staff(staff_request("pharm@hospital.test", Role::Pharmacist))
        .await
        .unwrap();

    let wrong = store
        .change_password(&user.id, "wrong-current", "fresh-password")
        .await;
    assert!(matches!(wrong, Err(AuthError::InvalidCurrentPassword(_))));

    store
        .change_password(&user.id, "secret123", "fresh-password")
        .await
        .unwrap();

    let old = store
        .verify_credentials("pharm@hospital.test", "secret123")
        .await;
    assert!(matches!(old, Err(AuthError::InvalidCredentials(_))));

    store
        .verify_credentials("pharm@hospital.test", "fresh-password")
        .await
        .unwrap();
}

#[tokio::test]
async fn ensure_admin_seeds_exactly_once() {
    let db = setup_test_db().await;
    let store = UserStore::new(db);

    let created = store
        .ensure_admin("admin@hospital.test", "bootstrap1")
        .await
        .unwrap();
    assert!(created);

    let again = store
        .ensure_admin("admin@hospital.test", "different-password")
        .await
        .unwrap();
    assert!(!again);

    // The original password still works and the account holds ADMIN
    let admin = store
        .verify_credentials("admin@hospital.test", "bootstrap1")
        .await
        .unwrap();
    assert_eq!(admin.role, Role::Admin.as_str());
    assert!(admin.staff_id.is_none());
}
