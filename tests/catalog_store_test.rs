mod common;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

use hospital_backend::stores::CatalogStore;
use hospital_backend::types::db::{billing_record, drug, inventory_item};

use common::setup_test_db;

async fn seed_drug(db: &DatabaseConnection, name: &str, stock: i32, reorder: i32) {
    drug::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        category: Set("Analgesic".to_string()),
        unit_price: Set(50.0),
        stock_quantity: Set(stock),
        reorder_level: Set(reorder),
        expiry_date: Set(None),
        created_at: Set(Utc::now().timestamp()),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn seed_supply(db: &DatabaseConnection, name: &str, quantity: i32, reorder: i32) {
    inventory_item::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        category: Set("Medical Supplies".to_string()),
        quantity: Set(quantity),
        unit_cost: Set(150.0),
        reorder_level: Set(reorder),
        created_at: Set(Utc::now().timestamp()),
    }
    .insert(db)
    .await
    .unwrap();
}

async fn seed_payment(db: &DatabaseConnection, paid: f64, created_at: i64) {
    billing_record::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        patient_id: Set("patient-1".to_string()),
        description: Set(Some("Consultation fee".to_string())),
        total_amount: Set(paid),
        paid_amount: Set(paid),
        status: Set("PAID".to_string()),
        created_at: Set(created_at),
    }
    .insert(db)
    .await
    .unwrap();
}

#[tokio::test]
async fn low_stock_counts_cover_drugs_and_supplies() {
    let db = setup_test_db().await;
    let store = CatalogStore::new(db.clone());

    seed_drug(&db, "Paracetamol", 20, 100).await;
    seed_drug(&db, "Amoxicillin", 500, 100).await;
    seed_supply(&db, "Surgical Gloves (Box)", 30, 50).await;
    seed_supply(&db, "Syringes 5ml (Pack)", 300, 75).await;

    assert_eq!(store.low_stock_drug_count().await.unwrap(), 1);
    assert_eq!(store.low_stock_inventory_count().await.unwrap(), 1);
}

#[tokio::test]
async fn stock_exactly_at_the_reorder_level_counts_as_low() {
    let db = setup_test_db().await;
    let store = CatalogStore::new(db.clone());

    seed_drug(&db, "Ibuprofen", 100, 100).await;
    seed_supply(&db, "Gauze Rolls", 50, 50).await;

    assert_eq!(store.low_stock_drug_count().await.unwrap(), 1);
    assert_eq!(store.low_stock_inventory_count().await.unwrap(), 1);
}

#[tokio::test]
async fn revenue_sums_respect_the_timestamp_bounds() {
    let db = setup_test_db().await;
    let store = CatalogStore::new(db.clone());

    let now = Utc::now().timestamp();
    seed_payment(&db, 1000.0, now - 100).await;
    seed_payment(&db, 250.0, now - 50).await;
    seed_payment(&db, 400.0, now + 50).await;

    assert_eq!(store.revenue_since(now - 60).await.unwrap(), 650.0);
    assert_eq!(store.revenue_between(now - 200, now).await.unwrap(), 1250.0);

    // An empty window sums to zero rather than erroring
    assert_eq!(
        store.revenue_between(now + 100, now + 200).await.unwrap(),
        0.0
    );
}
