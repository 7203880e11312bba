pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_identity_schema;
mod m20240601_000002_create_patient_schema;
mod m20240601_000003_create_appointment_schema;
mod m20240601_000004_create_catalog_schema;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_identity_schema::Migration),
            Box::new(m20240601_000002_create_patient_schema::Migration),
            Box::new(m20240601_000003_create_appointment_schema::Migration),
            Box::new(m20240601_000004_create_catalog_schema::Migration),
        ]
    }
}
