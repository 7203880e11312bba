use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::PatientId).string().not_null())
                    .col(ColumnDef::new(Appointments::DoctorId).string().not_null())
                    .col(ColumnDef::new(Appointments::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Appointments::Date).string().not_null())
                    .col(ColumnDef::new(Appointments::Time).string().not_null())
                    .col(
                        ColumnDef::new(Appointments::Duration)
                            .integer()
                            .not_null()
                            .default(30),
                    )
                    .col(
                        ColumnDef::new(Appointments::AppointmentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string()
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(ColumnDef::new(Appointments::Notes).text().null())
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookup index for the per-doctor/day conflict check and availability scan
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_appointments_doctor_date")
                    .table(Appointments::Table)
                    .col(Appointments::DoctorId)
                    .col(Appointments::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    PatientId,
    DoctorId,
    CreatedBy,
    Date,
    Time,
    Duration,
    AppointmentType,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}
