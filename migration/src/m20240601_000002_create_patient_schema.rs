use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Patients::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Patients::PatientNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Patients::FirstName).string().not_null())
                    .col(ColumnDef::new(Patients::LastName).string().not_null())
                    .col(ColumnDef::new(Patients::MiddleName).string().null())
                    .col(ColumnDef::new(Patients::DateOfBirth).string().not_null())
                    .col(ColumnDef::new(Patients::Gender).string().not_null())
                    .col(ColumnDef::new(Patients::Phone).string().not_null())
                    .col(ColumnDef::new(Patients::Email).string().null())
                    .col(ColumnDef::new(Patients::County).string().not_null())
                    .col(
                        ColumnDef::new(Patients::NationalId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Patients::NhifNumber).string().null())
                    .col(
                        ColumnDef::new(Patients::EmergencyContactName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::EmergencyContactPhone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Patients::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Patients {
    Table,
    Id,
    PatientNumber,
    FirstName,
    LastName,
    MiddleName,
    DateOfBirth,
    Gender,
    Phone,
    Email,
    County,
    NationalId,
    NhifNumber,
    EmergencyContactName,
    EmergencyContactPhone,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
