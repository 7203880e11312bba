use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users table: one row per login identity, soft-deactivated only
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::StaffId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Staff table: HR profile attached 1:1 to a staff-type user
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::StaffNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::UserId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::FirstName).string().not_null())
                    .col(ColumnDef::new(Staff::LastName).string().not_null())
                    .col(ColumnDef::new(Staff::MiddleName).string().null())
                    .col(ColumnDef::new(Staff::Phone).string().not_null())
                    .col(ColumnDef::new(Staff::Email).string().not_null())
                    .col(ColumnDef::new(Staff::Department).string().not_null())
                    .col(ColumnDef::new(Staff::Position).string().not_null())
                    .col(ColumnDef::new(Staff::Specialization).string().null())
                    .col(ColumnDef::new(Staff::HireDate).string().not_null())
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
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
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    StaffId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    StaffNumber,
    UserId,
    FirstName,
    LastName,
    MiddleName,
    Phone,
    Email,
    Department,
    Position,
    Specialization,
    HireDate,
    CreatedAt,
}
