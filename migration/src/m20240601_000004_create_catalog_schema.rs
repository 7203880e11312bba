use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drugs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drugs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drugs::Name).string().not_null())
                    .col(ColumnDef::new(Drugs::Category).string().not_null())
                    .col(ColumnDef::new(Drugs::UnitPrice).double().not_null())
                    .col(
                        ColumnDef::new(Drugs::StockQuantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Drugs::ReorderLevel)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Drugs::ExpiryDate).string().null())
                    .col(ColumnDef::new(Drugs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LabTests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LabTests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LabTests::Name).string().not_null())
                    .col(ColumnDef::new(LabTests::Category).string().not_null())
                    .col(ColumnDef::new(LabTests::Price).double().not_null())
                    .col(
                        ColumnDef::new(LabTests::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InventoryItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InventoryItems::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InventoryItems::Name).string().not_null())
                    .col(
                        ColumnDef::new(InventoryItems::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::UnitCost)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::ReorderLevel)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(InventoryItems::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BillingRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BillingRecords::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::PatientId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BillingRecords::Description).string().null())
                    .col(
                        ColumnDef::new(BillingRecords::TotalAmount)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BillingRecords::PaidAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(BillingRecords::Status).string().not_null())
                    .col(
                        ColumnDef::new(BillingRecords::CreatedAt)
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
            .drop_table(Table::drop().table(BillingRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InventoryItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LabTests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Drugs::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Drugs {
    Table,
    Id,
    Name,
    Category,
    UnitPrice,
    StockQuantity,
    ReorderLevel,
    ExpiryDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LabTests {
    Table,
    Id,
    Name,
    Category,
    Price,
    CreatedAt,
}

#[derive(DeriveIden)]
enum InventoryItems {
    Table,
    Id,
    Name,
    Category,
    Quantity,
    UnitCost,
    ReorderLevel,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BillingRecords {
    Table,
    Id,
    PatientId,
    Description,
    TotalAmount,
    PaidAmount,
    Status,
    CreatedAt,
}
