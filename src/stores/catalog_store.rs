use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::errors::api::ApiError;
use crate::types::db::billing_record::{self, Entity as BillingRecord};
use crate::types::db::drug::{self, Entity as Drug};
use crate::types::db::inventory_item::{self, Entity as InventoryItem};

/// CatalogStore covers the flat catalog/ledger tables (drugs, billing)
/// that are read for aggregate dashboard figures.
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sum of billing collections since the given timestamp
    pub async fn revenue_since(&self, from: i64) -> Result<f64, ApiError> {
        let total: Option<f64> = BillingRecord::find()
            .select_only()
            .column_as(billing_record::Column::PaidAmount.sum(), "total")
            .filter(billing_record::Column::CreatedAt.gte(from))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(ApiError::database)?
            .flatten();

        Ok(total.unwrap_or(0.0))
    }

    /// Sum of billing collections within a timestamp range
    pub async fn revenue_between(&self, from: i64, to: i64) -> Result<f64, ApiError> {
        let total: Option<f64> = BillingRecord::find()
            .select_only()
            .column_as(billing_record::Column::PaidAmount.sum(), "total")
            .filter(billing_record::Column::CreatedAt.gte(from))
            .filter(billing_record::Column::CreatedAt.lt(to))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(ApiError::database)?
            .flatten();

        Ok(total.unwrap_or(0.0))
    }

    /// Number of drugs at or below their reorder level
    pub async fn low_stock_drug_count(&self) -> Result<u64, ApiError> {
        Drug::find()
            .filter(
                Expr::col(drug::Column::StockQuantity)
                    .lte(Expr::col(drug::Column::ReorderLevel)),
            )
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }

    /// Number of supply items at or below their reorder level
    pub async fn low_stock_inventory_count(&self) -> Result<u64, ApiError> {
        InventoryItem::find()
            .filter(
                Expr::col(inventory_item::Column::Quantity)
                    .lte(Expr::col(inventory_item::Column::ReorderLevel)),
            )
            .count(&self.db)
            .await
            .map_err(ApiError::database)
    }
}
