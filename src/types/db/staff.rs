use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub staff_number: String,
    #[sea_orm(unique)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub specialization: Option<String>,
    pub hire_date: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
