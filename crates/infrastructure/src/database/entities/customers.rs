use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub contact: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::credit_sales::Entity")]
    CreditSales,
    #[sea_orm(has_many = "super::credit_collections::Entity")]
    CreditCollections,
}

impl ActiveModelBehavior for ActiveModel {}
