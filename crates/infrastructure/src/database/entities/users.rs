use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub is_captain: bool,
    pub is_manager: bool,
    pub is_supervisor: bool,
    pub is_no_role: bool,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::employees::Entity")]
    Employee,
    #[sea_orm(has_one = "super::captains::Entity")]
    Captain,
    #[sea_orm(has_many = "super::fuel_sales::Entity")]
    FuelSales,
    #[sea_orm(has_many = "super::shop_sales::Entity")]
    ShopSales,
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl Related<super::captains::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Captain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
