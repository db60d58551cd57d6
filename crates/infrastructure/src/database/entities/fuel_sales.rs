use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fuel_sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub date: Date,
    pub pump: String,
    pub captain_id: i32,
    pub pms_sales: Decimal,
    pub dx_sales: Decimal,
    pub vp_sales: Decimal,
    pub performance: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::captains::Entity",
        from = "Column::CaptainId",
        to = "super::captains::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Captain,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::captains::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Captain.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
