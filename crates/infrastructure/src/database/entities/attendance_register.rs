use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_register")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub attendance_date_id: i32,
    pub attendant_id: i32,
    pub raw_score: Decimal,
    pub percentage_mark: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_dates::Entity",
        from = "Column::AttendanceDateId",
        to = "super::attendance_dates::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    AttendanceDate,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::AttendantId",
        to = "super::employees::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Attendant,
}

impl Related<super::attendance_dates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceDate.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
