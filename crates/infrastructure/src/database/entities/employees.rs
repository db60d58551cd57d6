use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: Option<i32>,
    pub name: String,
    pub gender: String,
    pub contact: String,
    pub dob: Date,
    pub location: String,
    pub guarantor_name: String,
    pub guarantor_contact: String,
    pub job_description: String,
    pub date_employed: Date,
    pub training_start: Date,
    pub training_end: Date,
    pub ssnit: Option<String>,
    pub account: Option<String>,
    pub status: String,
    pub site: String,
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
    #[sea_orm(has_many = "super::attendant_evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::attendance_register::Entity")]
    AttendanceMarks,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
