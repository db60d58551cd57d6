use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weekly_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendant_evaluations::Entity")]
    AttendantEvaluations,
}

impl Related<super::attendant_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendantEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
