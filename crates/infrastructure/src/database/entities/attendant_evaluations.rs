use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendant_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub weekly_evaluation_id: i32,
    pub attendant_id: i32,
    pub raw_score: Decimal,
    pub percentage_score: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::weekly_evaluations::Entity",
        from = "Column::WeeklyEvaluationId",
        to = "super::weekly_evaluations::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    WeeklyEvaluation,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::AttendantId",
        to = "super::employees::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Attendant,
}

impl Related<super::weekly_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WeeklyEvaluation.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
