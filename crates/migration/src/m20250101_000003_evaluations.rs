use crate::m20250101_000001_staff::Employees;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create weekly_evaluations table
        manager
            .create_table(
                Table::create()
                    .table(WeeklyEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeeklyEvaluations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeeklyEvaluations::Date).date().not_null())
                    .to_owned(),
            )
            .await?;

        // Create attendant_evaluations table
        manager
            .create_table(
                Table::create()
                    .table(AttendantEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendantEvaluations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendantEvaluations::WeeklyEvaluationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendantEvaluations::AttendantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendantEvaluations::RawScore)
                            .decimal_len(4, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendantEvaluations::PercentageScore)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendant_evaluation_week")
                            .from(
                                AttendantEvaluations::Table,
                                AttendantEvaluations::WeeklyEvaluationId,
                            )
                            .to(WeeklyEvaluations::Table, WeeklyEvaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendant_evaluation_employee")
                            .from(AttendantEvaluations::Table, AttendantEvaluations::AttendantId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendant_evaluation_week_attendant")
                    .table(AttendantEvaluations::Table)
                    .col(AttendantEvaluations::WeeklyEvaluationId)
                    .col(AttendantEvaluations::AttendantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create attendance_dates table
        manager
            .create_table(
                Table::create()
                    .table(AttendanceDates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceDates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceDates::Date)
                            .date()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create attendance_register table
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRegister::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRegister::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRegister::AttendanceDateId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRegister::AttendantId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRegister::RawScore)
                            .decimal_len(4, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRegister::PercentageMark)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_register_date")
                            .from(
                                AttendanceRegister::Table,
                                AttendanceRegister::AttendanceDateId,
                            )
                            .to(AttendanceDates::Table, AttendanceDates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_register_employee")
                            .from(AttendanceRegister::Table, AttendanceRegister::AttendantId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_register_date_attendant")
                    .table(AttendanceRegister::Table)
                    .col(AttendanceRegister::AttendanceDateId)
                    .col(AttendanceRegister::AttendantId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceRegister::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AttendanceDates::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AttendantEvaluations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(WeeklyEvaluations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum WeeklyEvaluations {
    Table,
    Id,
    Date,
}

#[derive(DeriveIden)]
enum AttendantEvaluations {
    Table,
    Id,
    WeeklyEvaluationId,
    AttendantId,
    RawScore,
    PercentageScore,
}

#[derive(DeriveIden)]
enum AttendanceDates {
    Table,
    Id,
    Date,
}

#[derive(DeriveIden)]
enum AttendanceRegister {
    Table,
    Id,
    AttendanceDateId,
    AttendantId,
    RawScore,
    PercentageMark,
}
