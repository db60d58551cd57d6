use super::entities::{
    attendance_dates, attendance_register, attendant_evaluations, weekly_evaluations,
};
use super::{db_error, rows_affected_or_not_found, write_error};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::DomainError;
use domain::evaluation::{
    AttendanceDate, AttendanceMark, AttendanceRepository, AttendantEvaluation, DatedScore,
    EvaluationRepository, ScoredEntry, WeeklyEvaluation,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

pub struct SeaOrmEvaluationRepository {
    db: DatabaseConnection,
}

impl SeaOrmEvaluationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_week(model: weekly_evaluations::Model) -> WeeklyEvaluation {
        WeeklyEvaluation {
            id: model.id,
            date: model.date,
        }
    }

    fn model_to_score(model: attendant_evaluations::Model) -> AttendantEvaluation {
        AttendantEvaluation {
            id: model.id,
            weekly_evaluation: model.weekly_evaluation_id,
            attendant: model.attendant_id,
            raw_score: model.raw_score,
            percentage_score: model.percentage_score,
        }
    }
}

#[async_trait]
impl EvaluationRepository for SeaOrmEvaluationRepository {
    async fn find_or_create_week(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
        date: NaiveDate,
    ) -> Result<WeeklyEvaluation, DomainError> {
        let existing = weekly_evaluations::Entity::find()
            .filter(weekly_evaluations::Column::Date.between(week_start, week_end))
            .order_by_asc(weekly_evaluations::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        if let Some(model) = existing {
            return Ok(Self::model_to_week(model));
        }

        let model = weekly_evaluations::ActiveModel {
            date: Set(date),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error)?;

        tracing::info!(weekly_evaluation_id = model.id, %week_start, "Weekly evaluation opened");
        Ok(Self::model_to_week(model))
    }

    async fn find_week(&self, id: i32) -> Result<Option<WeeklyEvaluation>, DomainError> {
        let model = weekly_evaluations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_week))
    }

    async fn find_weeks(&self) -> Result<Vec<WeeklyEvaluation>, DomainError> {
        let models = weekly_evaluations::Entity::find()
            .order_by_desc(weekly_evaluations::Column::Date)
            .order_by_desc(weekly_evaluations::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_week).collect())
    }

    async fn evaluated_attendants(&self, week_id: i32) -> Result<Vec<i32>, DomainError> {
        attendant_evaluations::Entity::find()
            .select_only()
            .column(attendant_evaluations::Column::AttendantId)
            .filter(attendant_evaluations::Column::WeeklyEvaluationId.eq(week_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    async fn insert_scores(
        &self,
        week_id: i32,
        entries: &[ScoredEntry],
    ) -> Result<Vec<AttendantEvaluation>, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let model = attendant_evaluations::ActiveModel {
                weekly_evaluation_id: Set(week_id),
                attendant_id: Set(entry.attendant),
                raw_score: Set(entry.raw_score),
                percentage_score: Set(entry.percentage),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                write_error(e, || {
                    format!(
                        "Attendant with ID {} has already been evaluated this week.",
                        entry.attendant
                    )
                })
            })?;
            created.push(Self::model_to_score(model));
        }

        txn.commit().await.map_err(db_error)?;
        Ok(created)
    }

    async fn find_scores(&self, week_id: i32) -> Result<Vec<AttendantEvaluation>, DomainError> {
        let models = attendant_evaluations::Entity::find()
            .filter(attendant_evaluations::Column::WeeklyEvaluationId.eq(week_id))
            .order_by_asc(attendant_evaluations::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_score).collect())
    }

    async fn history(
        &self,
        attendant: i32,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<DatedScore>, DomainError> {
        let mut query = attendant_evaluations::Entity::find()
            .find_also_related(weekly_evaluations::Entity)
            .filter(attendant_evaluations::Column::AttendantId.eq(attendant));
        if let Some((from, to)) = range {
            query = query.filter(weekly_evaluations::Column::Date.between(from, to));
        }

        let rows = query
            .order_by_desc(weekly_evaluations::Column::Date)
            .order_by_desc(attendant_evaluations::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(score, week)| {
                week.map(|w| DatedScore {
                    date: w.date,
                    score: score.percentage_score,
                })
            })
            .collect())
    }

    async fn delete_week(&self, id: i32) -> Result<(), DomainError> {
        let result = weekly_evaluations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "WeeklyEvaluation", id)
    }
}

pub struct SeaOrmAttendanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmAttendanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_date(model: attendance_dates::Model) -> AttendanceDate {
        AttendanceDate {
            id: model.id,
            date: model.date,
        }
    }

    fn model_to_mark(model: attendance_register::Model) -> AttendanceMark {
        AttendanceMark {
            id: model.id,
            attendance_date: model.attendance_date_id,
            attendant: model.attendant_id,
            raw_score: model.raw_score,
            percentage_mark: model.percentage_mark,
        }
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<AttendanceDate>, DomainError> {
        let model = attendance_dates::Entity::find()
            .filter(attendance_dates::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_date))
    }
}

#[async_trait]
impl AttendanceRepository for SeaOrmAttendanceRepository {
    async fn find_or_create_date(&self, date: NaiveDate) -> Result<AttendanceDate, DomainError> {
        if let Some(existing) = self.find_by_date(date).await? {
            return Ok(existing);
        }

        let inserted = attendance_dates::ActiveModel {
            date: Set(date),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match inserted {
            Ok(model) => Ok(Self::model_to_date(model)),
            // Another request opened the same day first
            Err(e) => match write_error(e, String::new) {
                DomainError::Duplicate(_) => self
                    .find_by_date(date)
                    .await?
                    .ok_or_else(|| DomainError::not_found("AttendanceDate", date)),
                other => Err(other),
            },
        }
    }

    async fn find_date(&self, id: i32) -> Result<Option<AttendanceDate>, DomainError> {
        let model = attendance_dates::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_date))
    }

    async fn find_dates(&self) -> Result<Vec<AttendanceDate>, DomainError> {
        let models = attendance_dates::Entity::find()
            .order_by_desc(attendance_dates::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_date).collect())
    }

    async fn marked_attendants(&self, date_id: i32) -> Result<Vec<i32>, DomainError> {
        attendance_register::Entity::find()
            .select_only()
            .column(attendance_register::Column::AttendantId)
            .filter(attendance_register::Column::AttendanceDateId.eq(date_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    async fn insert_marks(
        &self,
        date_id: i32,
        entries: &[ScoredEntry],
    ) -> Result<Vec<AttendanceMark>, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let model = attendance_register::ActiveModel {
                attendance_date_id: Set(date_id),
                attendant_id: Set(entry.attendant),
                raw_score: Set(entry.raw_score),
                percentage_mark: Set(entry.percentage),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| {
                write_error(e, || {
                    format!(
                        "Attendant with ID {} has already been marked for today.",
                        entry.attendant
                    )
                })
            })?;
            created.push(Self::model_to_mark(model));
        }

        txn.commit().await.map_err(db_error)?;
        Ok(created)
    }

    async fn find_marks(&self, date_id: i32) -> Result<Vec<AttendanceMark>, DomainError> {
        let models = attendance_register::Entity::find()
            .filter(attendance_register::Column::AttendanceDateId.eq(date_id))
            .order_by_asc(attendance_register::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models.into_iter().map(Self::model_to_mark).collect())
    }

    async fn history(
        &self,
        attendant: i32,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<DatedScore>, DomainError> {
        let mut query = attendance_register::Entity::find()
            .find_also_related(attendance_dates::Entity)
            .filter(attendance_register::Column::AttendantId.eq(attendant));
        if let Some((from, to)) = range {
            query = query.filter(attendance_dates::Column::Date.between(from, to));
        }

        let rows = query
            .order_by_desc(attendance_dates::Column::Date)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .filter_map(|(mark, day)| {
                day.map(|d| DatedScore {
                    date: d.date,
                    score: mark.percentage_mark,
                })
            })
            .collect())
    }

    async fn delete_date(&self, id: i32) -> Result<(), DomainError> {
        let result = attendance_dates::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        rows_affected_or_not_found(result.rows_affected, "AttendanceDate", id)
    }
}
