use super::{
    AttendanceDate, AttendanceMark, AttendantEvaluation, DatedScore, ScoredEntry,
    WeeklyEvaluation,
};
use crate::DomainError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Weekly evaluations and their per-attendant scores
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// The evaluation whose date lies in `week_start..=week_end`, created with
    /// `date` if none exists yet
    async fn find_or_create_week(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
        date: NaiveDate,
    ) -> Result<WeeklyEvaluation, DomainError>;

    async fn find_week(&self, id: i32) -> Result<Option<WeeklyEvaluation>, DomainError>;

    /// Newest first
    async fn find_weeks(&self) -> Result<Vec<WeeklyEvaluation>, DomainError>;

    async fn evaluated_attendants(&self, week_id: i32) -> Result<Vec<i32>, DomainError>;

    /// Insert all entries atomically; a (week, attendant) clash fails the whole batch
    async fn insert_scores(
        &self,
        week_id: i32,
        entries: &[ScoredEntry],
    ) -> Result<Vec<AttendantEvaluation>, DomainError>;

    async fn find_scores(&self, week_id: i32) -> Result<Vec<AttendantEvaluation>, DomainError>;

    /// Percentages of one attendant, newest first, optionally limited to a date range
    async fn history(
        &self,
        attendant: i32,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<DatedScore>, DomainError>;

    async fn delete_week(&self, id: i32) -> Result<(), DomainError>;
}

/// Daily attendance register
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_or_create_date(&self, date: NaiveDate) -> Result<AttendanceDate, DomainError>;

    async fn find_date(&self, id: i32) -> Result<Option<AttendanceDate>, DomainError>;

    /// Newest first
    async fn find_dates(&self) -> Result<Vec<AttendanceDate>, DomainError>;

    async fn marked_attendants(&self, date_id: i32) -> Result<Vec<i32>, DomainError>;

    async fn insert_marks(
        &self,
        date_id: i32,
        entries: &[ScoredEntry],
    ) -> Result<Vec<AttendanceMark>, DomainError>;

    async fn find_marks(&self, date_id: i32) -> Result<Vec<AttendanceMark>, DomainError>;

    async fn history(
        &self,
        attendant: i32,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<DatedScore>, DomainError>;

    async fn delete_date(&self, id: i32) -> Result<(), DomainError>;
}
