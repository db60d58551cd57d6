use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use domain::evaluation::{
    AttendanceDate, AttendanceMark, AttendanceRepository, AttendantEvaluation,
    EvaluationRepository, ScoreEntry, WeeklyEvaluation, score_batch,
};
use domain::period::week_bounds;
use domain::staff::EmployeeRepository;
use domain::{Actor, Capability, DomainError, Result, ScoreKind};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// One accepted weekly evaluation entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedAttendant {
    /// Name of the evaluated employee
    pub attendant: String,
    pub attendant_id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_score: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage_score: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySubmission {
    pub weekly_evaluation_id: i32,
    pub created: Vec<EvaluatedAttendant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceSubmission {
    pub attendance_date: NaiveDate,
    #[serde(skip)]
    pub marks: Vec<AttendanceMark>,
}

/// A stored week together with its scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDetail {
    #[serde(flatten)]
    pub week: WeeklyEvaluation,
    pub week_number: u32,
    pub evaluations: Vec<AttendantEvaluation>,
}

/// A stored register day together with its marks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterDetail {
    #[serde(flatten)]
    pub date: AttendanceDate,
    pub register: Vec<AttendanceMark>,
}

/// Weekly soft-skill evaluations and the daily attendance register
pub struct EvaluationService {
    evaluations: Arc<dyn EvaluationRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl EvaluationService {
    pub fn new(
        evaluations: Arc<dyn EvaluationRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            evaluations,
            attendance,
            employees,
        }
    }

    /// Score attendants for the Monday-Sunday week containing `today`.
    ///
    /// Every entry is checked before anything is written; an attendant already
    /// evaluated this week, or listed twice, rejects the whole submission.
    pub async fn submit_weekly(
        &self,
        actor: &Actor,
        entries: &[ScoreEntry],
        today: NaiveDate,
    ) -> Result<WeeklySubmission> {
        Capability::EvaluateAttendants.require(actor)?;
        score_batch(ScoreKind::WeeklyEvaluation, entries, &HashSet::new())?;

        let mut names = HashMap::with_capacity(entries.len());
        for entry in entries {
            let attendant = self
                .employees
                .find_by_id(entry.attendant)
                .await?
                .ok_or_else(|| missing_attendant(entry.attendant))?;
            attendant.ensure_evaluable()?;
            names.insert(attendant.id, attendant.profile.name);
        }

        let (monday, sunday) = week_bounds(today);
        let week = self
            .evaluations
            .find_or_create_week(monday, sunday, today)
            .await?;
        let evaluated: HashSet<i32> = self
            .evaluations
            .evaluated_attendants(week.id)
            .await?
            .into_iter()
            .collect();
        let scored = score_batch(ScoreKind::WeeklyEvaluation, entries, &evaluated)?;
        let saved = self.evaluations.insert_scores(week.id, &scored).await?;

        info!(
            week = week.id,
            evaluator = actor.user.id,
            count = saved.len(),
            "📝 Weekly evaluations submitted"
        );

        Ok(WeeklySubmission {
            weekly_evaluation_id: week.id,
            created: saved
                .into_iter()
                .map(|e| EvaluatedAttendant {
                    attendant: names.remove(&e.attendant).unwrap_or_default(),
                    attendant_id: e.attendant,
                    raw_score: e.raw_score,
                    percentage_score: e.percentage_score,
                })
                .collect(),
        })
    }

    /// Mark attendance for `today`. Captains only.
    pub async fn submit_attendance(
        &self,
        actor: &Actor,
        entries: &[ScoreEntry],
        today: NaiveDate,
    ) -> Result<AttendanceSubmission> {
        Capability::MarkAttendance.require(actor)?;
        score_batch(ScoreKind::DailyAttendance, entries, &HashSet::new())?;

        for entry in entries {
            if self.employees.find_by_id(entry.attendant).await?.is_none() {
                return Err(missing_attendant(entry.attendant));
            }
        }

        let day = self.attendance.find_or_create_date(today).await?;
        let marked: HashSet<i32> = self
            .attendance
            .marked_attendants(day.id)
            .await?
            .into_iter()
            .collect();
        let scored = score_batch(ScoreKind::DailyAttendance, entries, &marked)?;
        let marks = self.attendance.insert_marks(day.id, &scored).await?;

        info!(
            date = %day.date,
            captain = actor.user.id,
            count = marks.len(),
            "📋 Attendance marked"
        );

        Ok(AttendanceSubmission {
            attendance_date: day.date,
            marks,
        })
    }

    pub async fn list_weeks(&self) -> Result<Vec<WeekDetail>> {
        let mut weeks = Vec::new();
        for week in self.evaluations.find_weeks().await? {
            weeks.push(self.week_detail(week).await?);
        }
        Ok(weeks)
    }

    pub async fn get_week(&self, id: i32) -> Result<WeekDetail> {
        let week = self
            .evaluations
            .find_week(id)
            .await?
            .ok_or_else(|| DomainError::not_found("WeeklyEvaluation", id))?;
        self.week_detail(week).await
    }

    async fn week_detail(&self, week: WeeklyEvaluation) -> Result<WeekDetail> {
        let evaluations = self.evaluations.find_scores(week.id).await?;
        Ok(WeekDetail {
            week_number: week.week_number(),
            week,
            evaluations,
        })
    }

    /// Deletes the week and every score in it
    pub async fn delete_week(&self, actor: &Actor, id: i32) -> Result<()> {
        Capability::EvaluateAttendants.require(actor)?;
        self.evaluations.delete_week(id).await?;
        info!(id, "🗑️ Weekly evaluation deleted");
        Ok(())
    }

    pub async fn list_registers(&self) -> Result<Vec<RegisterDetail>> {
        let mut days = Vec::new();
        for date in self.attendance.find_dates().await? {
            let register = self.attendance.find_marks(date.id).await?;
            days.push(RegisterDetail { date, register });
        }
        Ok(days)
    }

    pub async fn get_register(&self, id: i32) -> Result<RegisterDetail> {
        let date = self
            .attendance
            .find_date(id)
            .await?
            .ok_or_else(|| DomainError::not_found("AttendanceDate", id))?;
        let register = self.attendance.find_marks(date.id).await?;
        Ok(RegisterDetail { date, register })
    }

    /// Deletes the register day and every mark in it
    pub async fn delete_register(&self, actor: &Actor, id: i32) -> Result<()> {
        Capability::MarkAttendance.require(actor)?;
        self.attendance.delete_date(id).await?;
        info!(id, "🗑️ Attendance date deleted");
        Ok(())
    }
}

fn missing_attendant(id: i32) -> DomainError {
    DomainError::validation(format!("Attendant with ID {} does not exist.", id))
}
