use crate::error::{DomainError, Result};
use crate::scoring::ScoreKind;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Container for one calendar week of attendant evaluations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEvaluation {
    pub id: i32,
    /// Any day of the week; the week is the Monday-Sunday span containing it
    pub date: NaiveDate,
}

impl WeeklyEvaluation {
    pub fn week_number(&self) -> u32 {
        self.date.iso_week().week()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendantEvaluation {
    pub id: i32,
    pub weekly_evaluation: i32,
    pub attendant: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub raw_score: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub percentage_score: Decimal,
}

/// One calendar day of the attendance register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDate {
    pub id: i32,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub id: i32,
    pub attendance_date: i32,
    pub attendant: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub raw_score: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub percentage_mark: Decimal,
}

/// Raw score submitted for one attendant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub attendant: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub raw_score: Decimal,
}

/// A validated score with its derived percentage, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry {
    pub attendant: i32,
    pub raw_score: Decimal,
    pub percentage: Decimal,
}

/// A stored percentage with the date of the week/day it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatedScore {
    pub date: NaiveDate,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub score: Decimal,
}

/// Validate a submission against the score range and against attendants
/// already scored for the same week/day. Nothing is written unless every
/// entry passes.
pub fn score_batch(
    kind: ScoreKind,
    entries: &[ScoreEntry],
    already_scored: &HashSet<i32>,
) -> Result<Vec<ScoredEntry>> {
    if entries.is_empty() {
        return Err(DomainError::validation(match kind {
            ScoreKind::WeeklyEvaluation => "No evaluations provided.",
            ScoreKind::DailyAttendance => "No attendance marks provided.",
        }));
    }

    let mut seen = HashSet::new();
    let mut scored = Vec::with_capacity(entries.len());
    for entry in entries {
        if already_scored.contains(&entry.attendant) || !seen.insert(entry.attendant) {
            return Err(DomainError::Duplicate(match kind {
                ScoreKind::WeeklyEvaluation => format!(
                    "Attendant with ID {} has already been evaluated this week.",
                    entry.attendant
                ),
                ScoreKind::DailyAttendance => format!(
                    "Attendant with ID {} has already been marked for today.",
                    entry.attendant
                ),
            }));
        }
        // Raw scores are stored as NUMERIC(4, 2)
        if entry.raw_score.normalize().scale() > 2 {
            return Err(DomainError::validation(
                "Ensure that there are no more than 2 decimal places for raw_score.",
            ));
        }
        scored.push(ScoredEntry {
            attendant: entry.attendant,
            raw_score: entry.raw_score,
            percentage: kind.percentage(entry.raw_score)?,
        });
    }
    Ok(scored)
}
