use crate::error::{DomainError, Result};
use crate::performance::{HUNDRED, round2};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of raw score and its fixed maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreKind {
    /// Weekly soft-skill evaluation, scored out of 7
    WeeklyEvaluation,
    /// Daily attendance mark, scored out of 2
    DailyAttendance,
}

impl ScoreKind {
    pub fn max_raw_score(self) -> Decimal {
        match self {
            Self::WeeklyEvaluation => Decimal::from(7),
            Self::DailyAttendance => Decimal::from(2),
        }
    }

    /// Validate `raw` and convert it to a percentage of the maximum
    pub fn percentage(self, raw: Decimal) -> Result<Decimal> {
        let max = self.max_raw_score();
        if raw > max {
            return Err(DomainError::validation(format!(
                "Score cannot exceed {:.1}.",
                max
            )));
        }
        if raw.is_sign_negative() && !raw.is_zero() {
            return Err(DomainError::validation("Score cannot be negative."));
        }
        Ok(round2(raw / max * HUNDRED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_evaluation_examples() {
        let kind = ScoreKind::WeeklyEvaluation;
        assert_eq!(kind.percentage(dec("6.3")).unwrap(), dec("90"));
        assert_eq!(kind.percentage(dec("7")).unwrap(), dec("100"));
        assert_eq!(kind.percentage(Decimal::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(kind.percentage(dec("5")).unwrap(), dec("71.43"));
    }

    #[test]
    fn test_attendance_examples() {
        let kind = ScoreKind::DailyAttendance;
        assert_eq!(kind.percentage(dec("1.8")).unwrap(), dec("90"));
        assert_eq!(kind.percentage(dec("1")).unwrap(), dec("50"));
        assert_eq!(kind.percentage(dec("2")).unwrap(), dec("100"));
    }

    #[test]
    fn test_rejects_scores_above_maximum() {
        assert_eq!(
            ScoreKind::WeeklyEvaluation.percentage(dec("7.01")),
            Err(DomainError::validation("Score cannot exceed 7.0."))
        );
        assert_eq!(
            ScoreKind::DailyAttendance.percentage(dec("2.5")),
            Err(DomainError::validation("Score cannot exceed 2.0."))
        );
    }

    #[test]
    fn test_rejects_negative_scores() {
        assert!(ScoreKind::WeeklyEvaluation.percentage(dec("-1")).is_err());
        assert!(ScoreKind::DailyAttendance.percentage(dec("-0.5")).is_err());
    }

    #[test]
    fn test_every_tenth_of_a_point_in_range() {
        for tenths in 0..=70 {
            let raw = Decimal::new(tenths, 1);
            let expected = (raw / Decimal::from(7) * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(ScoreKind::WeeklyEvaluation.percentage(raw).unwrap(), expected);
        }
    }
}
