//! Performance calculator.
//!
//! Performance is a sales total expressed as a percentage of a target,
//! rounded to two decimal places half-up. A missing or non-positive target
//! yields `None`, the "no performance yet" sentinel; callers store it as-is
//! and never treat it as an error.

use rust_decimal::{Decimal, RoundingStrategy};

const DECIMAL_PLACES: u32 = 2;

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Round to 2 decimal places, half-up (away from zero on a tie)
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// `total / target * 100`, rounded; `None` when the target is absent or not positive
pub fn performance_percentage(total: Decimal, target: Option<Decimal>) -> Option<Decimal> {
    let target = target.filter(|t| *t > Decimal::ZERO)?;
    total
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(round2)
}

/// Same ratio as [`performance_percentage`] but reporting zero instead of unknown,
/// used by site summaries where an unset target reads as 0%.
pub fn percentage_or_zero(total: Decimal, target: Decimal) -> Decimal {
    performance_percentage(total, Some(target)).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fuel_example() {
        assert_eq!(
            performance_percentage(dec("1000.00"), Some(dec("1250.00"))),
            Some(dec("80.00"))
        );
    }

    #[test]
    fn test_unknown_when_target_missing_or_zero() {
        assert_eq!(performance_percentage(dec("1000.00"), None), None);
        assert_eq!(performance_percentage(dec("1000.00"), Some(Decimal::ZERO)), None);
        assert_eq!(performance_percentage(dec("1000.00"), Some(dec("-5"))), None);
    }

    #[test]
    fn test_rounds_half_up() {
        // 1/8 * 100 = 12.5 exactly, no rounding
        assert_eq!(performance_percentage(dec("1"), Some(dec("8"))), Some(dec("12.5")));
        // 0.00125 * 100 = 0.125 -> 0.13
        assert_eq!(round2(dec("0.125")), dec("0.13"));
        assert_eq!(round2(dec("0.135")), dec("0.14"));
        assert_eq!(round2(dec("2.675")), dec("2.68"));
        // 2 / 3 * 100 = 66.666... -> 66.67
        assert_eq!(performance_percentage(dec("2"), Some(dec("3"))), Some(dec("66.67")));
    }

    #[test]
    fn test_over_target() {
        assert_eq!(
            performance_percentage(dec("15000"), Some(dec("10000"))),
            Some(dec("150.00"))
        );
    }

    #[test]
    fn test_property_matches_manual_formula() {
        let targets = ["1", "7.5", "1250", "9999.99"];
        let totals = ["0", "0.01", "333.33", "1000", "123456.78"];
        for t in targets {
            for total in totals {
                let expected = ((dec(total) / dec(t)) * HUNDRED)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                assert_eq!(performance_percentage(dec(total), Some(dec(t))), Some(expected));
            }
        }
    }

    #[test]
    fn test_percentage_or_zero() {
        assert_eq!(percentage_or_zero(dec("500"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage_or_zero(dec("500"), dec("1000")), dec("50"));
    }
}
