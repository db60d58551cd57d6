//! Time-bucketed aggregation of stored percentages and raw sales.
//!
//! Averages are taken over the stored, already-rounded performance values and
//! rounded again per bucket, so rounding error compounds across buckets. This
//! is the reported behaviour and is kept as-is.

use crate::performance::{percentage_or_zero, round2};
use crate::period::{Quarter, days_in_month, month_abbrev};
use crate::evaluation::DatedScore;
use crate::staff::{CaptainProfile, JobRole};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of score records shown in a history
pub const HISTORY_LEN: usize = 10;

/// Captains are assumed to split a site's monthly target two ways, regardless
/// of how many captains the site actually has.
pub const CAPTAIN_SHARE_DIVISOR: Decimal = Decimal::TWO;

/// Stored performance of one sales record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub performance: Option<Decimal>,
}

/// Raw amount of one sales record at a site
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub captain: i32,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterAverage {
    pub quarter: Quarter,
    #[serde(with = "rust_decimal::serde::float")]
    pub average: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthAverage {
    pub month: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAverage {
    #[serde(serialize_with = "iso_date")]
    pub date: NaiveDate,
    pub day: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance: Decimal,
}

/// Per-user breakdown of stored fuel performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub average_performance: Decimal,
    pub quarterly_performance: Vec<QuarterAverage>,
    pub monthly_performance: Vec<MonthAverage>,
    pub daily_performance: Vec<DayAverage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub score: Decimal,
}

/// Quarter-to-date evaluation or attendance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub qtr_score: Decimal,
    pub score_history: Vec<ScorePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPerformance {
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_score: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptainPerformance {
    pub captain: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub raw_score: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    pub month: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub growth: Decimal,
}

/// Site-wide sales against target for the current month and each month of a year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSalesSummary {
    pub current_performance: CurrentPerformance,
    pub captain_performance: Vec<CaptainPerformance>,
    pub monthly_summary: Vec<MonthlySales>,
}

/// Which site summary variant is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesChannel {
    Fuel,
    Shop,
}

impl SalesChannel {
    /// Captains listed in the summary are those whose employee has this role
    pub fn captain_role(self) -> JobRole {
        match self {
            Self::Fuel => JobRole::CustomerChampion,
            Self::Shop => JobRole::ServiceChampion,
        }
    }

    /// Target reported next to each captain. Both variants measure the captain
    /// against half the monthly target, but the fuel summary reports the full
    /// target while the shop summary reports the halved one.
    // TODO: settle on one captain-target convention once the split between captains is defined
    fn reported_captain_target(self, monthly_target: Decimal) -> Decimal {
        match self {
            Self::Fuel => monthly_target,
            Self::Shop => monthly_target / CAPTAIN_SHARE_DIVISOR,
        }
    }
}

/// Arithmetic mean, `None` for no values
pub fn mean(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / Decimal::from(count))
}

/// Mean rounded to 2 dp, zero for no values
pub fn rounded_mean(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    mean(values).map(round2).unwrap_or(Decimal::ZERO)
}

/// Month-over-month growth ratio; zero when the previous month had no sales
pub fn growth(previous: Decimal, current: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        round2((current - previous) / previous)
    } else {
        Decimal::ZERO
    }
}

/// A captain's sales as a percentage of their assumed share of the monthly target
pub fn captain_share(raw: Decimal, monthly_target: Decimal) -> Decimal {
    percentage_or_zero(raw, monthly_target / CAPTAIN_SHARE_DIVISOR)
}

/// Overall, quarterly (of `year`), monthly (of `year`, months with records only)
/// and daily (of `year`, on or after `since`) averages of stored performance.
/// Records without a performance are counted as present but contribute no value.
pub fn performance_breakdown(
    points: &[PerformancePoint],
    year: i32,
    since: NaiveDate,
) -> PerformanceBreakdown {
    let in_year: Vec<&PerformancePoint> = points.iter().filter(|p| p.date.year() == year).collect();

    let quarterly_performance = Quarter::ALL
        .iter()
        .map(|&quarter| QuarterAverage {
            quarter,
            average: rounded_mean(
                in_year
                    .iter()
                    .filter(|p| quarter.contains(p.date))
                    .filter_map(|p| p.performance),
            ),
        })
        .collect();

    let mut by_month: BTreeMap<u32, Vec<Decimal>> = BTreeMap::new();
    let mut by_day: BTreeMap<NaiveDate, Vec<Decimal>> = BTreeMap::new();
    for point in &in_year {
        let month = by_month.entry(point.date.month()).or_default();
        month.extend(point.performance);
        if point.date >= since {
            let day = by_day.entry(point.date).or_default();
            day.extend(point.performance);
        }
    }

    PerformanceBreakdown {
        average_performance: rounded_mean(points.iter().filter_map(|p| p.performance)),
        quarterly_performance,
        monthly_performance: by_month
            .into_iter()
            .map(|(month, values)| MonthAverage {
                month: month_abbrev(month),
                performance: rounded_mean(values),
            })
            .collect(),
        daily_performance: by_day
            .into_iter()
            .map(|(date, values)| DayAverage {
                date,
                day: date.format("%a").to_string(),
                performance: rounded_mean(values),
            })
            .collect(),
    }
}

/// Average of every score given (newest first) plus the latest few
pub fn score_summary(history: &[DatedScore]) -> ScoreSummary {
    ScoreSummary {
        qtr_score: rounded_mean(history.iter().map(|s| s.score)),
        score_history: history
            .iter()
            .take(HISTORY_LEN)
            .map(|s| ScorePoint {
                date: s.date,
                score: s.score,
            })
            .collect(),
    }
}

/// Build a site summary from every sales record of the site in `year`.
///
/// The current month is the month of `today`, taken within `year`. Monthly
/// targets are the daily target times the calendar days of each month.
pub fn site_sales_summary(
    channel: SalesChannel,
    year: i32,
    today: NaiveDate,
    sales: &[SalesPoint],
    daily_target: Decimal,
    captains: &[CaptainProfile],
) -> SiteSalesSummary {
    let mut monthly_totals = [Decimal::ZERO; 12];
    for sale in sales.iter().filter(|s| s.date.year() == year) {
        monthly_totals[sale.date.month0() as usize] += sale.amount;
    }

    let current_month = today.month();
    let monthly_target = daily_target * Decimal::from(days_in_month(year, current_month));
    let raw_score = monthly_totals[today.month0() as usize];

    let captain_performance = captains
        .iter()
        .filter(|c| c.job == Some(channel.captain_role()))
        .map(|captain| {
            let raw = sales
                .iter()
                .filter(|s| {
                    s.captain == captain.id && s.date.year() == year && s.date.month() == current_month
                })
                .map(|s| s.amount)
                .sum();
            CaptainPerformance {
                captain: captain.name.clone(),
                raw_score: raw,
                target: channel.reported_captain_target(monthly_target),
                performance: captain_share(raw, monthly_target),
            }
        })
        .collect();

    let mut monthly_summary: Vec<MonthlySales> = (1..=12u32)
        .map(|month| {
            let sales = monthly_totals[(month - 1) as usize];
            let target = daily_target * Decimal::from(days_in_month(year, month));
            MonthlySales {
                month: month_abbrev(month),
                sales,
                target,
                percentage: percentage_or_zero(sales, target),
                growth: Decimal::ZERO,
            }
        })
        .collect();
    for i in 1..monthly_summary.len() {
        monthly_summary[i].growth = growth(monthly_summary[i - 1].sales, monthly_summary[i].sales);
    }

    SiteSalesSummary {
        current_performance: CurrentPerformance {
            raw_score,
            target: monthly_target,
            performance: percentage_or_zero(raw_score, monthly_target),
        },
        captain_performance,
        monthly_summary,
    }
}

fn iso_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staff::Site;
    use rust_decimal::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(y: i32, m: u32, d: u32, perf: Option<&str>) -> PerformancePoint {
        PerformancePoint {
            date: date(y, m, d),
            performance: perf.map(dec),
        }
    }

    #[test]
    fn test_growth_is_zero_when_previous_month_empty() {
        assert_eq!(growth(Decimal::ZERO, dec("5000")), Decimal::ZERO);
        assert_eq!(growth(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_growth_ratio() {
        assert_eq!(growth(dec("1000"), dec("1500")), dec("0.5"));
        assert_eq!(growth(dec("1000"), dec("500")), dec("-0.5"));
        assert_eq!(growth(dec("3"), dec("4")), dec("0.33"));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::<Decimal>::new()), None);
        assert_eq!(rounded_mean(Vec::<Decimal>::new()), Decimal::ZERO);
        assert_eq!(rounded_mean([dec("80"), dec("90"), dec("95")]), dec("88.33"));
    }

    #[test]
    fn test_performance_breakdown_buckets() {
        let points = vec![
            point(2024, 12, 30, Some("50")),
            point(2025, 1, 10, Some("80")),
            point(2025, 2, 11, Some("90")),
            point(2025, 2, 12, None),
            point(2025, 5, 1, Some("70.50")),
            point(2025, 5, 1, Some("71.50")),
        ];
        let breakdown = performance_breakdown(&points, 2025, date(2025, 2, 1));

        // all years, nulls ignored
        assert_eq!(breakdown.average_performance, dec("72.4"));

        let quarters: Vec<Decimal> = breakdown
            .quarterly_performance
            .iter()
            .map(|q| q.average)
            .collect();
        assert_eq!(quarters, vec![dec("85"), dec("71"), Decimal::ZERO, Decimal::ZERO]);

        let months: Vec<(&str, Decimal)> = breakdown
            .monthly_performance
            .iter()
            .map(|m| (m.month, m.performance))
            .collect();
        assert_eq!(
            months,
            vec![("Jan", dec("80")), ("Feb", dec("90")), ("May", dec("71"))]
        );

        let days: Vec<(NaiveDate, Decimal)> = breakdown
            .daily_performance
            .iter()
            .map(|d| (d.date, d.performance))
            .collect();
        assert_eq!(
            days,
            vec![
                (date(2025, 2, 11), dec("90")),
                (date(2025, 2, 12), Decimal::ZERO),
                (date(2025, 5, 1), dec("71")),
            ]
        );
        assert_eq!(breakdown.daily_performance[0].day, "Tue");
    }

    #[test]
    fn test_breakdown_serializes_numbers() {
        let breakdown = performance_breakdown(&[point(2025, 3, 3, Some("80.25"))], 2025, date(2025, 1, 1));
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["average_performance"], 80.25);
        assert_eq!(json["quarterly_performance"][0]["quarter"], "Q1");
        assert_eq!(json["daily_performance"][0]["date"], "2025-03-03");
        assert_eq!(json["daily_performance"][0]["day"], "Mon");
    }

    #[test]
    fn test_score_summary_keeps_latest_ten() {
        let history: Vec<DatedScore> = (1..=12)
            .rev()
            .map(|d| DatedScore {
                date: date(2025, 4, d),
                score: Decimal::from(d * 5),
            })
            .collect();
        let summary = score_summary(&history);
        assert_eq!(summary.score_history.len(), HISTORY_LEN);
        assert_eq!(summary.score_history[0].date, date(2025, 4, 12));
        // mean of 5..=60 step 5 = 32.5
        assert_eq!(summary.qtr_score, dec("32.5"));
    }

    #[test]
    fn test_site_summary_fuel() {
        let captains = vec![
            CaptainProfile { id: 1, name: "Ama".into(), site: Site::Airport, job: Some(JobRole::CustomerChampion) },
            CaptainProfile { id: 2, name: "Yaw".into(), site: Site::Airport, job: Some(JobRole::ServiceChampion) },
        ];
        let sales = vec![
            SalesPoint { date: date(2025, 5, 2), captain: 1, amount: dec("15500") },
            SalesPoint { date: date(2025, 6, 3), captain: 1, amount: dec("31000") },
            SalesPoint { date: date(2025, 6, 4), captain: 2, amount: dec("15500") },
        ];
        // June has 30 days; daily target 1000 -> monthly 30000
        let summary = site_sales_summary(
            SalesChannel::Fuel,
            2025,
            date(2025, 6, 20),
            &sales,
            dec("1000"),
            &captains,
        );

        assert_eq!(summary.current_performance.raw_score, dec("46500"));
        assert_eq!(summary.current_performance.target, dec("30000"));
        assert_eq!(summary.current_performance.performance, dec("155"));

        assert_eq!(summary.captain_performance.len(), 1);
        let ama = &summary.captain_performance[0];
        assert_eq!(ama.captain, "Ama");
        assert_eq!(ama.raw_score, dec("31000"));
        assert_eq!(ama.target, dec("30000"));
        // measured against half the target
        assert_eq!(ama.performance, dec("206.67"));

        let may = &summary.monthly_summary[4];
        assert_eq!(may.target, dec("31000"));
        assert_eq!(may.percentage, dec("50"));
        assert_eq!(may.growth, Decimal::ZERO);
        let june = &summary.monthly_summary[5];
        assert_eq!(june.growth, dec("2"));
        let july = &summary.monthly_summary[6];
        assert_eq!(july.growth, dec("-1"));
        assert_eq!(summary.monthly_summary[0].growth, Decimal::ZERO);
    }

    #[test]
    fn test_site_summary_shop_reports_half_target_and_handles_no_target() {
        let captains = vec![CaptainProfile {
            id: 5,
            name: "Esi".into(),
            site: Site::Bohye,
            job: Some(JobRole::ServiceChampion),
        }];
        let sales = vec![SalesPoint { date: date(2025, 2, 1), captain: 5, amount: dec("1400") }];

        let summary = site_sales_summary(
            SalesChannel::Shop,
            2025,
            date(2025, 2, 10),
            &sales,
            dec("100"),
            &captains,
        );
        assert_eq!(summary.current_performance.target, dec("2800"));
        assert_eq!(summary.captain_performance[0].target, dec("1400"));
        assert_eq!(summary.captain_performance[0].performance, dec("100"));

        let without_target = site_sales_summary(
            SalesChannel::Shop,
            2025,
            date(2025, 2, 10),
            &sales,
            Decimal::ZERO,
            &captains,
        );
        assert_eq!(without_target.current_performance.performance, Decimal::ZERO);
        assert_eq!(without_target.captain_performance[0].performance, Decimal::ZERO);
        assert!(without_target.monthly_summary.iter().all(|m| m.percentage.is_zero()));
    }
}
