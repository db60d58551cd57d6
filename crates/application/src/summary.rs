//! Read-side aggregation over stored sales, evaluations and attendance.
//!
//! Every entry point takes `today` so the current quarter/month is decided by
//! the caller, not the wall clock.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use domain::evaluation::{AttendanceRepository, DatedScore, EvaluationRepository};
use domain::period::{Quarter, year_bounds};
use domain::sales::{
    FuelSalesRepository, ShopSalesRepository, TargetRepository, site_daily_fuel_target,
};
use domain::staff::{CaptainProfile, CaptainRepository, EmployeeRepository};
use domain::summary::{
    HISTORY_LEN, PerformanceBreakdown, PerformancePoint, SalesChannel, SalesPoint,
    ScoreSummary, SiteSalesSummary, performance_breakdown, rounded_mean, score_summary,
    site_sales_summary,
};
use domain::{Actor, DomainError, Result, Site};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::staff;

/// Period selection shared by the performance summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    pub year: i32,
    pub last_n_days: u32,
    pub today: NaiveDate,
}

impl SummaryWindow {
    /// Start of the trailing window; clamps to the earliest date when the
    /// window reaches past it
    fn since(&self) -> NaiveDate {
        self.today
            .checked_sub_days(Days::new(u64::from(self.last_n_days)))
            .unwrap_or(NaiveDate::MIN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMeta {
    pub year: i32,
    pub last_n_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelPerformanceSummary {
    #[serde(flatten)]
    pub breakdown: PerformanceBreakdown,
    pub meta: SummaryMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    #[serde(serialize_with = "iso_date")]
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub performance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedMeta {
    pub year: i32,
    pub last_n_days: u32,
    pub current_quarter: Quarter,
    pub generated_at: DateTime<Utc>,
}

/// Fuel performance plus the latest weekly evaluations of one user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedPerformance {
    #[serde(flatten)]
    pub breakdown: PerformanceBreakdown,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_score: Decimal,
    pub performance_history: Vec<HistoryPoint>,
    pub meta: CombinedMeta,
}

pub struct SummaryService {
    fuel: Arc<dyn FuelSalesRepository>,
    shop: Arc<dyn ShopSalesRepository>,
    targets: Arc<dyn TargetRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    employees: Arc<dyn EmployeeRepository>,
    captains: Arc<dyn CaptainRepository>,
}

impl SummaryService {
    pub fn new(
        fuel: Arc<dyn FuelSalesRepository>,
        shop: Arc<dyn ShopSalesRepository>,
        targets: Arc<dyn TargetRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        employees: Arc<dyn EmployeeRepository>,
        captains: Arc<dyn CaptainRepository>,
    ) -> Self {
        Self {
            fuel,
            shop,
            targets,
            evaluations,
            attendance,
            employees,
            captains,
        }
    }

    async fn fuel_breakdown(&self, user: i32, window: SummaryWindow) -> Result<PerformanceBreakdown> {
        let points: Vec<PerformancePoint> = self
            .fuel
            .find_by_user(user)
            .await?
            .into_iter()
            .map(|s| PerformancePoint {
                date: s.date(),
                performance: s.performance,
            })
            .collect();
        debug!(user, records = points.len(), "Building fuel performance breakdown");
        Ok(performance_breakdown(&points, window.year, window.since()))
    }

    /// Quarterly, monthly and daily averages of a user's stored fuel performance
    pub async fn fuel_summary(&self, user: i32, window: SummaryWindow) -> Result<FuelPerformanceSummary> {
        Ok(FuelPerformanceSummary {
            breakdown: self.fuel_breakdown(user, window).await?,
            meta: SummaryMeta {
                year: window.year,
                last_n_days: window.last_n_days,
            },
        })
    }

    /// Weekly evaluation percentages of an employee in the quarter of `today`
    pub async fn evaluation_summary(&self, employee: i32, today: NaiveDate) -> Result<ScoreSummary> {
        let range = current_quarter(today)?;
        let history = self.evaluations.history(employee, Some(range)).await?;
        Ok(score_summary(&history))
    }

    /// Attendance percentages of an employee in the quarter of `today`
    pub async fn attendance_summary(&self, employee: i32, today: NaiveDate) -> Result<ScoreSummary> {
        let range = current_quarter(today)?;
        let history = self.attendance.history(employee, Some(range)).await?;
        Ok(score_summary(&history))
    }

    pub async fn combined(
        &self,
        user: i32,
        window: SummaryWindow,
        generated_at: DateTime<Utc>,
    ) -> Result<CombinedPerformance> {
        let breakdown = self.fuel_breakdown(user, window).await?;

        let latest: Vec<DatedScore> = match self.employees.find_by_user(user).await? {
            Some(employee) => {
                let mut history = self.evaluations.history(employee.id, None).await?;
                history.truncate(HISTORY_LEN);
                history
            }
            None => Vec::new(),
        };

        Ok(CombinedPerformance {
            breakdown,
            average_score: rounded_mean(latest.iter().map(|s| s.score)),
            performance_history: latest
                .iter()
                .map(|s| HistoryPoint {
                    date: s.date,
                    performance: s.score,
                })
                .collect(),
            meta: CombinedMeta {
                year: window.year,
                last_n_days: window.last_n_days,
                current_quarter: Quarter::of(window.today),
                generated_at,
            },
        })
    }

    /// Fuel sales of the caller's site against the sum of its pump targets
    pub async fn fuel_site_summary(
        &self,
        actor: &Actor,
        year: i32,
        today: NaiveDate,
    ) -> Result<SiteSalesSummary> {
        let site = site_of(actor)?;
        let (from, to) = year_bounds(year).ok_or_else(|| invalid_year(year))?;
        let sales: Vec<SalesPoint> = self
            .fuel
            .find_by_site(site, from, to)
            .await?
            .into_iter()
            .map(|s| SalesPoint {
                date: s.date(),
                captain: s.entry.captain,
                amount: s.total_sales(),
            })
            .collect();
        let daily_target = site_daily_fuel_target(&self.targets.pump_targets().await?, site);
        let captains = self.captain_profiles(site).await?;

        Ok(site_sales_summary(
            SalesChannel::Fuel,
            year,
            today,
            &sales,
            daily_target,
            &captains,
        ))
    }

    /// Shop sales of the caller's site against its shop target
    pub async fn shop_site_summary(
        &self,
        actor: &Actor,
        year: i32,
        today: NaiveDate,
    ) -> Result<SiteSalesSummary> {
        let site = site_of(actor)?;
        let (from, to) = year_bounds(year).ok_or_else(|| invalid_year(year))?;
        let sales: Vec<SalesPoint> = self
            .shop
            .find_by_site(site, from, to)
            .await?
            .into_iter()
            .map(|s| SalesPoint {
                date: s.date(),
                captain: s.entry.captain,
                amount: s.total_sales(),
            })
            .collect();
        let daily_target = self.targets.shop_target(site).await?.unwrap_or(Decimal::ZERO);
        let captains = self.captain_profiles(site).await?;

        Ok(site_sales_summary(
            SalesChannel::Shop,
            year,
            today,
            &sales,
            daily_target,
            &captains,
        ))
    }

    /// Captains at the site; those without a profile carry no role and so
    /// count for neither channel
    async fn captain_profiles(&self, site: Site) -> Result<Vec<CaptainProfile>> {
        let captains = self.captains.find_by_site(site).await?;
        staff::captain_profiles(self.employees.as_ref(), captains).await
    }
}

fn site_of(actor: &Actor) -> Result<Site> {
    actor
        .site()
        .ok_or_else(|| DomainError::validation("User site not found."))
}

fn current_quarter(today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    Quarter::of(today)
        .bounds(today.year())
        .ok_or_else(|| invalid_year(today.year()))
}

fn invalid_year(year: i32) -> DomainError {
    DomainError::validation(format!("Year {} is out of range.", year))
}

fn iso_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y-%m-%d"))
}
