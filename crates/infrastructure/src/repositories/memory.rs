//! In-memory repositories with the same uniqueness, reference and cascade
//! rules as the PostgreSQL schema. Used by tests and local experiments.

use crate::auth::generate_token;
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::DomainError;
use domain::credit::{
    CreditCollection, CreditCollectionEntry, CreditRepository, CreditSale, CreditSaleEntry,
    Customer, CustomerEntry,
};
use domain::evaluation::{
    AttendanceDate, AttendanceMark, AttendanceRepository, AttendantEvaluation, DatedScore,
    EvaluationRepository, ScoredEntry, WeeklyEvaluation,
};
use domain::sales::{
    FuelSales, FuelSalesEntry, FuelSalesRepository, PumpTarget, ShopSales, ShopSalesEntry,
    ShopSalesRepository, ShopTarget, TargetRepository,
};
use domain::staff::{
    Captain, CaptainRepository, Employee, EmployeeProfile, EmployeeRepository, Pump, Site, User,
    UserRepository,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    last_id: i32,
    users: BTreeMap<i32, User>,
    tokens: HashMap<i32, String>,
    employees: BTreeMap<i32, Employee>,
    captains: BTreeMap<i32, Captain>,
    pump_targets: BTreeMap<(Site, Pump), Decimal>,
    shop_targets: BTreeMap<Site, Decimal>,
    fuel_sales: BTreeMap<i32, FuelSales>,
    shop_sales: BTreeMap<i32, ShopSales>,
    weeks: BTreeMap<i32, WeeklyEvaluation>,
    evaluations: BTreeMap<i32, AttendantEvaluation>,
    attendance_dates: BTreeMap<i32, AttendanceDate>,
    marks: BTreeMap<i32, AttendanceMark>,
    customers: BTreeMap<i32, Customer>,
    credit_sales: BTreeMap<i32, CreditSale>,
    collections: BTreeMap<i32, CreditCollection>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn site_users(&self, site: Site) -> HashSet<i32> {
        self.employees
            .values()
            .filter(|e| e.site() == site)
            .filter_map(|e| e.user)
            .collect()
    }

    fn require_captain(&self, id: i32) -> Result<(), DomainError> {
        self.require(self.captains.contains_key(&id))
    }

    fn require_employee(&self, id: i32) -> Result<(), DomainError> {
        self.require(self.employees.contains_key(&id))
    }

    fn require_customer(&self, id: i32) -> Result<(), DomainError> {
        self.require(self.customers.contains_key(&id))
    }

    fn require(&self, exists: bool) -> Result<(), DomainError> {
        if exists {
            Ok(())
        } else {
            Err(DomainError::validation("Referenced object does not exist."))
        }
    }
}

fn duplicate_day(user: i32, date: NaiveDate) -> DomainError {
    DomainError::Duplicate(format!(
        "Sales for user {} on {} have already been recorded.",
        user, date
    ))
}

/// Shared in-memory store; every repository handed out reads and writes the same tables.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a login identity, assigning its id
    pub async fn insert_user(&self, mut user: User) -> User {
        let mut tables = self.tables.write().await;
        user.id = tables.next_id();
        tables.users.insert(user.id, user.clone());
        user
    }

    pub async fn insert_captain(&self, user: i32, site: Site) -> Captain {
        let mut tables = self.tables.write().await;
        let captain = Captain {
            id: tables.next_id(),
            user,
            site,
        };
        tables.captains.insert(captain.id, captain.clone());
        captain
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository(self.tables.clone())
    }

    pub fn employees(&self) -> InMemoryEmployeeRepository {
        InMemoryEmployeeRepository(self.tables.clone())
    }

    pub fn captains(&self) -> InMemoryCaptainRepository {
        InMemoryCaptainRepository(self.tables.clone())
    }

    pub fn targets(&self) -> InMemoryTargetRepository {
        InMemoryTargetRepository(self.tables.clone())
    }

    pub fn fuel_sales(&self) -> InMemoryFuelSalesRepository {
        InMemoryFuelSalesRepository(self.tables.clone())
    }

    pub fn shop_sales(&self) -> InMemoryShopSalesRepository {
        InMemoryShopSalesRepository(self.tables.clone())
    }

    pub fn evaluations(&self) -> InMemoryEvaluationRepository {
        InMemoryEvaluationRepository(self.tables.clone())
    }

    pub fn attendance(&self) -> InMemoryAttendanceRepository {
        InMemoryAttendanceRepository(self.tables.clone())
    }

    pub fn credit(&self) -> InMemoryCreditRepository {
        InMemoryCreditRepository(self.tables.clone())
    }
}

pub struct InMemoryUserRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.0.read().await.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .tokens
            .iter()
            .find(|(_, key)| key.as_str() == token)
            .and_then(|(user, _)| tables.users.get(user))
            .cloned())
    }

    async fn get_or_create_token(&self, user_id: i32) -> Result<String, DomainError> {
        let mut tables = self.0.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(DomainError::not_found("User", user_id));
        }
        Ok(tables
            .tokens
            .entry(user_id)
            .or_insert_with(generate_token)
            .clone())
    }
}

pub struct InMemoryEmployeeRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn create(
        &self,
        profile: &EmployeeProfile,
        user: Option<i32>,
    ) -> Result<Employee, DomainError> {
        let mut tables = self.0.write().await;
        if let Some(user_id) = user {
            tables.require(tables.users.contains_key(&user_id))?;
            if tables.employees.values().any(|e| e.user == Some(user_id)) {
                return Err(DomainError::Duplicate(format!(
                    "User with ID {} already has an employee profile.",
                    user_id
                )));
            }
        }
        let employee = Employee {
            id: tables.next_id(),
            user,
            profile: profile.clone(),
        };
        tables.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        if !tables.employees.contains_key(&employee.id) {
            return Err(DomainError::not_found("Employee", employee.id));
        }
        if let Some(user_id) = employee.user {
            let taken = tables
                .employees
                .values()
                .any(|e| e.user == Some(user_id) && e.id != employee.id);
            if taken {
                return Err(DomainError::Duplicate(format!(
                    "User with ID {} already has an employee profile.",
                    user_id
                )));
            }
        }
        tables.employees.insert(employee.id, employee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, DomainError> {
        Ok(self.0.read().await.employees.get(&id).cloned())
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Option<Employee>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .employees
            .values()
            .find(|e| e.user == Some(user_id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.0.read().await.employees.values().cloned().collect())
    }

    async fn find_active_attendants(&self) -> Result<Vec<Employee>, DomainError> {
        let tables = self.0.read().await;
        let mut attendants: Vec<Employee> = tables
            .employees
            .values()
            .filter(|e| e.is_active() && e.role().is_attendant())
            .cloned()
            .collect();
        attendants.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(attendants)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        if tables.employees.remove(&id).is_none() {
            return Err(DomainError::not_found("Employee", id));
        }
        tables.evaluations.retain(|_, e| e.attendant != id);
        tables.marks.retain(|_, m| m.attendant != id);
        Ok(())
    }
}

pub struct InMemoryCaptainRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl CaptainRepository for InMemoryCaptainRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Captain>, DomainError> {
        Ok(self.0.read().await.captains.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Captain>, DomainError> {
        Ok(self.0.read().await.captains.values().cloned().collect())
    }

    async fn find_by_site(&self, site: Site) -> Result<Vec<Captain>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .captains
            .values()
            .filter(|c| c.site == site)
            .cloned()
            .collect())
    }
}

pub struct InMemoryTargetRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl TargetRepository for InMemoryTargetRepository {
    async fn pump_target(&self, site: Site, pump: Pump) -> Result<Option<Decimal>, DomainError> {
        Ok(self.0.read().await.pump_targets.get(&(site, pump)).copied())
    }

    async fn shop_target(&self, site: Site) -> Result<Option<Decimal>, DomainError> {
        Ok(self.0.read().await.shop_targets.get(&site).copied())
    }

    async fn pump_targets(&self) -> Result<Vec<PumpTarget>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .pump_targets
            .iter()
            .map(|(&(site, pump), &target)| PumpTarget { site, pump, target })
            .collect())
    }

    async fn shop_targets(&self) -> Result<Vec<ShopTarget>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .shop_targets
            .iter()
            .map(|(&site, &target)| ShopTarget { site, target })
            .collect())
    }

    async fn set_pump_target(&self, target: &PumpTarget) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables
            .pump_targets
            .insert((target.site, target.pump), target.target);
        Ok(())
    }

    async fn set_shop_target(&self, target: &ShopTarget) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables.shop_targets.insert(target.site, target.target);
        Ok(())
    }
}

pub struct InMemoryFuelSalesRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl FuelSalesRepository for InMemoryFuelSalesRepository {
    async fn create(
        &self,
        user: i32,
        entry: &FuelSalesEntry,
        performance: Option<Decimal>,
    ) -> Result<FuelSales, DomainError> {
        let mut tables = self.0.write().await;
        tables.require(tables.users.contains_key(&user))?;
        tables.require_captain(entry.captain)?;
        if tables
            .fuel_sales
            .values()
            .any(|s| s.user == user && s.date() == entry.date)
        {
            return Err(duplicate_day(user, entry.date));
        }
        let sale = FuelSales {
            id: tables.next_id(),
            user,
            entry: entry.clone(),
            performance,
        };
        tables.fuel_sales.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn update(&self, sale: &FuelSales) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        if !tables.fuel_sales.contains_key(&sale.id) {
            return Err(DomainError::not_found("FuelSales", sale.id));
        }
        tables.require_captain(sale.entry.captain)?;
        if tables
            .fuel_sales
            .values()
            .any(|s| s.id != sale.id && s.user == sale.user && s.date() == sale.date())
        {
            return Err(duplicate_day(sale.user, sale.date()));
        }
        tables.fuel_sales.insert(sale.id, sale.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FuelSales>, DomainError> {
        Ok(self.0.read().await.fuel_sales.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<FuelSales>, DomainError> {
        let tables = self.0.read().await;
        let mut sales: Vec<FuelSales> = tables.fuel_sales.values().cloned().collect();
        sales.sort_by(|a, b| b.date().cmp(&a.date()).then(b.id.cmp(&a.id)));
        Ok(sales)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<FuelSales>, DomainError> {
        let tables = self.0.read().await;
        let mut sales: Vec<FuelSales> = tables
            .fuel_sales
            .values()
            .filter(|s| s.user == user_id)
            .cloned()
            .collect();
        sales.sort_by_key(|s| s.date());
        Ok(sales)
    }

    async fn find_by_site(
        &self,
        site: Site,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FuelSales>, DomainError> {
        let tables = self.0.read().await;
        let users = tables.site_users(site);
        let mut sales: Vec<FuelSales> = tables
            .fuel_sales
            .values()
            .filter(|s| users.contains(&s.user) && (from..=to).contains(&s.date()))
            .cloned()
            .collect();
        sales.sort_by_key(|s| s.date());
        Ok(sales)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables
            .fuel_sales
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("FuelSales", id))
    }
}

pub struct InMemoryShopSalesRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl ShopSalesRepository for InMemoryShopSalesRepository {
    async fn create(
        &self,
        user: i32,
        entry: &ShopSalesEntry,
        performance: Option<Decimal>,
    ) -> Result<ShopSales, DomainError> {
        let mut tables = self.0.write().await;
        tables.require(tables.users.contains_key(&user))?;
        tables.require_captain(entry.captain)?;
        if tables
            .shop_sales
            .values()
            .any(|s| s.user == user && s.date() == entry.date)
        {
            return Err(duplicate_day(user, entry.date));
        }
        let sale = ShopSales {
            id: tables.next_id(),
            user,
            entry: entry.clone(),
            performance,
        };
        tables.shop_sales.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn update(&self, sale: &ShopSales) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        if !tables.shop_sales.contains_key(&sale.id) {
            return Err(DomainError::not_found("ShopSales", sale.id));
        }
        tables.require_captain(sale.entry.captain)?;
        if tables
            .shop_sales
            .values()
            .any(|s| s.id != sale.id && s.user == sale.user && s.date() == sale.date())
        {
            return Err(duplicate_day(sale.user, sale.date()));
        }
        tables.shop_sales.insert(sale.id, sale.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ShopSales>, DomainError> {
        Ok(self.0.read().await.shop_sales.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<ShopSales>, DomainError> {
        let tables = self.0.read().await;
        let mut sales: Vec<ShopSales> = tables.shop_sales.values().cloned().collect();
        sales.sort_by(|a, b| b.date().cmp(&a.date()).then(b.id.cmp(&a.id)));
        Ok(sales)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<ShopSales>, DomainError> {
        let tables = self.0.read().await;
        let mut sales: Vec<ShopSales> = tables
            .shop_sales
            .values()
            .filter(|s| s.user == user_id)
            .cloned()
            .collect();
        sales.sort_by_key(|s| s.date());
        Ok(sales)
    }

    async fn find_by_site(
        &self,
        site: Site,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ShopSales>, DomainError> {
        let tables = self.0.read().await;
        let users = tables.site_users(site);
        let mut sales: Vec<ShopSales> = tables
            .shop_sales
            .values()
            .filter(|s| users.contains(&s.user) && (from..=to).contains(&s.date()))
            .cloned()
            .collect();
        sales.sort_by_key(|s| s.date());
        Ok(sales)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables
            .shop_sales
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("ShopSales", id))
    }
}

/// Newest first, like the ORDER BY of the database history queries
fn newest_first(mut scores: Vec<DatedScore>) -> Vec<DatedScore> {
    scores.sort_by(|a, b| b.date.cmp(&a.date));
    scores
}

fn in_range(date: NaiveDate, range: Option<(NaiveDate, NaiveDate)>) -> bool {
    range.is_none_or(|(from, to)| (from..=to).contains(&date))
}

pub struct InMemoryEvaluationRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl EvaluationRepository for InMemoryEvaluationRepository {
    async fn find_or_create_week(
        &self,
        week_start: NaiveDate,
        week_end: NaiveDate,
        date: NaiveDate,
    ) -> Result<WeeklyEvaluation, DomainError> {
        let mut tables = self.0.write().await;
        if let Some(week) = tables
            .weeks
            .values()
            .find(|w| (week_start..=week_end).contains(&w.date))
        {
            return Ok(week.clone());
        }
        let week = WeeklyEvaluation {
            id: tables.next_id(),
            date,
        };
        tables.weeks.insert(week.id, week.clone());
        Ok(week)
    }

    async fn find_week(&self, id: i32) -> Result<Option<WeeklyEvaluation>, DomainError> {
        Ok(self.0.read().await.weeks.get(&id).cloned())
    }

    async fn find_weeks(&self) -> Result<Vec<WeeklyEvaluation>, DomainError> {
        let tables = self.0.read().await;
        let mut weeks: Vec<WeeklyEvaluation> = tables.weeks.values().cloned().collect();
        weeks.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(weeks)
    }

    async fn evaluated_attendants(&self, week_id: i32) -> Result<Vec<i32>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .evaluations
            .values()
            .filter(|e| e.weekly_evaluation == week_id)
            .map(|e| e.attendant)
            .collect())
    }

    async fn insert_scores(
        &self,
        week_id: i32,
        entries: &[ScoredEntry],
    ) -> Result<Vec<AttendantEvaluation>, DomainError> {
        let mut tables = self.0.write().await;
        tables.require(tables.weeks.contains_key(&week_id))?;

        // Check everything first so a failure leaves nothing behind
        let mut taken: HashSet<i32> = tables
            .evaluations
            .values()
            .filter(|e| e.weekly_evaluation == week_id)
            .map(|e| e.attendant)
            .collect();
        for entry in entries {
            tables.require_employee(entry.attendant)?;
            if !taken.insert(entry.attendant) {
                return Err(DomainError::Duplicate(format!(
                    "Attendant with ID {} has already been evaluated this week.",
                    entry.attendant
                )));
            }
        }

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let evaluation = AttendantEvaluation {
                id: tables.next_id(),
                weekly_evaluation: week_id,
                attendant: entry.attendant,
                raw_score: entry.raw_score,
                percentage_score: entry.percentage,
            };
            tables.evaluations.insert(evaluation.id, evaluation.clone());
            created.push(evaluation);
        }
        Ok(created)
    }

    async fn find_scores(&self, week_id: i32) -> Result<Vec<AttendantEvaluation>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .evaluations
            .values()
            .filter(|e| e.weekly_evaluation == week_id)
            .cloned()
            .collect())
    }

    async fn history(
        &self,
        attendant: i32,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<DatedScore>, DomainError> {
        let tables = self.0.read().await;
        let scores = tables
            .evaluations
            .values()
            .rev()
            .filter(|e| e.attendant == attendant)
            .filter_map(|e| {
                tables.weeks.get(&e.weekly_evaluation).map(|w| DatedScore {
                    date: w.date,
                    score: e.percentage_score,
                })
            })
            .filter(|s| in_range(s.date, range))
            .collect();
        Ok(newest_first(scores))
    }

    async fn delete_week(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        if tables.weeks.remove(&id).is_none() {
            return Err(DomainError::not_found("WeeklyEvaluation", id));
        }
        tables.evaluations.retain(|_, e| e.weekly_evaluation != id);
        Ok(())
    }
}

pub struct InMemoryAttendanceRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find_or_create_date(&self, date: NaiveDate) -> Result<AttendanceDate, DomainError> {
        let mut tables = self.0.write().await;
        if let Some(day) = tables.attendance_dates.values().find(|d| d.date == date) {
            return Ok(day.clone());
        }
        let day = AttendanceDate {
            id: tables.next_id(),
            date,
        };
        tables.attendance_dates.insert(day.id, day.clone());
        Ok(day)
    }

    async fn find_date(&self, id: i32) -> Result<Option<AttendanceDate>, DomainError> {
        Ok(self.0.read().await.attendance_dates.get(&id).cloned())
    }

    async fn find_dates(&self) -> Result<Vec<AttendanceDate>, DomainError> {
        let tables = self.0.read().await;
        let mut days: Vec<AttendanceDate> = tables.attendance_dates.values().cloned().collect();
        days.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(days)
    }

    async fn marked_attendants(&self, date_id: i32) -> Result<Vec<i32>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .marks
            .values()
            .filter(|m| m.attendance_date == date_id)
            .map(|m| m.attendant)
            .collect())
    }

    async fn insert_marks(
        &self,
        date_id: i32,
        entries: &[ScoredEntry],
    ) -> Result<Vec<AttendanceMark>, DomainError> {
        let mut tables = self.0.write().await;
        tables.require(tables.attendance_dates.contains_key(&date_id))?;

        let mut taken: HashSet<i32> = tables
            .marks
            .values()
            .filter(|m| m.attendance_date == date_id)
            .map(|m| m.attendant)
            .collect();
        for entry in entries {
            tables.require_employee(entry.attendant)?;
            if !taken.insert(entry.attendant) {
                return Err(DomainError::Duplicate(format!(
                    "Attendant with ID {} has already been marked for today.",
                    entry.attendant
                )));
            }
        }

        let mut created = Vec::with_capacity(entries.len());
        for entry in entries {
            let mark = AttendanceMark {
                id: tables.next_id(),
                attendance_date: date_id,
                attendant: entry.attendant,
                raw_score: entry.raw_score,
                percentage_mark: entry.percentage,
            };
            tables.marks.insert(mark.id, mark.clone());
            created.push(mark);
        }
        Ok(created)
    }

    async fn find_marks(&self, date_id: i32) -> Result<Vec<AttendanceMark>, DomainError> {
        let tables = self.0.read().await;
        Ok(tables
            .marks
            .values()
            .filter(|m| m.attendance_date == date_id)
            .cloned()
            .collect())
    }

    async fn history(
        &self,
        attendant: i32,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<DatedScore>, DomainError> {
        let tables = self.0.read().await;
        let scores = tables
            .marks
            .values()
            .filter(|m| m.attendant == attendant)
            .filter_map(|m| {
                tables
                    .attendance_dates
                    .get(&m.attendance_date)
                    .map(|d| DatedScore {
                        date: d.date,
                        score: m.percentage_mark,
                    })
            })
            .filter(|s| in_range(s.date, range))
            .collect();
        Ok(newest_first(scores))
    }

    async fn delete_date(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        if tables.attendance_dates.remove(&id).is_none() {
            return Err(DomainError::not_found("AttendanceDate", id));
        }
        tables.marks.retain(|_, m| m.attendance_date != id);
        Ok(())
    }
}

pub struct InMemoryCreditRepository(Arc<RwLock<Tables>>);

#[async_trait]
impl CreditRepository for InMemoryCreditRepository {
    async fn create_customer(&self, entry: &CustomerEntry) -> Result<Customer, DomainError> {
        let mut tables = self.0.write().await;
        let customer = Customer {
            id: tables.next_id(),
            entry: entry.clone(),
        };
        tables.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_customer(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        Ok(self.0.read().await.customers.get(&id).cloned())
    }

    async fn find_customers(&self) -> Result<Vec<Customer>, DomainError> {
        let tables = self.0.read().await;
        let mut customers: Vec<Customer> = tables.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.entry.name.cmp(&b.entry.name));
        Ok(customers)
    }

    async fn create_sale(
        &self,
        user: i32,
        date: NaiveDate,
        entry: &CreditSaleEntry,
    ) -> Result<CreditSale, DomainError> {
        let mut tables = self.0.write().await;
        tables.require(tables.users.contains_key(&user))?;
        tables.require_customer(entry.customer)?;
        let sale = CreditSale {
            id: tables.next_id(),
            user,
            date,
            entry: entry.clone(),
        };
        tables.credit_sales.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn update_sale(&self, sale: &CreditSale) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables.require_customer(sale.entry.customer)?;
        match tables.credit_sales.get_mut(&sale.id) {
            Some(stored) => {
                stored.entry = sale.entry.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("CreditSale", sale.id)),
        }
    }

    async fn find_sale(&self, id: i32) -> Result<Option<CreditSale>, DomainError> {
        Ok(self.0.read().await.credit_sales.get(&id).cloned())
    }

    async fn find_sales(&self) -> Result<Vec<CreditSale>, DomainError> {
        let tables = self.0.read().await;
        let mut sales: Vec<CreditSale> = tables.credit_sales.values().cloned().collect();
        sales.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(sales)
    }

    async fn delete_sale(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables
            .credit_sales
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("CreditSale", id))
    }

    async fn create_collection(
        &self,
        date: NaiveDate,
        entry: &CreditCollectionEntry,
    ) -> Result<CreditCollection, DomainError> {
        let mut tables = self.0.write().await;
        tables.require_customer(entry.customer)?;
        let collection = CreditCollection {
            id: tables.next_id(),
            date,
            entry: entry.clone(),
        };
        tables.collections.insert(collection.id, collection.clone());
        Ok(collection)
    }

    async fn update_collection(&self, collection: &CreditCollection) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables.require_customer(collection.entry.customer)?;
        match tables.collections.get_mut(&collection.id) {
            Some(stored) => {
                stored.entry = collection.entry.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("CreditCollection", collection.id)),
        }
    }

    async fn find_collection(&self, id: i32) -> Result<Option<CreditCollection>, DomainError> {
        Ok(self.0.read().await.collections.get(&id).cloned())
    }

    async fn find_collections(&self) -> Result<Vec<CreditCollection>, DomainError> {
        let tables = self.0.read().await;
        let mut collections: Vec<CreditCollection> =
            tables.collections.values().cloned().collect();
        collections.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(collections)
    }

    async fn delete_collection(&self, id: i32) -> Result<(), DomainError> {
        let mut tables = self.0.write().await;
        tables
            .collections
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("CreditCollection", id))
    }
}
