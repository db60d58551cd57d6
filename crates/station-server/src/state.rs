use std::sync::Arc;

use application::{
    AuthService, CreditService, EvaluationService, SalesService, StaffService, SummaryService,
    TargetService,
};
use chrono::NaiveDate;
use domain::credit::CreditRepository;
use domain::evaluation::{AttendanceRepository, EvaluationRepository};
use domain::sales::{FuelSalesRepository, ShopSalesRepository, TargetRepository};
use domain::staff::{CaptainRepository, EmployeeRepository, UserRepository};
use infrastructure::config::SummaryConfig;
use infrastructure::{
    InMemoryDatabase, SeaOrmAttendanceRepository, SeaOrmCaptainRepository,
    SeaOrmCreditRepository, SeaOrmEmployeeRepository, SeaOrmEvaluationRepository,
    SeaOrmFuelSalesRepository, SeaOrmShopSalesRepository, SeaOrmTargetRepository,
    SeaOrmUserRepository,
};
use sea_orm::DatabaseConnection;

/// One handle per storage concern, shared by the services
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    pub captains: Arc<dyn CaptainRepository>,
    pub targets: Arc<dyn TargetRepository>,
    pub fuel: Arc<dyn FuelSalesRepository>,
    pub shop: Arc<dyn ShopSalesRepository>,
    pub evaluations: Arc<dyn EvaluationRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub credit: Arc<dyn CreditRepository>,
}

impl Repositories {
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            employees: Arc::new(SeaOrmEmployeeRepository::new(db.clone())),
            captains: Arc::new(SeaOrmCaptainRepository::new(db.clone())),
            targets: Arc::new(SeaOrmTargetRepository::new(db.clone())),
            fuel: Arc::new(SeaOrmFuelSalesRepository::new(db.clone())),
            shop: Arc::new(SeaOrmShopSalesRepository::new(db.clone())),
            evaluations: Arc::new(SeaOrmEvaluationRepository::new(db.clone())),
            attendance: Arc::new(SeaOrmAttendanceRepository::new(db.clone())),
            credit: Arc::new(SeaOrmCreditRepository::new(db)),
        }
    }

    pub fn in_memory(db: &InMemoryDatabase) -> Self {
        Self {
            users: Arc::new(db.users()),
            employees: Arc::new(db.employees()),
            captains: Arc::new(db.captains()),
            targets: Arc::new(db.targets()),
            fuel: Arc::new(db.fuel_sales()),
            shop: Arc::new(db.shop_sales()),
            evaluations: Arc::new(db.evaluations()),
            attendance: Arc::new(db.attendance()),
            credit: Arc::new(db.credit()),
        }
    }
}

pub struct AppState {
    pub auth: AuthService,
    pub staff: StaffService,
    pub sales: SalesService,
    pub evaluations: EvaluationService,
    pub summaries: SummaryService,
    pub credit: CreditService,
    pub targets: TargetService,
    pub summary_defaults: SummaryConfig,
    /// Pins "today" instead of reading the local clock
    pub fixed_today: Option<NaiveDate>,
}

impl AppState {
    pub fn new(repos: Repositories, summary_defaults: SummaryConfig) -> Self {
        Self {
            auth: AuthService::new(repos.users.clone(), repos.employees.clone()),
            staff: StaffService::new(
                repos.employees.clone(),
                repos.captains.clone(),
                repos.users.clone(),
            ),
            sales: SalesService::new(
                repos.fuel.clone(),
                repos.shop.clone(),
                repos.targets.clone(),
                repos.employees.clone(),
            ),
            evaluations: EvaluationService::new(
                repos.evaluations.clone(),
                repos.attendance.clone(),
                repos.employees.clone(),
            ),
            summaries: SummaryService::new(
                repos.fuel,
                repos.shop,
                repos.targets.clone(),
                repos.evaluations,
                repos.attendance,
                repos.employees,
                repos.captains,
            ),
            credit: CreditService::new(repos.credit),
            targets: TargetService::new(repos.targets),
            summary_defaults,
            fixed_today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// The station's calendar day
    pub fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
