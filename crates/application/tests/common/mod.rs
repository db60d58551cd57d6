#![allow(dead_code)]

use std::sync::Arc;

use application::{
    AuthService, CreditService, EvaluationService, SalesService, StaffService, SummaryService,
    TargetService,
};
use chrono::NaiveDate;
use domain::staff::{
    Captain, EmployeeProfile, EmployeeRepository, EmployeeStatus, Gender, JobRole, Site, User,
};
use domain::{Actor, Employee};
use infrastructure::InMemoryDatabase;
use infrastructure::auth::hash_password;

pub const PASSWORD: &str = "s3cret-pass";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(s: &str) -> rust_decimal::Decimal {
    s.parse().unwrap()
}

pub fn profile(name: &str, role: JobRole, site: Site) -> EmployeeProfile {
    EmployeeProfile {
        name: name.to_string(),
        gender: Gender::Female,
        contact: "0240000000".to_string(),
        dob: date(1994, 2, 11),
        location: "Madina".to_string(),
        guarantor_name: "Yaa".to_string(),
        guarantor_contact: "0201111111".to_string(),
        job_description: role,
        date_employed: date(2023, 1, 9),
        training_start: date(2023, 1, 9),
        training_end: date(2023, 1, 20),
        ssnit: None,
        account: None,
        status: EmployeeStatus::Active,
        site,
    }
}

/// Every service wired to one in-memory store
pub struct Harness {
    pub db: InMemoryDatabase,
    pub auth: AuthService,
    pub staff: StaffService,
    pub sales: SalesService,
    pub evaluations: EvaluationService,
    pub summaries: SummaryService,
    pub credit: CreditService,
    pub targets: TargetService,
}

impl Harness {
    pub fn new() -> Self {
        let db = InMemoryDatabase::new();
        Self {
            auth: AuthService::new(Arc::new(db.users()), Arc::new(db.employees())),
            staff: StaffService::new(
                Arc::new(db.employees()),
                Arc::new(db.captains()),
                Arc::new(db.users()),
            ),
            sales: SalesService::new(
                Arc::new(db.fuel_sales()),
                Arc::new(db.shop_sales()),
                Arc::new(db.targets()),
                Arc::new(db.employees()),
            ),
            evaluations: EvaluationService::new(
                Arc::new(db.evaluations()),
                Arc::new(db.attendance()),
                Arc::new(db.employees()),
            ),
            summaries: SummaryService::new(
                Arc::new(db.fuel_sales()),
                Arc::new(db.shop_sales()),
                Arc::new(db.targets()),
                Arc::new(db.evaluations()),
                Arc::new(db.attendance()),
                Arc::new(db.employees()),
                Arc::new(db.captains()),
            ),
            credit: CreditService::new(Arc::new(db.credit())),
            targets: TargetService::new(Arc::new(db.targets())),
            db,
        }
    }

    pub async fn user(&self, username: &str, is_captain: bool) -> User {
        self.db
            .insert_user(User {
                id: 0,
                username: username.to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
                is_captain,
                is_manager: false,
                is_supervisor: false,
                is_no_role: !is_captain,
            })
            .await
    }

    /// A login with an employee profile, as the caller of a request
    pub async fn actor(&self, username: &str, role: JobRole, site: Site, is_captain: bool) -> Actor {
        let user = self.user(username, is_captain).await;
        let employee = self
            .db
            .employees()
            .create(&profile(username, role, site), Some(user.id))
            .await
            .unwrap();
        Actor {
            user,
            employee: Some(employee),
        }
    }

    /// A captain login with a profile of the given role
    pub async fn captain(&self, username: &str, role: JobRole, site: Site) -> (Actor, Captain) {
        let actor = self.actor(username, role, site, true).await;
        let captain = self.db.insert_captain(actor.user.id, site).await;
        (actor, captain)
    }

    pub async fn attendant(&self, name: &str, role: JobRole, site: Site) -> Employee {
        self.db
            .employees()
            .create(&profile(name, role, site), None)
            .await
            .unwrap()
    }
}
