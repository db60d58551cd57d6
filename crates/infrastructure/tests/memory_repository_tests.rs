//! Behaviour of the in-memory repositories that services and API tests rely on

use chrono::NaiveDate;
use domain::evaluation::{AttendanceRepository, EvaluationRepository, ScoredEntry};
use domain::sales::{FuelSalesEntry, FuelSalesRepository, PumpTarget, TargetRepository};
use domain::staff::{
    EmployeeProfile, EmployeeRepository, EmployeeStatus, Gender, JobRole, Pump, Site, User,
    UserRepository,
};
use domain::DomainError;
use infrastructure::InMemoryDatabase;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn user(username: &str) -> User {
    User {
        id: 0,
        username: username.to_string(),
        password_hash: String::new(),
        is_captain: false,
        is_manager: false,
        is_supervisor: false,
        is_no_role: false,
    }
}

fn profile(name: &str, site: Site) -> EmployeeProfile {
    EmployeeProfile {
        name: name.to_string(),
        gender: Gender::Male,
        contact: "0244000000".to_string(),
        dob: date(1990, 1, 1),
        location: "Tema".to_string(),
        guarantor_name: "Akosua".to_string(),
        guarantor_contact: "0200000000".to_string(),
        job_description: JobRole::CustomerChampion,
        date_employed: date(2023, 6, 1),
        training_start: date(2023, 6, 1),
        training_end: date(2023, 6, 14),
        ssnit: None,
        account: None,
        status: EmployeeStatus::Active,
        site,
    }
}

fn fuel_entry(day: NaiveDate, captain: i32) -> FuelSalesEntry {
    FuelSalesEntry {
        date: day,
        pump: Pump::Pump1,
        captain,
        pms_sales: Decimal::from(500),
        dx_sales: Decimal::from(250),
        vp_sales: Decimal::ZERO,
    }
}

fn scored(attendant: i32) -> ScoredEntry {
    ScoredEntry {
        attendant,
        raw_score: Decimal::from(7),
        percentage: Decimal::from(100),
    }
}

#[tokio::test]
async fn test_fuel_sales_unique_per_user_and_day() {
    let db = InMemoryDatabase::new();
    let kofi = db.insert_user(user("kofi")).await;
    let captain = db.insert_captain(kofi.id, Site::Airport).await;
    let repo = db.fuel_sales();

    repo.create(kofi.id, &fuel_entry(date(2025, 3, 1), captain.id), None)
        .await
        .unwrap();
    let err = repo
        .create(kofi.id, &fuel_entry(date(2025, 3, 1), captain.id), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));

    // Next day is fine
    repo.create(kofi.id, &fuel_entry(date(2025, 3, 2), captain.id), None)
        .await
        .unwrap();
    assert_eq!(repo.find_by_user(kofi.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_fuel_sales_reject_unknown_captain() {
    let db = InMemoryDatabase::new();
    let kofi = db.insert_user(user("kofi")).await;

    let err = db
        .fuel_sales()
        .create(kofi.id, &fuel_entry(date(2025, 3, 1), 999), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[tokio::test]
async fn test_find_by_site_filters_on_employee_site_and_dates() {
    let db = InMemoryDatabase::new();
    let ama = db.insert_user(user("ama")).await;
    let yaw = db.insert_user(user("yaw")).await;
    let captain = db.insert_captain(ama.id, Site::Bohye).await;
    db.employees()
        .create(&profile("Ama", Site::Bohye), Some(ama.id))
        .await
        .unwrap();
    db.employees()
        .create(&profile("Yaw", Site::Airport), Some(yaw.id))
        .await
        .unwrap();

    let repo = db.fuel_sales();
    repo.create(ama.id, &fuel_entry(date(2025, 4, 10), captain.id), None)
        .await
        .unwrap();
    repo.create(ama.id, &fuel_entry(date(2025, 5, 10), captain.id), None)
        .await
        .unwrap();
    repo.create(yaw.id, &fuel_entry(date(2025, 4, 11), captain.id), None)
        .await
        .unwrap();

    let april = repo
        .find_by_site(Site::Bohye, date(2025, 4, 1), date(2025, 4, 30))
        .await
        .unwrap();
    assert_eq!(april.len(), 1);
    assert_eq!(april[0].user, ama.id);
}

#[tokio::test]
async fn test_one_employee_per_user() {
    let db = InMemoryDatabase::new();
    let esi = db.insert_user(user("esi")).await;
    let repo = db.employees();

    repo.create(&profile("Esi", Site::Ofankor), Some(esi.id))
        .await
        .unwrap();
    let err = repo
        .create(&profile("Esi again", Site::Ofankor), Some(esi.id))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));

    // Unlinked employees are unrestricted
    repo.create(&profile("Walk-in", Site::Ofankor), None).await.unwrap();
    repo.create(&profile("Walk-in 2", Site::Ofankor), None).await.unwrap();
}

#[tokio::test]
async fn test_week_is_reused_within_monday_to_sunday() {
    let db = InMemoryDatabase::new();
    let repo = db.evaluations();

    let monday = date(2025, 6, 2);
    let sunday = date(2025, 6, 8);
    let first = repo
        .find_or_create_week(monday, sunday, date(2025, 6, 3))
        .await
        .unwrap();
    let again = repo
        .find_or_create_week(monday, sunday, date(2025, 6, 6))
        .await
        .unwrap();
    assert_eq!(first.id, again.id);

    let next = repo
        .find_or_create_week(date(2025, 6, 9), date(2025, 6, 15), date(2025, 6, 9))
        .await
        .unwrap();
    assert_ne!(first.id, next.id);
}

#[tokio::test]
async fn test_insert_scores_is_all_or_nothing() {
    let db = InMemoryDatabase::new();
    let ama = db
        .employees()
        .create(&profile("Ama", Site::Airport), None)
        .await
        .unwrap();
    let kojo = db
        .employees()
        .create(&profile("Kojo", Site::Airport), None)
        .await
        .unwrap();
    let repo = db.evaluations();
    let week = repo
        .find_or_create_week(date(2025, 6, 2), date(2025, 6, 8), date(2025, 6, 2))
        .await
        .unwrap();

    repo.insert_scores(week.id, &[scored(ama.id)]).await.unwrap();

    let err = repo
        .insert_scores(week.id, &[scored(kojo.id), scored(ama.id)])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Duplicate(_)));
    assert_eq!(repo.evaluated_attendants(week.id).await.unwrap(), vec![ama.id]);
}

#[tokio::test]
async fn test_deleting_employee_cascades_to_scores() {
    let db = InMemoryDatabase::new();
    let ama = db
        .employees()
        .create(&profile("Ama", Site::Airport), None)
        .await
        .unwrap();
    let attendance = db.attendance();
    let day = attendance.find_or_create_date(date(2025, 6, 2)).await.unwrap();
    attendance.insert_marks(day.id, &[scored(ama.id)]).await.unwrap();
    assert_eq!(attendance.history(ama.id, None).await.unwrap().len(), 1);

    db.employees().delete(ama.id).await.unwrap();
    assert!(attendance.find_marks(day.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_history_newest_first_within_range() {
    let db = InMemoryDatabase::new();
    let ama = db
        .employees()
        .create(&profile("Ama", Site::Airport), None)
        .await
        .unwrap();
    let attendance = db.attendance();
    for d in [3, 1, 2] {
        let day = attendance.find_or_create_date(date(2025, 7, d)).await.unwrap();
        attendance.insert_marks(day.id, &[scored(ama.id)]).await.unwrap();
    }

    let history = attendance
        .history(ama.id, Some((date(2025, 7, 2), date(2025, 7, 31))))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = history.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date(2025, 7, 3), date(2025, 7, 2)]);
}

#[tokio::test]
async fn test_targets_overwrite_in_place() {
    let db = InMemoryDatabase::new();
    let repo = db.targets();
    assert_eq!(repo.pump_target(Site::Palmwine, Pump::Pump3).await.unwrap(), None);

    for value in [4000, 4500] {
        repo.set_pump_target(&PumpTarget {
            site: Site::Palmwine,
            pump: Pump::Pump3,
            target: Decimal::from(value),
        })
        .await
        .unwrap();
    }
    assert_eq!(
        repo.pump_target(Site::Palmwine, Pump::Pump3).await.unwrap(),
        Some(Decimal::from(4500))
    );
    assert_eq!(repo.pump_targets().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_token_is_stable_per_user() {
    let db = InMemoryDatabase::new();
    let kofi = db.insert_user(user("kofi")).await;
    let users = db.users();

    let token = users.get_or_create_token(kofi.id).await.unwrap();
    assert_eq!(users.get_or_create_token(kofi.id).await.unwrap(), token);
    assert_eq!(
        users.find_by_token(&token).await.unwrap().map(|u| u.username),
        Some("kofi".to_string())
    );
    assert_eq!(users.find_by_token("nope").await.unwrap(), None);
}
