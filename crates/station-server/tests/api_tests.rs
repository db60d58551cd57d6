use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::NaiveDate;
use domain::sales::{PumpTarget, TargetRepository};
use domain::staff::{
    EmployeeProfile, EmployeeRepository, EmployeeStatus, Gender, JobRole, Pump, Site, User,
    UserRepository,
};
use http_body_util::BodyExt;
use infrastructure::InMemoryDatabase;
use infrastructure::auth::hash_password;
use infrastructure::config::SummaryConfig;
use serde_json::{Value, json};
use station_server::{AppState, Repositories, create_router};
use tower::ServiceExt;

const PASSWORD: &str = "forecourt-pass";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn profile(name: &str, role: JobRole, site: Site) -> EmployeeProfile {
    EmployeeProfile {
        name: name.to_string(),
        gender: Gender::Male,
        contact: "0551234567".to_string(),
        dob: date(1996, 8, 3),
        location: "Dome".to_string(),
        guarantor_name: "Kofi".to_string(),
        guarantor_contact: "0209876543".to_string(),
        job_description: role,
        date_employed: date(2024, 3, 4),
        training_start: date(2024, 3, 4),
        training_end: date(2024, 3, 15),
        ssnit: None,
        account: None,
        status: EmployeeStatus::Active,
        site,
    }
}

struct TestApp {
    db: InMemoryDatabase,
    router: Router,
}

impl TestApp {
    fn new() -> Self {
        let db = InMemoryDatabase::new();
        let state = AppState::new(Repositories::in_memory(&db), SummaryConfig::default())
            .with_today(date(2025, 6, 16));
        Self {
            router: create_router(Arc::new(state)),
            db,
        }
    }

    async fn user(&self, username: &str, is_captain: bool, is_manager: bool) -> User {
        self.db
            .insert_user(User {
                id: 0,
                username: username.to_string(),
                password_hash: hash_password(PASSWORD).unwrap(),
                is_captain,
                is_manager,
                is_supervisor: false,
                is_no_role: !(is_captain || is_manager),
            })
            .await
    }

    /// A login with an employee profile; returns its API token
    async fn staff(&self, username: &str, role: JobRole, site: Site, is_captain: bool) -> String {
        let user = self.user(username, is_captain, role == JobRole::Manager).await;
        self.db
            .employees()
            .create(&profile(username, role, site), Some(user.id))
            .await
            .unwrap();
        self.db.users().get_or_create_token(user.id).await.unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Token {}", token));
        }
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_login_returns_token_and_role_flags() {
    let app = TestApp::new();
    let user = app.user("0241112222", true, false).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/token-auth/",
            None,
            Some(json!({ "username": "0241112222", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usid"], json!(user.id));
    assert_eq!(body["isCaptain"], json!(true));
    assert_eq!(body["isnoRole"], json!(false));
    let token = body["token"].as_str().unwrap();
    assert_eq!(token.len(), 32);

    // The issued token authenticates later requests
    let (status, _) = app
        .send(Method::GET, "/api/employees/", Some(token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_bad_credentials_are_rejected_with_detail() {
    let app = TestApp::new();
    app.user("0241112222", false, false).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/token-auth/",
            None,
            Some(json!({ "username": "0241112222", "password": "nope" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        json!("Unable to log in with provided credentials.")
    );
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/fuel-sales/", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].is_string());

    let (status, _) = app
        .send(Method::GET, "/api/fuel-sales/", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fuel_sale_scores_against_pump_target() {
    let app = TestApp::new();
    let token = app
        .staff("ama", JobRole::CustomerChampion, Site::Ofankor, false)
        .await;
    app.db
        .targets()
        .set_pump_target(&PumpTarget {
            site: Site::Ofankor,
            pump: Pump::Pump2,
            target: "1250".parse().unwrap(),
        })
        .await
        .unwrap();

    let supervisor = app.user("kwame", true, false).await;
    let captain = app.db.insert_captain(supervisor.id, Site::Ofankor).await;

    let entry = json!({
        "date": "2025-06-16",
        "pump": "pump2",
        "captain": captain.id,
        "pms_sales": 600.0,
        "dx_sales": 300.0,
        "vp_sales": 100.0
    });
    let (status, body) = app
        .send(Method::POST, "/api/fuel-sales/", Some(&token), Some(entry.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["performance"].as_f64(), Some(80.0));

    // Same user, same day
    let (status, body) = app
        .send(Method::POST, "/api/fuel-sales/", Some(&token), Some(entry))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_weekly_evaluation_and_attendance_permissions() {
    let app = TestApp::new();
    let captain = app
        .staff("kojo", JobRole::CustomerChampion, Site::Airport, true)
        .await;
    let attendant = app
        .staff("esi", JobRole::ServiceChampion, Site::Airport, false)
        .await;
    let esi = app.db.employees().find_all().await.unwrap()[1].id;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/weekly-evaluations/",
            Some(&captain),
            Some(json!({ "evaluations": [{ "attendant": esi, "raw_score": 6.3 }] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["created"][0]["percentage_score"].as_f64(), Some(90.0));
    assert_eq!(body["created"][0]["attendant"], json!("esi"));
    assert_eq!(body["created"][0]["attendant_id"], json!(esi));

    // Only captains mark attendance
    let register = json!({ "register": [{ "attendant": esi, "raw_score": 1.8 }] });
    let (status, _) = app
        .send(
            Method::POST,
            "/api/daily-attendance-post/",
            Some(&attendant),
            Some(register.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/daily-attendance-post/",
            Some(&captain),
            Some(register),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "attendance_date": "2025-06-16" }));
}

#[tokio::test]
async fn test_target_upsert_requires_manager() {
    let app = TestApp::new();
    let attendant = app
        .staff("yaw", JobRole::CustomerChampion, Site::Bohye, false)
        .await;
    let manager = app.staff("efua", JobRole::Manager, Site::Bohye, false).await;
    let body = json!({ "target": 6000.0 });

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/targets/pump/bohye/pump1",
            Some(&attendant),
            Some(body.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, saved) = app
        .send(
            Method::PUT,
            "/api/targets/pump/bohye/pump1",
            Some(&manager),
            Some(body.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["site"], json!("bohye"));
    assert_eq!(saved["target"].as_f64(), Some(6000.0));

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/targets/pump/tema/pump1",
            Some(&manager),
            Some(body),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("\"tema\" is not a valid site."));
}

#[tokio::test]
async fn test_site_summary_needs_an_employee_profile() {
    let app = TestApp::new();
    let user = app.user("no-profile", false, false).await;
    let token = app.db.users().get_or_create_token(user.id).await.unwrap();

    let (status, body) = app
        .send(Method::GET, "/api/fuel-sales-summary/", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], json!("User site not found."));
}

#[tokio::test]
async fn test_fuel_performance_summary_defaults() {
    let app = TestApp::new();
    let token = app
        .staff("akua", JobRole::CustomerChampion, Site::Palmwine, false)
        .await;

    let (status, body) = app
        .send(
            Method::GET,
            "/api/fuel-performance-summary/",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"], json!({ "year": 2025, "last_n_days": 30 }));
    assert_eq!(body["quarterly_performance"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_summaries_accept_any_window_length() {
    let app = TestApp::new();
    let token = app
        .staff("kofi", JobRole::CustomerChampion, Site::Airport, false)
        .await;

    for uri in [
        "/api/fuel-performance-summary/?last_n_days=4000000000",
        "/api/evaluation-summary-all/?last_n_days=4000000000",
    ] {
        let (status, body) = app.send(Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["meta"]["last_n_days"], json!(4_000_000_000u32), "{}", uri);
    }

    // Beyond u32 is a malformed query
    let (status, body) = app
        .send(
            Method::GET,
            "/api/fuel-performance-summary/?last_n_days=5000000000",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let app = TestApp::new();
    let token = app
        .staff("abena", JobRole::Supervisor, Site::EastLegon, false)
        .await;

    let (status, body) = app
        .send(Method::GET, "/api/employees/999/", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["detail"].is_string());

    let (status, _) = app
        .send(Method::DELETE, "/api/credit-sales/999/", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
