use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use std::str::FromStr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

mod credit;
mod evaluation;
mod sales;
mod staff;
mod summary;
mod targets;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/token-auth/", post(staff::login))
        // Staff
        .route(
            "/api/employees/",
            get(staff::list_employees).post(staff::create_employee),
        )
        .route("/api/employees/me/", get(staff::me))
        .route(
            "/api/employees/{id}/",
            get(staff::get_employee)
                .put(staff::update_employee)
                .delete(staff::delete_employee),
        )
        .route("/api/active-attendants/", get(staff::active_attendants))
        .route("/api/captains/", get(staff::captains))
        // Sales
        .route("/api/fuel-sales/", get(sales::list_fuel).post(sales::record_fuel))
        .route("/api/fuel-sales/recompute/", post(sales::recompute_fuel))
        .route(
            "/api/fuel-sales/{id}/",
            get(sales::get_fuel)
                .put(sales::update_fuel)
                .delete(sales::delete_fuel),
        )
        .route("/api/shop-sales/", get(sales::list_shop).post(sales::record_shop))
        .route("/api/shop-sales/recompute/", post(sales::recompute_shop))
        .route(
            "/api/shop-sales/{id}/",
            get(sales::get_shop)
                .put(sales::update_shop)
                .delete(sales::delete_shop),
        )
        // Credit
        .route(
            "/api/customers/",
            get(credit::list_customers).post(credit::create_customer),
        )
        .route("/api/customers/{id}/", get(credit::get_customer))
        .route(
            "/api/credit-sales/",
            get(credit::list_sales).post(credit::record_sale),
        )
        .route(
            "/api/credit-sales/{id}/",
            get(credit::get_sale)
                .put(credit::update_sale)
                .delete(credit::delete_sale),
        )
        .route(
            "/api/credit-collections/",
            get(credit::list_collections).post(credit::record_collection),
        )
        .route(
            "/api/credit-collections/{id}/",
            get(credit::get_collection)
                .put(credit::update_collection)
                .delete(credit::delete_collection),
        )
        // Evaluations and attendance
        .route(
            "/api/weekly-evaluations/",
            get(evaluation::list_weeks).post(evaluation::submit_weekly),
        )
        .route(
            "/api/weekly-evaluations/{id}/",
            get(evaluation::get_week).delete(evaluation::delete_week),
        )
        .route(
            "/api/daily-attendance-post/",
            get(evaluation::list_registers).post(evaluation::submit_attendance),
        )
        .route(
            "/api/daily-attendance-post/{id}/",
            get(evaluation::get_register).delete(evaluation::delete_register),
        )
        // Targets
        .route("/api/targets/pump/", get(targets::pump_targets))
        .route("/api/targets/shop/", get(targets::shop_targets))
        .route("/api/targets/pump/{site}/{pump}", put(targets::set_pump_target))
        .route("/api/targets/shop/{site}", put(targets::set_shop_target))
        // Summaries
        .route("/api/fuel-performance-summary/", get(summary::own_fuel))
        .route("/api/fuel-performance-summary/{id}/", get(summary::user_fuel))
        .route("/api/evaluation-summary/", get(summary::own_evaluation))
        .route("/api/evaluation-summary/{id}/", get(summary::employee_evaluation))
        .route("/api/attendance-summary/", get(summary::own_attendance))
        .route("/api/attendance-summary/{id}/", get(summary::employee_attendance))
        .route("/api/evaluation-summary-all/", get(summary::own_combined))
        .route("/api/evaluation-summary-all/{id}/", get(summary::user_combined))
        .route("/api/fuel-sales-summary/", get(summary::fuel_site))
        .route("/api/shop-sales-summary/", get(summary::shop_site))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Parse a coded path or query value (site, pump) into its enum
fn parse_code<T>(raw: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = domain::DomainError>,
{
    raw.parse::<T>().map_err(ApiError::from)
}
