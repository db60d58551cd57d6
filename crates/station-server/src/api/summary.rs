use std::sync::Arc;

use application::SummaryWindow;
use application::summary::{CombinedPerformance, FuelPerformanceSummary};
use axum::Json;
use axum::extract::{Path, State};
use chrono::{Datelike, Utc};
use domain::summary::{ScoreSummary, SiteSalesSummary};
use serde::Deserialize;

use crate::auth::Caller;
use crate::error::{ApiQuery, ApiResult};
use crate::state::AppState;

/// `?year=&last_n_days=`; absent values fall back to the current year and the
/// configured window
#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    year: Option<i32>,
    last_n_days: Option<u32>,
}

impl SummaryParams {
    fn window(&self, state: &AppState) -> SummaryWindow {
        let today = state.today();
        SummaryWindow {
            year: self.year.unwrap_or_else(|| today.year()),
            last_n_days: self
                .last_n_days
                .unwrap_or(state.summary_defaults.last_n_days),
            today,
        }
    }
}

// --- Per-user fuel performance ---

pub async fn own_fuel(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> ApiResult<Json<FuelPerformanceSummary>> {
    fuel(&state, actor.user.id, &params).await
}

pub async fn user_fuel(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(user): Path<i32>,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> ApiResult<Json<FuelPerformanceSummary>> {
    fuel(&state, user, &params).await
}

async fn fuel(
    state: &AppState,
    user: i32,
    params: &SummaryParams,
) -> ApiResult<Json<FuelPerformanceSummary>> {
    let summary = state
        .summaries
        .fuel_summary(user, params.window(state))
        .await?;
    Ok(Json(summary))
}

// --- Evaluation / attendance scores of an employee ---

pub async fn own_evaluation(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
) -> ApiResult<Json<ScoreSummary>> {
    let employee = state.staff.me(&actor)?.id;
    Ok(Json(
        state
            .summaries
            .evaluation_summary(employee, state.today())
            .await?,
    ))
}

pub async fn employee_evaluation(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(employee): Path<i32>,
) -> ApiResult<Json<ScoreSummary>> {
    Ok(Json(
        state
            .summaries
            .evaluation_summary(employee, state.today())
            .await?,
    ))
}

pub async fn own_attendance(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
) -> ApiResult<Json<ScoreSummary>> {
    let employee = state.staff.me(&actor)?.id;
    Ok(Json(
        state
            .summaries
            .attendance_summary(employee, state.today())
            .await?,
    ))
}

pub async fn employee_attendance(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(employee): Path<i32>,
) -> ApiResult<Json<ScoreSummary>> {
    Ok(Json(
        state
            .summaries
            .attendance_summary(employee, state.today())
            .await?,
    ))
}

// --- Combined view ---

pub async fn own_combined(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> ApiResult<Json<CombinedPerformance>> {
    combined(&state, actor.user.id, &params).await
}

pub async fn user_combined(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(user): Path<i32>,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> ApiResult<Json<CombinedPerformance>> {
    combined(&state, user, &params).await
}

async fn combined(
    state: &AppState,
    user: i32,
    params: &SummaryParams,
) -> ApiResult<Json<CombinedPerformance>> {
    let view = state
        .summaries
        .combined(user, params.window(state), Utc::now())
        .await?;
    Ok(Json(view))
}

// --- Site sales of the caller's station ---

pub async fn fuel_site(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> ApiResult<Json<SiteSalesSummary>> {
    let window = params.window(&state);
    let summary = state
        .summaries
        .fuel_site_summary(&actor, window.year, window.today)
        .await?;
    Ok(Json(summary))
}

pub async fn shop_site(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiQuery(params): ApiQuery<SummaryParams>,
) -> ApiResult<Json<SiteSalesSummary>> {
    let window = params.window(&state);
    let summary = state
        .summaries
        .shop_site_summary(&actor, window.year, window.today)
        .await?;
    Ok(Json(summary))
}
