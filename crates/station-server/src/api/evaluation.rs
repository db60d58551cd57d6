use std::sync::Arc;

use application::evaluation::{AttendanceSubmission, RegisterDetail, WeekDetail, WeeklySubmission};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::evaluation::ScoreEntry;
use serde::Deserialize;

use crate::auth::Caller;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct WeeklyRequest {
    #[serde(default)]
    evaluations: Vec<ScoreEntry>,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    register: Vec<ScoreEntry>,
}

pub async fn list_weeks(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<WeekDetail>>> {
    Ok(Json(state.evaluations.list_weeks().await?))
}

pub async fn submit_weekly(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiJson(request): ApiJson<WeeklyRequest>,
) -> ApiResult<(StatusCode, Json<WeeklySubmission>)> {
    let submission = state
        .evaluations
        .submit_weekly(&actor, &request.evaluations, state.today())
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

pub async fn get_week(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<WeekDetail>> {
    Ok(Json(state.evaluations.get_week(id).await?))
}

pub async fn delete_week(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.evaluations.delete_week(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_registers(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<RegisterDetail>>> {
    Ok(Json(state.evaluations.list_registers().await?))
}

pub async fn submit_attendance(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AttendanceSubmission>)> {
    let submission = state
        .evaluations
        .submit_attendance(&actor, &request.register, state.today())
        .await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

pub async fn get_register(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<RegisterDetail>> {
    Ok(Json(state.evaluations.get_register(id).await?))
}

pub async fn delete_register(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.evaluations.delete_register(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
