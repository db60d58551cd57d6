use std::sync::Arc;

use application::LoginResponse;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::Site;
use domain::staff::{CaptainProfile, Employee, EmployeeProfile};
use serde::Deserialize;

use super::parse_code;
use crate::auth::Caller;
use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct Credentials {
    username: String,
    password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(response))
}

/// Employee body: every profile field plus the optional login to link
#[derive(Deserialize)]
pub struct EmployeeRequest {
    #[serde(default)]
    user: Option<i32>,
    #[serde(flatten)]
    profile: EmployeeProfile,
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.staff.list_employees().await?))
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    ApiJson(request): ApiJson<EmployeeRequest>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let employee = state
        .staff
        .create_employee(request.profile, request.user)
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn me(Caller(actor): Caller, State(state): State<Arc<AppState>>) -> ApiResult<Json<Employee>> {
    Ok(Json(state.staff.me(&actor)?))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(state.staff.get_employee(id).await?))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
    ApiJson(request): ApiJson<EmployeeRequest>,
) -> ApiResult<Json<Employee>> {
    let employee = state
        .staff
        .update_employee(id, request.profile, request.user)
        .await?;
    Ok(Json(employee))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.staff.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn active_attendants(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.staff.active_attendants().await?))
}

#[derive(Deserialize)]
pub struct CaptainQuery {
    site: Option<String>,
}

pub async fn captains(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    ApiQuery(query): ApiQuery<CaptainQuery>,
) -> ApiResult<Json<Vec<CaptainProfile>>> {
    let site = query.site.as_deref().map(parse_code::<Site>).transpose()?;
    Ok(Json(state.staff.captains(site).await?))
}
