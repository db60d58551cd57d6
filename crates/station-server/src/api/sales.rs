use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::Capability;
use domain::sales::{FuelSales, FuelSalesEntry, ShopSales, ShopSalesEntry};
use serde_json::{Value, json};

use crate::auth::Caller;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_fuel(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<FuelSales>>> {
    Ok(Json(state.sales.list_fuel().await?))
}

pub async fn record_fuel(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiJson(entry): ApiJson<FuelSalesEntry>,
) -> ApiResult<(StatusCode, Json<FuelSales>)> {
    let sale = state.sales.record_fuel(&actor, entry).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn get_fuel(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<FuelSales>> {
    Ok(Json(state.sales.get_fuel(id).await?))
}

pub async fn update_fuel(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
    ApiJson(entry): ApiJson<FuelSalesEntry>,
) -> ApiResult<Json<FuelSales>> {
    Ok(Json(state.sales.update_fuel(id, entry).await?))
}

pub async fn delete_fuel(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.sales.delete_fuel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Re-derive every stored fuel performance from the current targets
pub async fn recompute_fuel(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
) -> ApiResult<Json<Value>> {
    Capability::ManageTargets.require(&actor)?;
    let updated = state.sales.recompute_fuel_performance().await?;
    Ok(Json(json!({ "updated": updated })))
}

pub async fn list_shop(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<ShopSales>>> {
    Ok(Json(state.sales.list_shop().await?))
}

pub async fn record_shop(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiJson(entry): ApiJson<ShopSalesEntry>,
) -> ApiResult<(StatusCode, Json<ShopSales>)> {
    let sale = state.sales.record_shop(&actor, entry).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn get_shop(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<ShopSales>> {
    Ok(Json(state.sales.get_shop(id).await?))
}

pub async fn update_shop(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
    ApiJson(entry): ApiJson<ShopSalesEntry>,
) -> ApiResult<Json<ShopSales>> {
    Ok(Json(state.sales.update_shop(id, entry).await?))
}

pub async fn delete_shop(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.sales.delete_shop(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recompute_shop(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
) -> ApiResult<Json<Value>> {
    Capability::ManageTargets.require(&actor)?;
    let updated = state.sales.recompute_shop_performance().await?;
    Ok(Json(json!({ "updated": updated })))
}
