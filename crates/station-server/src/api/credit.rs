use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::credit::{
    CreditCollection, CreditCollectionEntry, CreditSale, CreditSaleEntry, Customer, CustomerEntry,
};

use crate::auth::Caller;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

// --- Customers ---

pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.credit.list_customers().await?))
}

pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    ApiJson(entry): ApiJson<CustomerEntry>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let customer = state.credit.create_customer(entry).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.credit.get_customer(id).await?))
}

// --- Credit sales ---

pub async fn list_sales(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<CreditSale>>> {
    Ok(Json(state.credit.list_sales().await?))
}

pub async fn record_sale(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiJson(entry): ApiJson<CreditSaleEntry>,
) -> ApiResult<(StatusCode, Json<CreditSale>)> {
    let sale = state.credit.record_sale(&actor, entry, state.today()).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

pub async fn get_sale(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<CreditSale>> {
    Ok(Json(state.credit.get_sale(id).await?))
}

pub async fn update_sale(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
    ApiJson(entry): ApiJson<CreditSaleEntry>,
) -> ApiResult<Json<CreditSale>> {
    Ok(Json(state.credit.update_sale(id, entry).await?))
}

pub async fn delete_sale(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.credit.delete_sale(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Collections ---

pub async fn list_collections(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<CreditCollection>>> {
    Ok(Json(state.credit.list_collections().await?))
}

pub async fn record_collection(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    ApiJson(entry): ApiJson<CreditCollectionEntry>,
) -> ApiResult<(StatusCode, Json<CreditCollection>)> {
    let collection = state
        .credit
        .record_collection(&actor, entry, state.today())
        .await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

pub async fn get_collection(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
    Path(id): Path<i32>,
) -> ApiResult<Json<CreditCollection>> {
    Ok(Json(state.credit.get_collection(id).await?))
}

pub async fn update_collection(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    Path(id): Path<i32>,
    ApiJson(entry): ApiJson<CreditCollectionEntry>,
) -> ApiResult<Json<CreditCollection>> {
    Ok(Json(state.credit.update_collection(&actor, id, entry).await?))
}

pub async fn delete_collection(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.credit.delete_collection(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
