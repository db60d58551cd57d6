use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::sales::{PumpTarget, ShopTarget};
use domain::{Pump, Site};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::parse_code;
use crate::auth::Caller;
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TargetRequest {
    target: Decimal,
}

pub async fn pump_targets(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<PumpTarget>>> {
    Ok(Json(state.targets.pump_targets().await?))
}

pub async fn shop_targets(
    State(state): State<Arc<AppState>>,
    _caller: Caller,
) -> ApiResult<Json<Vec<ShopTarget>>> {
    Ok(Json(state.targets.shop_targets().await?))
}

pub async fn set_pump_target(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    Path((site, pump)): Path<(String, String)>,
    ApiJson(request): ApiJson<TargetRequest>,
) -> ApiResult<Json<PumpTarget>> {
    let site: Site = parse_code(&site)?;
    let pump: Pump = parse_code(&pump)?;
    let target = state
        .targets
        .set_pump_target(&actor, site, pump, request.target)
        .await?;
    Ok(Json(target))
}

pub async fn set_shop_target(
    State(state): State<Arc<AppState>>,
    Caller(actor): Caller,
    Path(site): Path<String>,
    ApiJson(request): ApiJson<TargetRequest>,
) -> ApiResult<Json<ShopTarget>> {
    let site: Site = parse_code(&site)?;
    let target = state
        .targets
        .set_shop_target(&actor, site, request.target)
        .await?;
    Ok(Json(target))
}
