//! Dashboard handlers for KPIs and chart series

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::dashboard::{
    AverageMargin, DashboardService, InventoryValue, SalesTrend, StockRuptureRate, TopProducts,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TopProductsQuery {
    pub limit: Option<i64>,
}

/// Total inventory value at cost
pub async fn get_inventory_value(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<InventoryValue>> {
    let service = DashboardService::new(state.db.clone());
    let value = service
        .get_inventory_value(current_user.0.organization_id)
        .await?;
    Ok(Json(value))
}

/// Average margin across priced products
pub async fn get_average_margin(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<AverageMargin>> {
    let service = DashboardService::new(state.db.clone());
    let margin = service
        .get_average_margin(current_user.0.organization_id)
        .await?;
    Ok(Json(margin))
}

/// Share of products with zero stock
pub async fn get_stock_rupture_rate(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<StockRuptureRate>> {
    let service = DashboardService::new(state.db.clone());
    let rate = service
        .get_stock_rupture_rate(current_user.0.organization_id)
        .await?;
    Ok(Json(rate))
}

/// Daily exit quantities for the requested number of days
pub async fn get_sales_trend(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<SalesTrend>> {
    let days = query.days.unwrap_or(30).clamp(1, 365);
    let service = DashboardService::new(state.db.clone());
    let trend = service
        .get_sales_trend(current_user.0.organization_id, days)
        .await?;
    Ok(Json(trend))
}

/// Top products by exit quantity
pub async fn get_top_products(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<TopProductsQuery>,
) -> AppResult<Json<TopProducts>> {
    let limit = query.limit.unwrap_or(5).clamp(1, 50);
    let service = DashboardService::new(state.db.clone());
    let top = service
        .get_top_products(current_user.0.organization_id, limit)
        .await?;
    Ok(Json(top))
}
