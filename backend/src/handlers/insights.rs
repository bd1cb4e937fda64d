//! Insight handlers: profitability, period comparison, recommendations

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::insights::{
    InsightsService, PeriodComparison, ProfitabilityReport, RecommendationsReport,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub days: Option<i64>,
}

/// Margin and profit potential per product
pub async fn get_profitability_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<ProfitabilityReport>> {
    current_user.0.require_admin()?;
    let service = InsightsService::new(state.db.clone());
    let report = service
        .get_profitability_report(current_user.0.organization_id)
        .await?;
    Ok(Json(report))
}

/// Compare the current period against the previous one
pub async fn compare_periods(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ComparisonQuery>,
) -> AppResult<Json<PeriodComparison>> {
    current_user.0.require_admin()?;
    let days = query.days.unwrap_or(30).clamp(1, 365);
    let service = InsightsService::new(state.db.clone());
    let comparison = service
        .compare_periods(current_user.0.organization_id, days)
        .await?;
    Ok(Json(comparison))
}

/// Rule-based stock and pricing recommendations
pub async fn get_recommendations(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<RecommendationsReport>> {
    current_user.0.require_admin()?;
    let service = InsightsService::new(state.db.clone());
    let report = service
        .get_recommendations(current_user.0.organization_id)
        .await?;
    Ok(Json(report))
}
