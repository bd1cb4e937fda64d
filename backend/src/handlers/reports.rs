//! Reporting handlers for analytics and data export
//!
//! All report endpoints are admin-only and accept the same window query:
//! a period token or an explicit date range, plus an optional `format`
//! field that switches the response to a CSV attachment.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::{
    AlertsReport, CategoryReportItem, FinancialReport, MovementFilter, MovementReport,
    StockOverview,
};
use shared::types::MovementType;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::reports::{window, ReportWindowParams, ReportingService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Period token: "7d", "30d", "90d", or "365d"
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// "json" (default) or "csv"
    pub format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovementReportQuery {
    pub product_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ReportQuery {
    fn window_params(&self) -> ReportWindowParams {
        ReportWindowParams {
            period: self.period.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }

    fn wants_csv(&self) -> bool {
        self.format.as_deref() == Some("csv")
    }
}

fn csv_response(filename: &str, csv: String) -> axum::response::Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        csv,
    )
        .into_response()
}

/// ABC analysis report
pub async fn get_abc_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_abc_report(current_user.0.organization_id, &query.window_params())
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::export_to_csv(&report.items)?;
        Ok(csv_response("abc_analysis.csv", csv))
    } else {
        Ok(Json(report).into_response())
    }
}

/// XYZ analysis report
pub async fn get_xyz_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_xyz_report(current_user.0.organization_id, &query.window_params())
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::export_to_csv(&report.items)?;
        Ok(csv_response("xyz_analysis.csv", csv))
    } else {
        Ok(Json(report).into_response())
    }
}

/// Stock turnover report
pub async fn get_turnover_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_turnover_report(current_user.0.organization_id, &query.window_params())
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::export_to_csv(&report.items)?;
        Ok(csv_response("turnover.csv", csv))
    } else {
        Ok(Json(report).into_response())
    }
}

/// Financial snapshot report
pub async fn get_financial_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<FinancialReport>> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_financial_report(current_user.0.organization_id)
        .await?;
    Ok(Json(report))
}

/// Stockout forecast report
pub async fn get_forecast_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_forecast_report(current_user.0.organization_id, &query.window_params())
        .await?;

    if query.wants_csv() {
        let csv = ReportingService::export_to_csv(&report.items)?;
        Ok(csv_response("forecast.csv", csv))
    } else {
        Ok(Json(report).into_response())
    }
}

/// Consolidated stock overview
pub async fn get_stock_overview(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<StockOverview>> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_stock_overview(current_user.0.organization_id)
        .await?;
    Ok(Json(report))
}

/// Per-category quantity and value totals
pub async fn get_category_breakdown(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<CategoryReportItem>>> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_category_breakdown(current_user.0.organization_id)
        .await?;
    Ok(Json(report))
}

/// Products at or below their alert level
pub async fn get_alerts_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<AlertsReport>> {
    current_user.0.require_admin()?;
    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_alerts_report(current_user.0.organization_id)
        .await?;
    Ok(Json(report))
}

/// Movement history report
pub async fn get_movement_report(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<MovementReportQuery>,
) -> AppResult<Json<MovementReport>> {
    current_user.0.require_admin()?;
    let filter = MovementFilter {
        product_id: query.product_id,
        movement_type: query.movement_type,
        start_date: query.start_date.as_deref().and_then(window::parse_instant),
        end_date: query.end_date.as_deref().and_then(window::parse_instant),
    };
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let offset = query.offset.unwrap_or(0).max(0);

    let service = ReportingService::new(state.db.clone(), state.config.reports.clone());
    let report = service
        .get_movement_history(current_user.0.organization_id, filter, limit, offset)
        .await?;
    Ok(Json(report))
}
