//! Reporting and analytics services
//!
//! The reporting engine is split into a thin assembler (this module) and
//! pure computation engines (`abc`, `xyz`, `metrics`). The assembler reads
//! product snapshots and movement aggregates, resolves the time window,
//! and hands plain data to the engines. Every report is recomputed from
//! current state per request; nothing is cached.

pub mod abc;
pub mod aggregate;
pub mod metrics;
pub mod window;
pub mod xyz;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::{
    AbcReport, AlertsReport, CategoryReportItem, FinancialReport, ForecastReport, MovementFilter,
    MovementReport, MovementReportFilters, ProductSummary, StockOverview, TurnoverReport,
    XyzReport,
};
use shared::types::MovementType;

use crate::config::ReportConfig;
use crate::error::{AppError, AppResult};
use crate::services::category::CategoryService;
use crate::services::movement::MovementService;

use window::ReportWindow;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
    config: ReportConfig,
}

/// Product snapshot consumed by the report engines
///
/// A plain read of the active-products table; the engines never see ORM
/// rows or the pool.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub cost_price: Decimal,
    pub quantity: i32,
    pub alert_level: i32,
    pub lead_time_days: i32,
}

impl ProductSnapshot {
    fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            sku: self.sku.clone(),
            quantity: self.quantity,
            alert_level: self.alert_level,
        }
    }
}

/// Window parameters accepted by every windowed report endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportWindowParams {
    /// Period token: "7d", "30d", "90d", or "365d"
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReportWindowParams {
    fn resolve(&self, default_days: i64, now: DateTime<Utc>) -> ReportWindow {
        ReportWindow::resolve(
            self.period.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            default_days,
            now,
        )
    }
}

/// Per-category totals row
#[derive(Debug, sqlx::FromRow)]
struct CategoryTotalsRow {
    category_id: Uuid,
    total_quantity: i64,
    total_value: f64,
}

impl ReportingService {
    pub fn new(db: PgPool, config: ReportConfig) -> Self {
        Self { db, config }
    }

    /// ABC analysis: Pareto classification by consumption value
    pub async fn get_abc_report(
        &self,
        organization_id: Uuid,
        params: &ReportWindowParams,
    ) -> AppResult<AbcReport> {
        let now = Utc::now();
        let window = params.resolve(self.config.abc_default_days, now);

        let products = self.active_products(organization_id).await?;
        let exits = aggregate::sum_quantity_by_product(
            &self.db,
            organization_id,
            MovementType::Exit,
            &window,
        )
        .await?;

        Ok(AbcReport {
            items: abc::classify_abc(&products, &exits, &self.config),
        })
    }

    /// XYZ analysis: demand variability over weekly exit totals
    pub async fn get_xyz_report(
        &self,
        organization_id: Uuid,
        params: &ReportWindowParams,
    ) -> AppResult<XyzReport> {
        let now = Utc::now();
        let window = params.resolve(self.config.xyz_default_weeks * 7, now);
        let weeks_to_analyze = window.duration_weeks(now) as usize;

        let products = self.active_products(organization_id).await?;
        let weekly = aggregate::weekly_quantity_by_product(
            &self.db,
            organization_id,
            MovementType::Exit,
            &window,
        )
        .await?;

        Ok(XyzReport {
            items: xyz::classify_xyz(&products, &weekly, weeks_to_analyze, &self.config),
        })
    }

    /// Stock turnover per product
    pub async fn get_turnover_report(
        &self,
        organization_id: Uuid,
        params: &ReportWindowParams,
    ) -> AppResult<TurnoverReport> {
        let now = Utc::now();
        let window = params.resolve(self.config.turnover_default_days, now);

        let products = self.active_products(organization_id).await?;
        let exits = aggregate::sum_quantity_by_product(
            &self.db,
            organization_id,
            MovementType::Exit,
            &window,
        )
        .await?;

        Ok(TurnoverReport {
            items: metrics::turnover_items(&products, &exits),
        })
    }

    /// Snapshot financial totals; no time window
    pub async fn get_financial_report(
        &self,
        organization_id: Uuid,
    ) -> AppResult<FinancialReport> {
        let products = self.active_products(organization_id).await?;
        Ok(metrics::financial_summary(&products))
    }

    /// Stockout forecast and reorder points
    pub async fn get_forecast_report(
        &self,
        organization_id: Uuid,
        params: &ReportWindowParams,
    ) -> AppResult<ForecastReport> {
        let now = Utc::now();
        let window = params.resolve(self.config.forecast_default_days, now);
        let duration_days = window.duration_days(now);

        let products = self.active_products(organization_id).await?;
        let exits = aggregate::sum_quantity_by_product(
            &self.db,
            organization_id,
            MovementType::Exit,
            &window,
        )
        .await?;

        Ok(ForecastReport {
            items: metrics::forecast_items(&products, &exits, duration_days),
        })
    }

    /// Consolidated stock metrics
    pub async fn get_stock_overview(&self, organization_id: Uuid) -> AppResult<StockOverview> {
        let products = self.active_products(organization_id).await?;

        let total_stock_value: f64 = products
            .iter()
            .map(|p| p.quantity as f64 * p.price.to_f64().unwrap_or(0.0))
            .sum();

        let low_stock_products = products
            .iter()
            .filter(|p| p.quantity <= p.alert_level)
            .map(ProductSnapshot::summary)
            .collect();
        let out_of_stock_products = products
            .iter()
            .filter(|p| p.quantity == 0)
            .map(ProductSnapshot::summary)
            .collect();

        Ok(StockOverview {
            total_products: products.len() as i64,
            total_stock_value,
            low_stock_products,
            out_of_stock_products,
        })
    }

    /// Quantity and value totals grouped by category
    pub async fn get_category_breakdown(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<CategoryReportItem>> {
        let categories = CategoryService::new(self.db.clone())
            .list_categories(organization_id)
            .await?;

        let totals = sqlx::query_as::<_, CategoryTotalsRow>(
            r#"
            SELECT category_id,
                   COALESCE(SUM(quantity), 0)::bigint AS total_quantity,
                   COALESCE(SUM(quantity * price), 0)::float8 AS total_value
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL
            GROUP BY category_id
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        let totals_map: std::collections::HashMap<Uuid, (i64, f64)> = totals
            .into_iter()
            .map(|r| (r.category_id, (r.total_quantity, r.total_value)))
            .collect();

        Ok(categories
            .into_iter()
            .map(|category| {
                let (total_quantity, total_value) =
                    totals_map.get(&category.id).copied().unwrap_or((0, 0.0));
                CategoryReportItem {
                    category,
                    total_quantity,
                    total_value,
                }
            })
            .collect())
    }

    /// Products at or below their alert level
    pub async fn get_alerts_report(&self, organization_id: Uuid) -> AppResult<AlertsReport> {
        let products = self.active_products(organization_id).await?;
        let critical_products = products
            .iter()
            .filter(|p| p.quantity <= p.alert_level)
            .map(ProductSnapshot::summary)
            .collect();
        Ok(AlertsReport { critical_products })
    }

    /// Movement history constrained by the requested window
    pub async fn get_movement_history(
        &self,
        organization_id: Uuid,
        filter: MovementFilter,
        limit: i64,
        offset: i64,
    ) -> AppResult<MovementReport> {
        let filters = MovementReportFilters {
            start_date: filter.start_date,
            end_date: filter.end_date,
        };
        let movements = MovementService::new(self.db.clone())
            .filter_movements(organization_id, &filter, limit, offset)
            .await?;
        Ok(MovementReport { filters, movements })
    }

    /// All non-deleted products for an organization, ordered by name
    async fn active_products(&self, organization_id: Uuid) -> AppResult<Vec<ProductSnapshot>> {
        let products = sqlx::query_as::<_, ProductSnapshot>(
            r#"
            SELECT id, name, sku, price, cost_price, quantity, alert_level, lead_time_days
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL
            ORDER BY name ASC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::ProductSnapshot;

    /// Deterministic id whose byte value gives a stable sort order
    pub fn uuid_n(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    pub fn snapshot(id: Uuid, name: &str, price: &str, quantity: i32) -> ProductSnapshot {
        let price = Decimal::from_str(price).unwrap();
        ProductSnapshot {
            id,
            name: name.to_string(),
            sku: format!("SKU-{}", id.simple()),
            price,
            cost_price: price,
            quantity,
            alert_level: 0,
            lead_time_days: 0,
        }
    }
}
