//! Dashboard analytics service
//!
//! KPI cards and chart series for the dashboard. Unlike the reporting
//! engines these return presentation-shaped payloads (labels plus data
//! arrays) rather than per-product rows.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Total inventory value at cost
#[derive(Debug, Clone, Serialize)]
pub struct InventoryValue {
    pub total_value: f64,
    pub total_items: i64,
    pub total_quantity: i64,
}

/// Average margin across priced products
#[derive(Debug, Clone, Serialize)]
pub struct AverageMargin {
    pub average_margin_percent: f64,
    pub total_potential_profit: f64,
}

/// Share of products with zero stock
#[derive(Debug, Clone, Serialize)]
pub struct StockRuptureRate {
    pub rupture_rate_percent: f64,
    pub products_out_of_stock: i64,
    pub total_products: i64,
}

/// Daily outbound quantities, zero-filled for days without sales
#[derive(Debug, Clone, Serialize)]
pub struct SalesTrend {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
    pub total_movements: i64,
}

/// Top products by outbound quantity
#[derive(Debug, Clone, Serialize)]
pub struct TopProducts {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

#[derive(Debug, sqlx::FromRow)]
struct InventoryValueRow {
    total_value: f64,
    total_items: i64,
    total_quantity: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct MarginRow {
    margin_percent: f64,
    profit_potential: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct DailySalesRow {
    day: String,
    total_quantity: i64,
    movement_count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct TopProductRow {
    name: String,
    total_quantity: i64,
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Inventory value at cost across all active products
    pub async fn get_inventory_value(&self, organization_id: Uuid) -> AppResult<InventoryValue> {
        let row = sqlx::query_as::<_, InventoryValueRow>(
            r#"
            SELECT COALESCE(SUM(quantity * cost_price), 0)::float8 AS total_value,
                   COUNT(id) AS total_items,
                   COALESCE(SUM(quantity), 0)::bigint AS total_quantity
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        Ok(InventoryValue {
            total_value: row.total_value,
            total_items: row.total_items,
            total_quantity: row.total_quantity,
        })
    }

    /// Average margin percent over products with a positive price
    pub async fn get_average_margin(&self, organization_id: Uuid) -> AppResult<AverageMargin> {
        let rows = sqlx::query_as::<_, MarginRow>(
            r#"
            SELECT ((price - cost_price) / price * 100)::float8 AS margin_percent,
                   ((price - cost_price) * quantity)::float8 AS profit_potential
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL AND price > 0
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        if rows.is_empty() {
            return Ok(AverageMargin {
                average_margin_percent: 0.0,
                total_potential_profit: 0.0,
            });
        }

        let margin_sum: f64 = rows.iter().map(|r| r.margin_percent).sum();
        let total_potential_profit: f64 = rows.iter().map(|r| r.profit_potential).sum();
        let average_margin_percent = margin_sum / rows.len() as f64;

        Ok(AverageMargin {
            average_margin_percent: (average_margin_percent * 100.0).round() / 100.0,
            total_potential_profit,
        })
    }

    /// Percentage of active products with zero stock
    pub async fn get_stock_rupture_rate(
        &self,
        organization_id: Uuid,
    ) -> AppResult<StockRuptureRate> {
        let total_products = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(id) FROM products WHERE organization_id = $1 AND deleted_at IS NULL",
        )
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        let products_out_of_stock = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(id) FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL AND quantity = 0
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        let rupture_rate_percent = if total_products > 0 {
            let rate = products_out_of_stock as f64 / total_products as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        Ok(StockRuptureRate {
            rupture_rate_percent,
            products_out_of_stock,
            total_products,
        })
    }

    /// Daily exit quantities for the last `days` days
    ///
    /// Days with no sales appear as explicit zeros so the chart axis stays
    /// continuous.
    pub async fn get_sales_trend(&self, organization_id: Uuid, days: i64) -> AppResult<SalesTrend> {
        let days = days.max(1);
        let now = Utc::now();
        let start = now - Duration::days(days);

        let rows = sqlx::query_as::<_, DailySalesRow>(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS day,
                   COALESCE(SUM(quantity), 0)::bigint AS total_quantity,
                   COUNT(id) AS movement_count
            FROM movements
            WHERE organization_id = $1 AND movement_type = 'exit' AND created_at >= $2
            GROUP BY TO_CHAR(created_at, 'YYYY-MM-DD')
            "#,
        )
        .bind(organization_id)
        .bind(start)
        .fetch_all(&self.db)
        .await?;

        let total_movements: i64 = rows.iter().map(|r| r.movement_count).sum();
        let daily: std::collections::HashMap<String, i64> = rows
            .into_iter()
            .map(|r| (r.day, r.total_quantity))
            .collect();

        let mut labels = Vec::new();
        let mut data = Vec::new();
        let mut current = start.date_naive();
        let end = now.date_naive();
        while current <= end {
            let key = current.format("%Y-%m-%d").to_string();
            data.push(daily.get(&key).copied().unwrap_or(0));
            labels.push(key);
            current += Duration::days(1);
        }

        Ok(SalesTrend {
            labels,
            data,
            total_movements,
        })
    }

    /// Top products by total exit quantity
    pub async fn get_top_products(
        &self,
        organization_id: Uuid,
        limit: i64,
    ) -> AppResult<TopProducts> {
        let rows = sqlx::query_as::<_, TopProductRow>(
            r#"
            SELECT p.name, COALESCE(SUM(m.quantity), 0)::bigint AS total_quantity
            FROM movements m
            JOIN products p ON p.id = m.product_id
            WHERE p.organization_id = $1 AND m.movement_type = 'exit'
            GROUP BY p.id, p.name
            ORDER BY SUM(m.quantity) DESC
            LIMIT $2
            "#,
        )
        .bind(organization_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        let (labels, data) = rows.into_iter().map(|r| (r.name, r.total_quantity)).unzip();
        Ok(TopProducts { labels, data })
    }
}
