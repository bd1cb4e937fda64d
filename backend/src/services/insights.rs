//! Insight reports: profitability, period comparison, recommendations

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Insights service
#[derive(Clone)]
pub struct InsightsService {
    db: PgPool,
}

/// Per-product profitability row, sorted by total profit potential
#[derive(Debug, Clone, Serialize)]
pub struct ProfitabilityItem {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub margin_percent: f64,
    pub profit_per_unit: f64,
    pub total_profit_potential: f64,
    pub quantity: i32,
    pub price: f64,
    pub cost_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfitabilityReport {
    pub products: Vec<ProfitabilityItem>,
}

/// Exit totals for one period
#[derive(Debug, Clone, Serialize)]
pub struct PeriodTotals {
    pub movements: i64,
    pub quantity: i64,
}

/// Current versus previous period of equal length
#[derive(Debug, Clone, Serialize)]
pub struct PeriodComparison {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub change_percent: f64,
    pub trend: String,
}

/// A single actionable recommendation
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub action: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsReport {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProfitabilityRow {
    id: Uuid,
    name: String,
    sku: String,
    margin_percent: f64,
    profit_per_unit: f64,
    total_profit_potential: f64,
    quantity: i32,
    price: f64,
    cost_price: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct PeriodTotalsRow {
    movements: i64,
    quantity: i64,
}

impl InsightsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Margin and profit potential per priced product, best first
    pub async fn get_profitability_report(
        &self,
        organization_id: Uuid,
    ) -> AppResult<ProfitabilityReport> {
        let rows = sqlx::query_as::<_, ProfitabilityRow>(
            r#"
            SELECT id, name, sku,
                   ((price - cost_price) / price * 100)::float8 AS margin_percent,
                   (price - cost_price)::float8 AS profit_per_unit,
                   ((price - cost_price) * quantity)::float8 AS total_profit_potential,
                   quantity,
                   price::float8 AS price,
                   cost_price::float8 AS cost_price
            FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL AND price > 0
            ORDER BY (price - cost_price) * quantity DESC
            "#,
        )
        .bind(organization_id)
        .fetch_all(&self.db)
        .await?;

        let products = rows
            .into_iter()
            .map(|r| ProfitabilityItem {
                id: r.id,
                name: r.name,
                sku: r.sku,
                margin_percent: (r.margin_percent * 100.0).round() / 100.0,
                profit_per_unit: r.profit_per_unit,
                total_profit_potential: r.total_profit_potential,
                quantity: r.quantity,
                price: r.price,
                cost_price: r.cost_price,
            })
            .collect();

        Ok(ProfitabilityReport { products })
    }

    /// Compare exit volume of the last `days` days against the `days`
    /// days before that
    ///
    /// Changes within 5 percent either way count as stable. A previous
    /// period with no exits reports 100 percent growth when the current
    /// period has any, 0 otherwise.
    pub async fn compare_periods(
        &self,
        organization_id: Uuid,
        days: i64,
    ) -> AppResult<PeriodComparison> {
        let days = days.max(1);
        let now = Utc::now();
        let current_start = now - Duration::days(days);
        let previous_start = current_start - Duration::days(days);

        let current = self
            .exit_totals(organization_id, current_start, None)
            .await?;
        let previous = self
            .exit_totals(organization_id, previous_start, Some(current_start))
            .await?;

        let change_percent = if previous.quantity > 0 {
            let change = (current.quantity - previous.quantity) as f64
                / previous.quantity as f64
                * 100.0;
            (change * 100.0).round() / 100.0
        } else if current.quantity > 0 {
            100.0
        } else {
            0.0
        };

        let trend = if change_percent.abs() < 5.0 {
            "stable"
        } else if change_percent > 0.0 {
            "up"
        } else {
            "down"
        };

        Ok(PeriodComparison {
            current,
            previous,
            change_percent,
            trend: trend.to_string(),
        })
    }

    /// Rule-based recommendations from current stock and pricing
    pub async fn get_recommendations(
        &self,
        organization_id: Uuid,
    ) -> AppResult<RecommendationsReport> {
        let mut recommendations = Vec::new();

        let out_of_stock = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(id) FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL AND quantity = 0
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        if out_of_stock > 0 {
            recommendations.push(Recommendation {
                kind: "warning".to_string(),
                title: "Out of Stock".to_string(),
                message: format!("{} product(s) have zero stock", out_of_stock),
                action: "restock".to_string(),
                priority: "high".to_string(),
            });
        }

        let low_margin = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(id) FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL AND price > 0
              AND (price - cost_price) / price < 0.10
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        if low_margin > 0 {
            recommendations.push(Recommendation {
                kind: "info".to_string(),
                title: "Low Margin".to_string(),
                message: format!("{} product(s) have a margin below 10%", low_margin),
                action: "review_pricing".to_string(),
                priority: "medium".to_string(),
            });
        }

        let low_stock = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(id) FROM products
            WHERE organization_id = $1 AND deleted_at IS NULL
              AND quantity > 0 AND quantity <= alert_level
            "#,
        )
        .bind(organization_id)
        .fetch_one(&self.db)
        .await?;

        if low_stock > 0 {
            recommendations.push(Recommendation {
                kind: "warning".to_string(),
                title: "Low Stock".to_string(),
                message: format!("{} product(s) are at or below their alert level", low_stock),
                action: "reorder".to_string(),
                priority: "high".to_string(),
            });
        }

        Ok(RecommendationsReport { recommendations })
    }

    async fn exit_totals(
        &self,
        organization_id: Uuid,
        start: chrono::DateTime<Utc>,
        end: Option<chrono::DateTime<Utc>>,
    ) -> AppResult<PeriodTotals> {
        let row = sqlx::query_as::<_, PeriodTotalsRow>(
            r#"
            SELECT COUNT(id) AS movements,
                   COALESCE(SUM(quantity), 0)::bigint AS quantity
            FROM movements
            WHERE organization_id = $1 AND movement_type = 'exit'
              AND created_at >= $2
              AND ($3::timestamptz IS NULL OR created_at < $3)
            "#,
        )
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.db)
        .await?;

        Ok(PeriodTotals {
            movements: row.movements,
            quantity: row.quantity,
        })
    }
}
