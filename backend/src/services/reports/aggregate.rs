//! Aggregation primitives over the movement ledger
//!
//! Pure reads, grouped by product, scoped to organization + movement type
//! + window. A product absent from a result map had no movement in-window;
//! callers default missing entries to zero.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use shared::types::MovementType;

use super::window::ReportWindow;

/// Grouped movement total for one product
#[derive(Debug, sqlx::FromRow)]
struct ProductQuantityRow {
    product_id: Uuid,
    total_quantity: i64,
}

/// Grouped movement total for one product in one ISO week
#[derive(Debug, sqlx::FromRow)]
struct WeeklyQuantityRow {
    product_id: Uuid,
    iso_year: i32,
    iso_week: i32,
    total_quantity: i64,
}

/// ISO year-week bucket key
pub type WeekKey = (i32, i32);

/// Sum movement quantity per product within a window
pub async fn sum_quantity_by_product(
    db: &PgPool,
    organization_id: Uuid,
    movement_type: MovementType,
    window: &ReportWindow,
) -> AppResult<HashMap<Uuid, i64>> {
    let rows = sqlx::query_as::<_, ProductQuantityRow>(
        r#"
        SELECT product_id, SUM(quantity)::bigint AS total_quantity
        FROM movements
        WHERE organization_id = $1
          AND movement_type = $2
          AND created_at >= $3
          AND ($4::timestamptz IS NULL OR created_at <= $4)
        GROUP BY product_id
        "#,
    )
    .bind(organization_id)
    .bind(movement_type.as_str())
    .bind(window.start)
    .bind(window.end)
    .fetch_all(db)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.product_id, r.total_quantity))
        .collect())
}

/// Sum movement quantity per product and ISO week within a window
///
/// Used by the XYZ engine; weeks with no movements are simply absent and
/// are zero-padded by the caller.
pub async fn weekly_quantity_by_product(
    db: &PgPool,
    organization_id: Uuid,
    movement_type: MovementType,
    window: &ReportWindow,
) -> AppResult<HashMap<Uuid, HashMap<WeekKey, i64>>> {
    let rows = sqlx::query_as::<_, WeeklyQuantityRow>(
        r#"
        SELECT product_id,
               EXTRACT(ISOYEAR FROM created_at)::int AS iso_year,
               EXTRACT(WEEK FROM created_at)::int AS iso_week,
               SUM(quantity)::bigint AS total_quantity
        FROM movements
        WHERE organization_id = $1
          AND movement_type = $2
          AND created_at >= $3
          AND ($4::timestamptz IS NULL OR created_at <= $4)
        GROUP BY product_id, iso_year, iso_week
        "#,
    )
    .bind(organization_id)
    .bind(movement_type.as_str())
    .bind(window.start)
    .bind(window.end)
    .fetch_all(db)
    .await?;

    let mut buckets: HashMap<Uuid, HashMap<WeekKey, i64>> = HashMap::new();
    for row in rows {
        buckets
            .entry(row.product_id)
            .or_default()
            .insert((row.iso_year, row.iso_week), row.total_quantity);
    }
    Ok(buckets)
}
