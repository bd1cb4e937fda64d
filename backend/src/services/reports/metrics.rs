//! Derived metric engines: turnover, financial totals, stockout forecast
//!
//! Like the classification engines these are pure functions over product
//! snapshots and aggregation maps. Every division is zero-guarded; none of
//! them can fail for well-typed input.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use shared::models::{FinancialReport, ForecastItem, ForecastStatus, TurnoverItem};

use super::ProductSnapshot;

/// Sentinel for "no consumption signal, effectively never runs out"
pub const STOCKOUT_SENTINEL_DAYS: f64 = 999.0;

/// Stock turnover per product: in-window exits over current quantity
///
/// Current quantity stands in for time-averaged inventory; a product with
/// zero stock gets a rate of 0 rather than a division error.
pub fn turnover_items(
    products: &[ProductSnapshot],
    exit_totals: &HashMap<Uuid, i64>,
) -> Vec<TurnoverItem> {
    products
        .iter()
        .map(|product| {
            let total_sales = exit_totals.get(&product.id).copied().unwrap_or(0);
            let avg_inventory = product.quantity as f64;
            let turnover_rate = if avg_inventory > 0.0 {
                total_sales as f64 / avg_inventory
            } else {
                0.0
            };

            TurnoverItem {
                product_id: product.id,
                product_name: product.name.clone(),
                turnover_rate,
                avg_inventory,
                total_sales,
            }
        })
        .collect()
}

/// Snapshot financial totals over all active products
pub fn financial_summary(products: &[ProductSnapshot]) -> FinancialReport {
    let mut total_inventory_value = 0.0;
    let mut total_cost_value = 0.0;

    for product in products {
        let quantity = product.quantity as f64;
        total_inventory_value += quantity * product.price.to_f64().unwrap_or(0.0);
        total_cost_value += quantity * product.cost_price.to_f64().unwrap_or(0.0);
    }

    let potential_profit = total_inventory_value - total_cost_value;
    let average_margin = if total_inventory_value > 0.0 {
        potential_profit / total_inventory_value * 100.0
    } else {
        0.0
    };

    FinancialReport {
        total_inventory_value,
        total_cost_value,
        potential_profit,
        average_margin,
    }
}

/// Stockout forecast per product
///
/// Reorder point = daily usage * lead time + safety stock, where safety
/// stock is half the lead-time demand. Status is a total function of
/// quantity versus reorder point; no hysteresis.
pub fn forecast_items(
    products: &[ProductSnapshot],
    exit_totals: &HashMap<Uuid, i64>,
    duration_days: i64,
) -> Vec<ForecastItem> {
    let duration_days = duration_days.max(1) as f64;

    products
        .iter()
        .map(|product| {
            let total_used = exit_totals.get(&product.id).copied().unwrap_or(0);
            let daily_usage = total_used as f64 / duration_days;

            let lead_time = product.lead_time_days as f64;
            let safety_stock = daily_usage * lead_time * 0.5;
            let reorder_point = (daily_usage * lead_time + safety_stock).floor() as i64;

            let days_until_stockout = if daily_usage > 0.0 {
                product.quantity as f64 / daily_usage
            } else {
                STOCKOUT_SENTINEL_DAYS
            };

            let status = if product.quantity == 0 {
                ForecastStatus::Critical
            } else if (product.quantity as i64) <= reorder_point {
                ForecastStatus::Warning
            } else {
                ForecastStatus::Ok
            };

            ForecastItem {
                product_id: product.id,
                product_name: product.name.clone(),
                daily_usage,
                days_until_stockout,
                reorder_point,
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reports::test_support::{snapshot, uuid_n};

    #[test]
    fn test_turnover_zero_quantity_guard() {
        let products = vec![snapshot(uuid_n(1), "Empty shelf", "10.00", 0)];
        let exits = HashMap::from([(uuid_n(1), 25)]);

        let items = turnover_items(&products, &exits);

        assert_eq!(items[0].turnover_rate, 0.0);
        assert_eq!(items[0].total_sales, 25);
    }

    #[test]
    fn test_turnover_rate() {
        let products = vec![snapshot(uuid_n(1), "Mover", "10.00", 50)];
        let exits = HashMap::from([(uuid_n(1), 100)]);

        let items = turnover_items(&products, &exits);

        assert_eq!(items[0].turnover_rate, 2.0);
        assert_eq!(items[0].avg_inventory, 50.0);
    }

    #[test]
    fn test_financial_summary() {
        let mut cheap = snapshot(uuid_n(1), "Cheap", "10.00", 10);
        cheap.cost_price = "6.00".parse().unwrap();
        let mut dear = snapshot(uuid_n(2), "Dear", "100.00", 2);
        dear.cost_price = "70.00".parse().unwrap();

        let report = financial_summary(&[cheap, dear]);

        assert_eq!(report.total_inventory_value, 300.0);
        assert_eq!(report.total_cost_value, 200.0);
        assert_eq!(report.potential_profit, 100.0);
        assert!((report.average_margin - 33.3333).abs() < 0.001);
    }

    #[test]
    fn test_financial_zero_inventory_has_no_division_error() {
        let products = vec![
            snapshot(uuid_n(1), "Out", "10.00", 0),
            snapshot(uuid_n(2), "Also out", "5.00", 0),
        ];

        let report = financial_summary(&products);

        assert_eq!(report.total_inventory_value, 0.0);
        assert_eq!(report.average_margin, 0.0);
    }

    #[test]
    fn test_forecast_reorder_scenario() {
        // daily usage 5, lead time 10: safety stock 25, reorder point 75
        let mut product = snapshot(uuid_n(1), "Widget", "10.00", 60);
        product.lead_time_days = 10;
        let exits = HashMap::from([(uuid_n(1), 150)]);

        let items = forecast_items(&[product], &exits, 30);

        assert_eq!(items[0].daily_usage, 5.0);
        assert_eq!(items[0].reorder_point, 75);
        assert_eq!(items[0].status, ForecastStatus::Warning);
        assert_eq!(items[0].days_until_stockout, 12.0);
    }

    #[test]
    fn test_forecast_zero_quantity_is_critical() {
        let mut product = snapshot(uuid_n(1), "Gone", "10.00", 0);
        product.lead_time_days = 10;
        let exits = HashMap::from([(uuid_n(1), 150)]);

        let items = forecast_items(&[product], &exits, 30);

        assert_eq!(items[0].status, ForecastStatus::Critical);
    }

    #[test]
    fn test_forecast_no_usage_sentinel() {
        let product = snapshot(uuid_n(1), "Sleeper", "10.00", 40);

        let items = forecast_items(&[product], &HashMap::new(), 30);

        assert_eq!(items[0].daily_usage, 0.0);
        assert_eq!(items[0].days_until_stockout, STOCKOUT_SENTINEL_DAYS);
        assert_eq!(items[0].reorder_point, 0);
        assert_eq!(items[0].status, ForecastStatus::Ok);
    }

    #[test]
    fn test_forecast_duration_floors_at_one_day() {
        let product = snapshot(uuid_n(1), "Fresh window", "10.00", 10);
        let exits = HashMap::from([(uuid_n(1), 4)]);

        let items = forecast_items(&[product], &exits, 0);

        assert_eq!(items[0].daily_usage, 4.0);
    }
}
