//! ABC analysis: Pareto classification by consumption value
//!
//! Products are ranked by `exit quantity in window * unit price` and
//! classified by where their cumulative share of total value lands, not by
//! their own share. The engine is pure: it sees only product snapshots and
//! an aggregation map, never the database.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use shared::models::{AbcClass, AbcItem};

use crate::config::ReportConfig;

use super::ProductSnapshot;

/// Classify products into A/B/C tiers by cumulative consumption value
///
/// Products with no exits in-window participate with value 0 and end up in
/// class C. Ties are broken by ascending product id so the ordering, and
/// with it the classification, is deterministic.
pub fn classify_abc(
    products: &[ProductSnapshot],
    exit_totals: &HashMap<Uuid, i64>,
    config: &ReportConfig,
) -> Vec<AbcItem> {
    let mut ranked: Vec<(&ProductSnapshot, f64)> = products
        .iter()
        .map(|product| {
            let quantity = exit_totals.get(&product.id).copied().unwrap_or(0);
            let price = product.price.to_f64().unwrap_or(0.0);
            (product, quantity as f64 * price)
        })
        .collect();

    ranked.sort_by(|(pa, va), (pb, vb)| {
        vb.partial_cmp(va)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| pa.id.cmp(&pb.id))
    });

    let total_value: f64 = ranked.iter().map(|(_, value)| value).sum();

    let mut accumulated = 0.0;
    ranked
        .into_iter()
        .map(|(product, value)| {
            accumulated += value;
            let (percentage, cumulative_percentage) = if total_value > 0.0 {
                (
                    value / total_value * 100.0,
                    accumulated / total_value * 100.0,
                )
            } else {
                (0.0, 0.0)
            };

            // C unless total_value > 0: with no consumption value at all
            // there is nothing to rank, so nothing earns an A or B.
            let classification = if total_value <= 0.0 {
                AbcClass::C
            } else if cumulative_percentage <= config.abc_class_a_threshold {
                AbcClass::A
            } else if cumulative_percentage <= config.abc_class_b_threshold {
                AbcClass::B
            } else {
                AbcClass::C
            };

            AbcItem {
                product_id: product.id,
                product_name: product.name.clone(),
                value,
                percentage,
                cumulative_percentage,
                classification,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reports::test_support::{snapshot, uuid_n};

    fn config() -> ReportConfig {
        ReportConfig::default()
    }

    #[test]
    fn test_pareto_scenario() {
        // Exits {70, 50, 50} at prices {10, 5, 1}: values 700 / 250 / 50,
        // cumulative 70% / 95% / 100%
        let products = vec![
            snapshot(uuid_n(1), "P1", "10.00", 0),
            snapshot(uuid_n(2), "P2", "5.00", 0),
            snapshot(uuid_n(3), "P3", "1.00", 0),
        ];
        let exits = HashMap::from([(uuid_n(1), 70), (uuid_n(2), 50), (uuid_n(3), 50)]);

        let items = classify_abc(&products, &exits, &config());

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].value, 700.0);
        assert_eq!(items[0].classification, AbcClass::A);
        assert!((items[0].cumulative_percentage - 70.0).abs() < 1e-9);

        // Exactly on the B ceiling
        assert_eq!(items[1].classification, AbcClass::B);
        assert!((items[1].cumulative_percentage - 95.0).abs() < 1e-9);

        assert_eq!(items[2].classification, AbcClass::C);
        assert!((items[2].cumulative_percentage - 100.0).abs() < 1e-9);

        let percentage_sum: f64 = items.iter().map(|i| i.percentage).sum();
        assert!((percentage_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_products_yields_empty_report() {
        let items = classify_abc(&[], &HashMap::new(), &config());
        assert!(items.is_empty());
    }

    #[test]
    fn test_no_consumption_classifies_everything_c() {
        let products = vec![
            snapshot(uuid_n(1), "P1", "10.00", 5),
            snapshot(uuid_n(2), "P2", "5.00", 3),
        ];

        let items = classify_abc(&products, &HashMap::new(), &config());

        for item in &items {
            assert_eq!(item.value, 0.0);
            assert_eq!(item.percentage, 0.0);
            assert_eq!(item.classification, AbcClass::C);
        }
    }

    #[test]
    fn test_product_without_exits_is_still_included() {
        let products = vec![
            snapshot(uuid_n(1), "Moves", "10.00", 0),
            snapshot(uuid_n(2), "Dead stock", "99.00", 0),
        ];
        let exits = HashMap::from([(uuid_n(1), 20)]);

        let items = classify_abc(&products, &exits, &config());

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].product_id, uuid_n(2));
        assert_eq!(items[1].value, 0.0);
        assert_eq!(items[1].classification, AbcClass::C);
    }

    #[test]
    fn test_tie_break_is_ascending_product_id() {
        let products = vec![
            snapshot(uuid_n(9), "Later id", "1.00", 0),
            snapshot(uuid_n(1), "Earlier id", "1.00", 0),
        ];
        let exits = HashMap::from([(uuid_n(9), 50), (uuid_n(1), 50)]);

        let items = classify_abc(&products, &exits, &config());

        assert_eq!(items[0].product_id, uuid_n(1));
        assert_eq!(items[1].product_id, uuid_n(9));
    }

    #[test]
    fn test_cumulative_percentage_is_non_decreasing() {
        let products: Vec<_> = (1..=20)
            .map(|n| snapshot(uuid_n(n), &format!("P{n}"), "3.50", 0))
            .collect();
        let exits: HashMap<_, _> = (1..=20u64)
            .map(|n| (uuid_n(n as u8), (n * 7 % 13) as i64))
            .collect();

        let items = classify_abc(&products, &exits, &config());

        let mut previous = 0.0;
        for item in &items {
            assert!(item.cumulative_percentage >= previous);
            previous = item.cumulative_percentage;
        }
    }
}
