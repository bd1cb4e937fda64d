//! XYZ analysis: demand-variability classification
//!
//! Classifies products by the coefficient of variation (sample standard
//! deviation over mean) of their weekly exit quantities. Weeks with no
//! movements count as zero demand, and a product with no demand at all is
//! forced into class Z: missing data is treated as riskier than stable
//! data, not safer.

use std::collections::HashMap;

use uuid::Uuid;

use shared::models::{XyzClass, XyzItem};

use crate::config::ReportConfig;

use super::aggregate::WeekKey;
use super::ProductSnapshot;

/// Classify products into X/Y/Z tiers by weekly demand variability
pub fn classify_xyz(
    products: &[ProductSnapshot],
    weekly_totals: &HashMap<Uuid, HashMap<WeekKey, i64>>,
    weeks_to_analyze: usize,
    config: &ReportConfig,
) -> Vec<XyzItem> {
    products
        .iter()
        .map(|product| {
            let mut demands: Vec<f64> = weekly_totals
                .get(&product.id)
                .map(|weeks| weeks.values().map(|&q| q as f64).collect())
                .unwrap_or_default();

            // Missing weeks are zero demand, not absent data
            while demands.len() < weeks_to_analyze {
                demands.push(0.0);
            }

            let total: f64 = demands.iter().sum();
            let (cv, classification) = if demands.is_empty() || total == 0.0 {
                // Dead stock: a literal CV of 0 would read as perfectly
                // stable, which is the wrong conclusion for zero demand.
                (0.0, XyzClass::Z)
            } else {
                let mean = total / demands.len() as f64;
                let stdev = sample_stdev(&demands);
                let cv = if mean > 0.0 { stdev / mean } else { 0.0 };

                let class = if cv <= config.xyz_class_x_threshold {
                    XyzClass::X
                } else if cv <= config.xyz_class_y_threshold {
                    XyzClass::Y
                } else {
                    XyzClass::Z
                };
                (cv, class)
            };

            XyzItem {
                product_id: product.id,
                product_name: product.name.clone(),
                cv,
                classification,
            }
        })
        .collect()
}

/// Sample standard deviation; 0 when fewer than two data points
fn sample_stdev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reports::test_support::{snapshot, uuid_n};

    fn config() -> ReportConfig {
        ReportConfig::default()
    }

    fn weekly(product_id: Uuid, demands: &[i64]) -> HashMap<Uuid, HashMap<WeekKey, i64>> {
        let weeks: HashMap<WeekKey, i64> = demands
            .iter()
            .enumerate()
            .map(|(i, &q)| ((2024, i as i32 + 1), q))
            .collect();
        HashMap::from([(product_id, weeks)])
    }

    #[test]
    fn test_dead_stock_is_forced_z() {
        // 12 analyzed weeks, zero exits in every one
        let products = vec![snapshot(uuid_n(1), "Dust collector", "10.00", 40)];

        let items = classify_xyz(&products, &HashMap::new(), 12, &config());

        assert_eq!(items[0].cv, 0.0);
        assert_eq!(items[0].classification, XyzClass::Z);
    }

    #[test]
    fn test_perfectly_stable_demand_is_x() {
        let products = vec![snapshot(uuid_n(1), "Steady seller", "10.00", 40)];
        let totals = weekly(uuid_n(1), &[10, 10, 10, 10]);

        let items = classify_xyz(&products, &totals, 4, &config());

        assert!(items[0].cv.abs() < 1e-9);
        assert_eq!(items[0].classification, XyzClass::X);
    }

    #[test]
    fn test_volatile_demand_is_z() {
        // One spike in an otherwise dead series pushes CV past 1.0
        let products = vec![snapshot(uuid_n(1), "Spiky", "10.00", 40)];
        let totals = weekly(uuid_n(1), &[0, 0, 0, 0, 0, 0, 0, 100]);

        let items = classify_xyz(&products, &totals, 8, &config());

        assert!(items[0].cv > 1.0);
        assert_eq!(items[0].classification, XyzClass::Z);
    }

    #[test]
    fn test_padding_to_analyzed_weeks_raises_cv() {
        // Same observed demand, but a longer window means more zero weeks
        // and therefore more variability.
        let products = vec![snapshot(uuid_n(1), "Sparse", "10.00", 40)];
        let totals = weekly(uuid_n(1), &[10, 10]);

        let short = classify_xyz(&products, &totals, 2, &config());
        let long = classify_xyz(&products, &totals, 12, &config());

        assert!(short[0].cv.abs() < 1e-9);
        assert!(long[0].cv > short[0].cv);
    }

    #[test]
    fn test_moderate_variability_is_y() {
        let products = vec![snapshot(uuid_n(1), "Wobbly", "10.00", 40)];
        // mean 10, sample stdev 10 => CV 1.0, the top of the Y band
        let totals = weekly(uuid_n(1), &[20, 10, 0]);

        let items = classify_xyz(&products, &totals, 3, &config());

        assert!(items[0].cv > 0.5 && items[0].cv <= 1.0);
        assert_eq!(items[0].classification, XyzClass::Y);
    }

    #[test]
    fn test_sample_stdev_singleton_is_zero() {
        assert_eq!(sample_stdev(&[42.0]), 0.0);
        assert_eq!(sample_stdev(&[]), 0.0);
    }
}
