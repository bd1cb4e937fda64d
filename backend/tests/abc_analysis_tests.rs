//! ABC classification tests
//!
//! Property-based and unit tests for Pareto classification:
//! - Cumulative percentages are non-decreasing and end at 100
//! - Class boundaries follow the 80/95 thresholds
//! - Zero total consumption value classifies everything as C

use proptest::prelude::*;

const CLASS_A_THRESHOLD: f64 = 80.0;
const CLASS_B_THRESHOLD: f64 = 95.0;

#[derive(Debug, Clone)]
struct ClassifiedItem {
    value: f64,
    percentage: f64,
    cumulative_percentage: f64,
    class: char,
}

/// Classify consumption values the way the report engine does: sort
/// descending, accumulate percentages, cut at the thresholds.
fn classify(mut values: Vec<f64>) -> Vec<ClassifiedItem> {
    values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    let total: f64 = values.iter().sum();

    let mut cumulative = 0.0;
    values
        .into_iter()
        .map(|value| {
            let percentage = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            cumulative += percentage;
            let class = if total <= 0.0 {
                'C'
            } else if cumulative <= CLASS_A_THRESHOLD {
                'A'
            } else if cumulative <= CLASS_B_THRESHOLD {
                'B'
            } else {
                'C'
            };
            ClassifiedItem {
                value,
                percentage,
                cumulative_percentage: cumulative,
                class,
            }
        })
        .collect()
}

fn value_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..10_000.0, 1..50)
}

proptest! {
    /// Cumulative percentage never decreases along the sorted list
    #[test]
    fn prop_cumulative_is_monotonic(values in value_strategy()) {
        let items = classify(values);
        for pair in items.windows(2) {
            prop_assert!(pair[1].cumulative_percentage >= pair[0].cumulative_percentage - 1e-9);
        }
    }

    /// Individual percentages sum to roughly 100 when anything was consumed
    #[test]
    fn prop_percentages_sum_to_hundred(values in value_strategy()) {
        let total: f64 = values.iter().sum();
        prop_assume!(total > 1.0);
        let items = classify(values);
        let sum: f64 = items.iter().map(|i| i.percentage).sum();
        prop_assert!((sum - 100.0).abs() < 1e-6);
    }

    /// Classes appear in A, B, C order along the sorted list
    #[test]
    fn prop_classes_are_ordered(values in value_strategy()) {
        let items = classify(values);
        let ranks: Vec<u8> = items
            .iter()
            .map(|i| match i.class {
                'A' => 0,
                'B' => 1,
                _ => 2,
            })
            .collect();
        for pair in ranks.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
    }

    /// Values stay sorted descending after classification
    #[test]
    fn prop_values_sorted_descending(values in value_strategy()) {
        let items = classify(values);
        for pair in items.windows(2) {
            prop_assert!(pair[0].value >= pair[1].value);
        }
    }
}

#[test]
fn test_pareto_distribution() {
    // One dominant product, one mid, one slow: cumulative 70/95/100
    let items = classify(vec![700.0, 250.0, 50.0]);

    assert_eq!(items[0].class, 'A');
    assert_eq!(items[1].class, 'B');
    assert_eq!(items[2].class, 'C');
    assert!((items[0].cumulative_percentage - 70.0).abs() < 1e-9);
}

#[test]
fn test_dominant_product_pushes_rest_to_c() {
    // The runner-up lands past the 95% ceiling and drops straight to C
    let items = classify(vec![1000.0, 250.0, 10.0]);

    assert_eq!(items[0].class, 'A');
    assert_eq!(items[1].class, 'C');
    assert_eq!(items[2].class, 'C');
}

#[test]
fn test_zero_consumption_all_class_c() {
    let items = classify(vec![0.0, 0.0, 0.0]);

    for item in &items {
        assert_eq!(item.class, 'C');
        assert_eq!(item.percentage, 0.0);
    }
}

#[test]
fn test_single_product_carries_full_cumulative() {
    // A lone product accounts for 100% of value, which is past both
    // thresholds
    let items = classify(vec![500.0]);
    assert_eq!(items[0].cumulative_percentage, 100.0);
    assert_eq!(items[0].class, 'C');
}

#[test]
fn test_boundary_exactly_at_threshold() {
    // 80/15/5 split: first lands exactly on the A ceiling
    let items = classify(vec![80.0, 15.0, 5.0]);
    assert_eq!(items[0].class, 'A');
    assert_eq!(items[1].class, 'B');
    assert_eq!(items[2].class, 'C');
}
