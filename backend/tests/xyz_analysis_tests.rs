//! XYZ demand-variability tests
//!
//! The coefficient of variation (sample standard deviation over mean)
//! drives the X/Y/Z split. These tests pin down the statistical helper
//! and the classification boundaries.

use proptest::prelude::*;

const CLASS_X_THRESHOLD: f64 = 0.5;
const CLASS_Y_THRESHOLD: f64 = 1.0;

fn mean(demands: &[f64]) -> f64 {
    if demands.is_empty() {
        return 0.0;
    }
    demands.iter().sum::<f64>() / demands.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two points
fn sample_stdev(demands: &[f64]) -> f64 {
    if demands.len() < 2 {
        return 0.0;
    }
    let m = mean(demands);
    let variance =
        demands.iter().map(|d| (d - m).powi(2)).sum::<f64>() / (demands.len() - 1) as f64;
    variance.sqrt()
}

fn classify(demands: &[f64]) -> (f64, char) {
    let total: f64 = demands.iter().sum();
    if total <= 0.0 {
        return (0.0, 'Z');
    }
    let m = mean(demands);
    let cv = if m > 0.0 { sample_stdev(demands) / m } else { 0.0 };
    let class = if cv <= CLASS_X_THRESHOLD {
        'X'
    } else if cv <= CLASS_Y_THRESHOLD {
        'Y'
    } else {
        'Z'
    };
    (cv, class)
}

fn weekly_demand_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..500.0, 2..26)
}

proptest! {
    /// CV is scale invariant: doubling every week's demand keeps the class
    #[test]
    fn prop_cv_is_scale_invariant(demands in weekly_demand_strategy(), factor in 1.5f64..10.0) {
        let total: f64 = demands.iter().sum();
        prop_assume!(total > 1.0);
        let scaled: Vec<f64> = demands.iter().map(|d| d * factor).collect();

        let (cv_original, class_original) = classify(&demands);
        let (cv_scaled, class_scaled) = classify(&scaled);

        prop_assert!((cv_original - cv_scaled).abs() < 1e-9);
        prop_assert_eq!(class_original, class_scaled);
    }

    /// CV is never negative
    #[test]
    fn prop_cv_non_negative(demands in weekly_demand_strategy()) {
        let (cv, _) = classify(&demands);
        prop_assert!(cv >= 0.0);
    }

    /// Constant positive demand is always class X with CV 0
    #[test]
    fn prop_constant_demand_is_x(demand in 1.0f64..500.0, weeks in 2usize..26) {
        let demands = vec![demand; weeks];
        let (cv, class) = classify(&demands);
        prop_assert!(cv.abs() < 1e-9);
        prop_assert_eq!(class, 'X');
    }
}

#[test]
fn test_zero_demand_is_forced_z() {
    let (cv, class) = classify(&[0.0; 12]);
    assert_eq!(cv, 0.0);
    assert_eq!(class, 'Z');
}

#[test]
fn test_single_spike_is_z() {
    // All demand in one week out of twelve
    let mut demands = vec![0.0; 12];
    demands[3] = 120.0;
    let (cv, class) = classify(&demands);
    assert!(cv > CLASS_Y_THRESHOLD);
    assert_eq!(class, 'Z');
}

#[test]
fn test_moderate_variability_is_y() {
    // mean 10, sample stdev 10: CV lands exactly on the Y ceiling
    let (cv, class) = classify(&[20.0, 10.0, 0.0]);
    assert!((cv - 1.0).abs() < 1e-9);
    assert_eq!(class, 'Y');
}

#[test]
fn test_mild_variability_is_y() {
    // mean 10, sample stdev ~7.9, CV ~0.79
    let (cv, class) = classify(&[20.0, 5.0, 10.0, 15.0, 0.0]);
    assert!(cv > CLASS_X_THRESHOLD && cv <= CLASS_Y_THRESHOLD);
    assert_eq!(class, 'Y');
}

#[test]
fn test_zero_padding_raises_cv() {
    // The same sales observed over a longer horizon look less stable
    let short = [30.0, 30.0, 30.0];
    let padded = [30.0, 30.0, 30.0, 0.0, 0.0, 0.0];

    let (cv_short, _) = classify(&short);
    let (cv_padded, class_padded) = classify(&padded);

    assert!(cv_padded > cv_short);
    assert_eq!(class_padded, 'Z');
}

#[test]
fn test_stdev_of_singleton_is_zero() {
    assert_eq!(sample_stdev(&[42.0]), 0.0);
    assert_eq!(sample_stdev(&[]), 0.0);
}
