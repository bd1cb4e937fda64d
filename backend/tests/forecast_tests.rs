//! Stockout forecast tests
//!
//! Unit and property tests for daily usage, reorder point, and status
//! derivation.

use proptest::prelude::*;

const STOCKOUT_SENTINEL_DAYS: f64 = 999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy)]
struct Forecast {
    daily_usage: f64,
    days_until_stockout: f64,
    reorder_point: i64,
    status: Status,
}

fn forecast(quantity: i32, total_used: i64, duration_days: i64, lead_time_days: i32) -> Forecast {
    let duration = duration_days.max(1) as f64;
    let daily_usage = total_used as f64 / duration;

    let lead_time = lead_time_days as f64;
    let safety_stock = daily_usage * lead_time * 0.5;
    let reorder_point = (daily_usage * lead_time + safety_stock).floor() as i64;

    let days_until_stockout = if daily_usage > 0.0 {
        quantity as f64 / daily_usage
    } else {
        STOCKOUT_SENTINEL_DAYS
    };

    let status = if quantity == 0 {
        Status::Critical
    } else if (quantity as i64) <= reorder_point {
        Status::Warning
    } else {
        Status::Ok
    };

    Forecast {
        daily_usage,
        days_until_stockout,
        reorder_point,
        status,
    }
}

proptest! {
    /// Reorder point is never negative and scales with lead time
    #[test]
    fn prop_reorder_point_non_negative(
        total_used in 0i64..100_000,
        duration in 1i64..365,
        lead_time in 0i32..120,
    ) {
        let f = forecast(100, total_used, duration, lead_time);
        prop_assert!(f.reorder_point >= 0);
    }

    /// The reorder point is 1.5x the lead-time demand, floored
    #[test]
    fn prop_reorder_point_formula(
        total_used in 1i64..100_000,
        duration in 1i64..365,
        lead_time in 0i32..120,
    ) {
        let f = forecast(100, total_used, duration, lead_time);
        let expected = (f.daily_usage * lead_time as f64 * 1.5).floor() as i64;
        prop_assert_eq!(f.reorder_point, expected);
    }

    /// Zero quantity is always critical, whatever the usage history
    #[test]
    fn prop_zero_quantity_is_critical(
        total_used in 0i64..100_000,
        duration in 1i64..365,
        lead_time in 0i32..120,
    ) {
        let f = forecast(0, total_used, duration, lead_time);
        prop_assert_eq!(f.status, Status::Critical);
    }

    /// No consumption means the sentinel stockout horizon and no reorder
    #[test]
    fn prop_no_usage_gets_sentinel(quantity in 1i32..10_000, duration in 1i64..365) {
        let f = forecast(quantity, 0, duration, 14);
        prop_assert_eq!(f.days_until_stockout, STOCKOUT_SENTINEL_DAYS);
        prop_assert_eq!(f.reorder_point, 0);
        prop_assert_eq!(f.status, Status::Ok);
    }
}

#[test]
fn test_reorder_scenario() {
    // 150 units over 30 days: daily usage 5. Lead time 10 gives safety
    // stock 25 and reorder point 75; 60 on hand is below that.
    let f = forecast(60, 150, 30, 10);

    assert_eq!(f.daily_usage, 5.0);
    assert_eq!(f.reorder_point, 75);
    assert_eq!(f.status, Status::Warning);
    assert_eq!(f.days_until_stockout, 12.0);
}

#[test]
fn test_healthy_stock_is_ok() {
    let f = forecast(500, 150, 30, 10);
    assert_eq!(f.status, Status::Ok);
}

#[test]
fn test_duration_floors_at_one_day() {
    let f = forecast(10, 4, 0, 0);
    assert_eq!(f.daily_usage, 4.0);
}
