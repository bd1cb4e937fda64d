//! Stock ledger invariant tests
//!
//! The product quantity must always equal the running sum of applied
//! movements, and the insufficient-stock guard must keep it from going
//! negative no matter the order of requests.

use proptest::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Entry,
    Exit,
}

/// Apply a movement the way the service does: entries always succeed,
/// exits are refused when they would overdraw the stock.
fn apply(quantity: i32, direction: Direction, amount: i32) -> Result<i32, String> {
    match direction {
        Direction::Entry => Ok(quantity + amount),
        Direction::Exit => {
            if quantity < amount {
                Err(format!(
                    "Requested {} units but only {} in stock",
                    amount, quantity
                ))
            } else {
                Ok(quantity - amount)
            }
        }
    }
}

fn movement_strategy() -> impl Strategy<Value = Vec<(Direction, i32)>> {
    prop::collection::vec(
        (
            prop_oneof![Just(Direction::Entry), Just(Direction::Exit)],
            1i32..500,
        ),
        0..100,
    )
}

proptest! {
    /// Quantity never goes negative regardless of the request sequence
    #[test]
    fn prop_quantity_never_negative(movements in movement_strategy()) {
        let mut quantity = 0;
        for (direction, amount) in movements {
            if let Ok(next) = apply(quantity, direction, amount) {
                quantity = next;
            }
            prop_assert!(quantity >= 0);
        }
    }

    /// Quantity equals the sum of the applied ledger
    #[test]
    fn prop_quantity_is_ledger_sum(movements in movement_strategy()) {
        let mut quantity = 0;
        let mut applied: Vec<(Direction, i32)> = Vec::new();

        for (direction, amount) in movements {
            if let Ok(next) = apply(quantity, direction, amount) {
                quantity = next;
                applied.push((direction, amount));
            }
        }

        let ledger_sum: i32 = applied
            .iter()
            .map(|(d, a)| match d {
                Direction::Entry => *a,
                Direction::Exit => -*a,
            })
            .sum();
        prop_assert_eq!(quantity, ledger_sum);
    }

    /// A refused exit leaves the quantity untouched
    #[test]
    fn prop_refused_exit_changes_nothing(quantity in 0i32..100, amount in 1i32..500) {
        prop_assume!(amount > quantity);
        let result = apply(quantity, Direction::Exit, amount);
        prop_assert!(result.is_err());
    }
}

#[test]
fn test_exact_drain_to_zero() {
    let quantity = apply(25, Direction::Exit, 25).unwrap();
    assert_eq!(quantity, 0);
}

#[test]
fn test_overdraw_is_refused_with_context() {
    let err = apply(10, Direction::Exit, 11).unwrap_err();
    assert!(err.contains("11"));
    assert!(err.contains("10"));
}

#[test]
fn test_entry_after_drain() {
    let mut quantity = apply(5, Direction::Exit, 5).unwrap();
    quantity = apply(quantity, Direction::Entry, 40).unwrap();
    assert_eq!(quantity, 40);
}
