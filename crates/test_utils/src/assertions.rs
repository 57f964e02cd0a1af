//! Assertion helpers

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Money;

/// The tolerance shared with the ledger's balance check
pub const MONEY_TOLERANCE: Decimal = dec!(0.01);

/// Asserts two amounts agree within one minor unit
///
/// # Panics
///
/// Panics with both amounts in the message when they disagree.
pub fn assert_money_approx(actual: Money, expected: Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "currency mismatch: {} vs {}",
        actual,
        expected
    );
    let drift = (actual.amount() - expected.amount()).abs();
    assert!(
        drift <= MONEY_TOLERANCE,
        "amounts differ by {}: {} vs {}",
        drift,
        actual,
        expected
    );
}

/// Asserts an amount is exactly zero
pub fn assert_money_zero(actual: Money) {
    assert!(actual.is_zero(), "expected zero, got {}", actual);
}
