//! Property-based test generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Currency, Money, Rate};
use domain_sales::Discount;

/// Strategy for generating supported currencies
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::AED),
        Just(Currency::SGD),
        Just(Currency::JPY),
    ]
}

/// Strategy for positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for positive INR Money values
pub fn inr_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for positive Money in any supported currency
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(minor, currency)| Money::from_minor(minor, currency))
}

/// Strategy for sellable quantities
pub fn quantity_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000i64
}

/// Strategy for percentages in [0, 100] with two decimal places
pub fn percent_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|basis_points| Decimal::new(basis_points as i64, 2))
}

/// Strategy for tax rates as [`Rate`] values
pub fn tax_rate_strategy() -> impl Strategy<Value = Rate> {
    percent_strategy().prop_map(Rate::from_percent)
}

/// Strategy for line discounts in either mode, or none
pub fn discount_strategy() -> impl Strategy<Value = Discount> {
    prop_oneof![
        Just(Discount::None),
        percent_strategy().prop_map(|p| Discount::Percent(Rate::from_percent(p))),
    ]
}
