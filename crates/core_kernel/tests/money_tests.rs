//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic, retail rounding,
//! currency handling, and edge cases.

use core_kernel::{Currency, Money, MoneyError, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_creates_money_with_correct_amount() {
        let m = Money::new(dec!(100.50), Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_new_does_not_round() {
        let m = Money::new(dec!(100.123456789), Currency::INR);
        assert_eq!(m.amount(), dec!(100.123456789));
    }

    #[test]
    fn test_from_minor_converts_paise_correctly() {
        let m = Money::from_minor(10050, Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_from_minor_handles_jpy_no_decimals() {
        let m = Money::from_minor(10000, Currency::JPY);
        assert_eq!(m.amount(), dec!(10000));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_retail_rounds_half_up() {
        assert_eq!(
            Money::new(dec!(0.005), Currency::INR).round_retail().amount(),
            dec!(0.01)
        );
        assert_eq!(
            Money::new(dec!(0.015), Currency::INR).round_retail().amount(),
            dec!(0.02)
        );
        assert_eq!(
            Money::new(dec!(0.025), Currency::INR).round_retail().amount(),
            dec!(0.03)
        );
    }

    #[test]
    fn test_round_retail_away_from_zero_for_negatives() {
        assert_eq!(
            Money::new(dec!(-0.005), Currency::INR).round_retail().amount(),
            dec!(-0.01)
        );
    }

    #[test]
    fn test_round_retail_is_idempotent() {
        let m = Money::new(dec!(198.004999), Currency::INR).round_retail();
        assert_eq!(m.round_retail(), m);
    }

    #[test]
    fn test_round_retail_leaves_exact_values_alone() {
        let m = Money::new(dec!(198.00), Currency::INR);
        assert_eq!(m.round_retail().amount(), dec!(198.00));
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::INR);
        let result = a.checked_add(&b).unwrap();
        assert_eq!(result.amount(), dec!(150.00));
    }

    #[test]
    fn test_checked_add_currency_mismatch() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::USD);
        let result = a.checked_add(&b);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(150.00), Currency::INR);
        let result = a.checked_sub(&b).unwrap();
        assert_eq!(result.amount(), dec!(-50.00));
        assert!(result.is_negative());
    }

    #[test]
    fn test_multiply_keeps_full_precision() {
        let m = Money::new(dec!(33.33), Currency::INR);
        let result = m.multiply(dec!(3));
        assert_eq!(result.amount(), dec!(99.99));

        let m = Money::new(dec!(10.00), Currency::INR);
        let result = m.multiply(dec!(0.0825));
        assert_eq!(result.amount(), dec!(0.825000));
    }

    #[test]
    fn test_divide_by_zero_is_an_error() {
        let m = Money::new(dec!(100.00), Currency::INR);
        assert_eq!(m.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_assign_operators() {
        let mut m = Money::zero(Currency::INR);
        m += Money::new(dec!(10.00), Currency::INR);
        m += Money::new(dec!(5.50), Currency::INR);
        m -= Money::new(dec!(0.50), Currency::INR);
        assert_eq!(m.amount(), dec!(15.00));
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_rate_round_trip() {
        let rate = Rate::from_percent(dec!(12.5));
        assert_eq!(rate.as_percent(), dec!(12.5));
        assert_eq!(rate.as_decimal(), dec!(0.125));
    }

    #[test]
    fn test_rate_apply_then_round() {
        // 18% GST on 999.00 = 179.82
        let rate = Rate::from_percent(dec!(18));
        let tax = rate
            .apply(&Money::new(dec!(999.00), Currency::INR))
            .round_retail();
        assert_eq!(tax.amount(), dec!(179.82));
    }

    #[test]
    fn test_zero_rate() {
        let rate = Rate::zero();
        assert!(rate.is_zero());
        assert!(rate.apply(&Money::new(dec!(500), Currency::INR)).is_zero());
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_money_serde_round_trip() {
        let m = Money::new(dec!(198.00), Currency::INR);
        let json = serde_json::to_string(&m).unwrap();
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::INR).unwrap();
        assert_eq!(json, "\"INR\"");
    }
}
