//! Pure pricing computation
//!
//! Side-effect-free functions the presentation layer can call for live
//! display, and the cart calls to refresh derived fields. Each monetary
//! result is rounded to retail precision (two decimal places, half-up)
//! exactly once, at the end of its own formula; everything feeding into a
//! formula keeps full precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::cart::{Cart, CartItem, Discount};
use crate::payment::SettlementStatus;

/// Monetary breakdown of a single line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    /// unit price x quantity, before discount
    pub subtotal: Money,
    /// Discount taken off this line
    pub discount: Money,
    /// Subtotal after discount, the tax base
    pub taxable: Money,
    /// Tax on the taxable amount
    pub tax: Money,
    /// taxable + tax
    pub total: Money,
}

/// Computes a line's totals
///
/// `subtotal = unit_price * quantity`;
/// `discount = percent mode ? subtotal * percent / 100 : amount`;
/// `taxable = subtotal - discount`;
/// `tax = taxable * tax_rate / 100`;
/// `total = taxable + tax`.
pub fn line_totals(item: &CartItem) -> LineTotals {
    let currency = item.unit_price.currency();

    let raw_subtotal = item.unit_price.multiply(Decimal::from(item.quantity));
    let subtotal = raw_subtotal.round_retail();

    let discount = match &item.discount {
        Discount::None => Money::zero(currency),
        Discount::Percent(rate) => rate.apply(&raw_subtotal).round_retail(),
        Discount::Amount(amount) => *amount,
    };

    let taxable = subtotal - discount;
    let tax = item.tax_rate.apply(&taxable).round_retail();
    let total = taxable + tax;

    LineTotals {
        subtotal,
        discount,
        taxable,
        tax,
        total,
    }
}

/// Derived totals for a whole cart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line subtotals, before any discount
    pub subtotal: Money,
    /// Line discounts plus the order-level discount
    pub discount_amount: Money,
    /// Sum of line taxes
    pub tax_amount: Money,
    /// subtotal - discount_amount + tax_amount
    pub total_amount: Money,
    /// Total tendered across all methods
    pub paid_amount: Money,
    /// total_amount - paid_amount; negative on overpayment, never clamped
    pub due_amount: Money,
    /// Settlement status derived from the amounts (hold overrides)
    pub status: SettlementStatus,
}

impl CartTotals {
    /// The overpaid excess, if any
    ///
    /// A negative due amount flags an anomaly rather than being clamped;
    /// this surfaces it as a positive excess for display.
    pub fn overpayment(&self) -> Option<Money> {
        if self.due_amount.is_negative() {
            Some(self.due_amount.abs())
        } else {
            None
        }
    }
}

/// Computes a cart's aggregate totals
///
/// Line figures aggregate first; the order-level discount then applies to
/// the discounted pre-tax base at full precision, before the final
/// rounding of the reported discount and total.
pub fn cart_totals(cart: &Cart) -> CartTotals {
    let zero = Money::zero(cart.currency());

    let mut subtotal = zero;
    let mut line_discounts = zero;
    let mut tax_amount = zero;
    for item in cart.items() {
        let line = line_totals(item);
        subtotal += line.subtotal;
        line_discounts += line.discount;
        tax_amount += line.tax;
    }

    let order_discount = match cart.order_discount() {
        Discount::None => zero,
        Discount::Percent(rate) => rate.apply(&(subtotal - line_discounts)),
        Discount::Amount(amount) => *amount,
    };

    let discount_amount = (line_discounts + order_discount).round_retail();
    let total_amount = (subtotal - line_discounts - order_discount + tax_amount).round_retail();

    let paid_amount = cart.payments().total_paid();
    let due_amount = total_amount - paid_amount;
    let status = SettlementStatus::derive(paid_amount, total_amount, cart.is_on_hold());

    CartTotals {
        subtotal,
        discount_amount,
        tax_amount,
        total_amount,
        paid_amount,
        due_amount,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use core_kernel::{Currency, ProductId, Rate};
    use rust_decimal_macros::dec;

    fn cart_with(unit_price: Decimal, quantity: i64, tax_percent: Decimal) -> (Cart, Product) {
        let product = Product::new(
            ProductId::new(),
            "SKU-T",
            "Test Product",
            Money::new(unit_price, Currency::INR),
            Rate::from_percent(tax_percent),
        )
        .with_stock(1000);
        let mut cart = Cart::new(Currency::INR);
        cart.add_product(&product, quantity).unwrap();
        (cart, product)
    }

    #[test]
    fn test_reference_line_scenario() {
        // unit 100.00 x 2, 10% tax, 10% discount
        let (mut cart, product) = cart_with(dec!(100.00), 2, dec!(10));
        cart.set_line_discount(&product.id, Discount::Percent(Rate::from_percent(dec!(10))))
            .unwrap();

        let line = line_totals(&cart.items()[0]);
        assert_eq!(line.subtotal.amount(), dec!(200.00));
        assert_eq!(line.discount.amount(), dec!(20.00));
        assert_eq!(line.taxable.amount(), dec!(180.00));
        assert_eq!(line.tax.amount(), dec!(18.00));
        assert_eq!(line.total.amount(), dec!(198.00));
    }

    #[test]
    fn test_rounding_happens_once_per_formula() {
        // 3 x 33.33 at 8.25% tax:
        // subtotal 99.99, tax raw 8.249175 -> 8.25
        let (cart, _) = cart_with(dec!(33.33), 3, dec!(8.25));
        let line = line_totals(&cart.items()[0]);

        assert_eq!(line.subtotal.amount(), dec!(99.99));
        assert_eq!(line.tax.amount(), dec!(8.25));
        assert_eq!(line.total.amount(), dec!(108.24));
    }

    #[test]
    fn test_half_up_at_exact_midpoint() {
        // 1 x 0.05 at 10% tax: tax raw 0.005 rounds up to 0.01
        let (cart, _) = cart_with(dec!(0.05), 1, dec!(10));
        let line = line_totals(&cart.items()[0]);

        assert_eq!(line.tax.amount(), dec!(0.01));
        assert_eq!(line.total.amount(), dec!(0.06));
    }

    #[test]
    fn test_zero_tax_rate() {
        let (cart, _) = cart_with(dec!(40.00), 2, dec!(0));
        let line = line_totals(&cart.items()[0]);

        assert!(line.tax.is_zero());
        assert_eq!(line.total.amount(), dec!(80.00));
    }

    #[test]
    fn test_cart_identity_holds() {
        let (mut cart, product) = cart_with(dec!(100.00), 2, dec!(10));
        cart.set_line_discount(&product.id, Discount::Percent(Rate::from_percent(dec!(10))))
            .unwrap();

        let totals = cart.totals();
        let identity = totals.subtotal - totals.discount_amount + totals.tax_amount;
        assert_eq!(identity, totals.total_amount);
    }

    #[test]
    fn test_order_discount_applies_after_line_aggregation() {
        // Two lines, 100.00 each, no tax; 10% order discount on the 200.00 base.
        let (mut cart, _) = cart_with(dec!(100.00), 1, dec!(0));
        let second = Product::new(
            ProductId::new(),
            "SKU-U",
            "Other Product",
            Money::new(dec!(100.00), Currency::INR),
            Rate::zero(),
        )
        .with_stock(10);
        cart.add_product(&second, 1).unwrap();

        cart.set_order_discount(Discount::Percent(Rate::from_percent(dec!(10))))
            .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.subtotal.amount(), dec!(200.00));
        assert_eq!(totals.discount_amount.amount(), dec!(20.00));
        assert_eq!(totals.total_amount.amount(), dec!(180.00));
    }

    #[test]
    fn test_totals_are_idempotent() {
        let (mut cart, product) = cart_with(dec!(33.33), 3, dec!(8.25));
        cart.set_line_discount(&product.id, Discount::Percent(Rate::from_percent(dec!(7.5))))
            .unwrap();

        let first = cart.totals();
        let second = cart.totals();
        assert_eq!(first, second);
    }

    #[test]
    fn test_due_goes_negative_on_overpayment() {
        use crate::payment::PaymentMethod;

        let (mut cart, _) = cart_with(dec!(100.00), 1, dec!(0));
        cart.record_payment(
            PaymentMethod::Cash,
            Money::new(dec!(150.00), Currency::INR),
        )
        .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.due_amount.amount(), dec!(-50.00));
        assert_eq!(
            totals.overpayment().map(|m| m.amount()),
            Some(dec!(50.00))
        );
        assert_eq!(totals.status, SettlementStatus::Paid);
    }
}
