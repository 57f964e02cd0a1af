//! The cart aggregate
//!
//! A cart is an ordered collection of line items plus payment state. All
//! mutators validate before touching anything, so an error never leaves
//! the cart partially changed. Derived monetary fields on a line
//! (tax amount, line total) are recomputed by the pricing module on every
//! mutation and are never set directly by a caller.

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CartId, Currency, Money, ProductId, Rate};

use crate::customer::Customer;
use crate::error::SalesError;
use crate::payment::{PaymentMethod, PaymentSplit};
use crate::pricing::{self, CartTotals, LineTotals};
use crate::product::Product;

/// A discount in one of two mutually exclusive modes
///
/// Exactly one mode is authoritative per line (or per order); setting one
/// replaces the other entirely, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// No discount
    #[default]
    None,
    /// Percentage of the subtotal, in [0, 100]
    Percent(Rate),
    /// Fixed amount, at most the subtotal it applies to
    Amount(Money),
}

impl Discount {
    /// Returns true when no discount is set
    pub fn is_none(&self) -> bool {
        matches!(self, Discount::None)
    }
}

/// One product line in a cart
///
/// The unit price and tax rate are copied from the product at add time,
/// so later product edits do not retroactively change existing lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to
    pub product_id: ProductId,
    /// SKU at add time
    pub sku: String,
    /// Display name at add time
    pub name: String,
    /// Unit price at add time
    pub unit_price: Money,
    /// Quantity, always positive (zero removes the line)
    pub quantity: i64,
    /// Line discount, one authoritative mode
    pub discount: Discount,
    /// Tax rate at add time
    pub tax_rate: Rate,
    /// Derived: tax for this line
    pub tax_amount: Money,
    /// Derived: line total after discount and tax
    pub total: Money,
}

impl CartItem {
    fn from_product(product: &Product, quantity: i64) -> Self {
        let zero = Money::zero(product.unit_price.currency());
        let mut item = Self {
            product_id: product.id,
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity,
            discount: Discount::None,
            tax_rate: product.tax_rate,
            tax_amount: zero,
            total: zero,
        };
        item.refresh();
        item
    }

    /// Computes this line's full monetary breakdown
    pub fn totals(&self) -> LineTotals {
        pricing::line_totals(self)
    }

    /// Line subtotal before discount and tax
    pub fn subtotal(&self) -> Money {
        self.totals().subtotal
    }

    fn refresh(&mut self) {
        let totals = self.totals();
        self.tax_amount = totals.tax;
        self.total = totals.total;
    }
}

/// The live cart: ordered lines, optional customer, payments
///
/// Insertion order is meaningful for display only; totals are order
/// independent. A cart has a single mutator at a time and is not
/// thread-safe by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Unique identifier
    pub id: CartId,
    /// When this cart was started
    pub created_at: DateTime<Utc>,
    currency: Currency,
    items: Vec<CartItem>,
    customer: Option<Customer>,
    order_discount: Discount,
    payments: PaymentSplit,
    on_hold: bool,
}

impl Cart {
    /// Creates a new empty cart
    pub fn new(currency: Currency) -> Self {
        Self {
            id: CartId::new_v7(),
            created_at: Utc::now(),
            currency,
            items: Vec::new(),
            customer: None,
            order_discount: Discount::None,
            payments: PaymentSplit::new(currency),
            on_hold: false,
        }
    }

    /// Returns the cart currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Lines in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns true if the cart has no lines
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the line for a product, if present
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// The selected customer, if any
    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// The order-level discount
    pub fn order_discount(&self) -> &Discount {
        &self.order_discount
    }

    /// Amounts tendered so far
    pub fn payments(&self) -> &PaymentSplit {
        &self.payments
    }

    /// Returns true while the cart is parked as a held sale
    pub fn is_on_hold(&self) -> bool {
        self.on_hold
    }

    /// Adds a product to the cart, merging into an existing line
    ///
    /// If the product already has a line, the quantities merge rather than
    /// creating a duplicate line. The stock check runs against the merged
    /// quantity.
    ///
    /// # Errors
    ///
    /// [`SalesError::InvalidQuantity`] if `quantity <= 0`;
    /// [`SalesError::InsufficientStock`] if stock cannot cover the merged
    /// quantity. The cart is unchanged on error.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> Result<(), SalesError> {
        if quantity <= 0 {
            return Err(SalesError::InvalidQuantity { quantity });
        }

        let existing = self.item(&product.id).map(|i| i.quantity).unwrap_or(0);
        let merged = existing + quantity;
        if !product.available(merged) {
            return Err(SalesError::InsufficientStock {
                sku: product.sku.clone(),
                requested: merged,
                available: product.stock_quantity,
            });
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => {
                line.quantity = merged;
                line.refresh();
            }
            None => self.items.push(CartItem::from_product(product, quantity)),
        }
        Ok(())
    }

    /// Changes a line's quantity; zero removes the line
    ///
    /// # Errors
    ///
    /// [`SalesError::InvalidQuantity`] for negative quantities;
    /// [`SalesError::UnknownProduct`] if the product has no line;
    /// [`SalesError::InsufficientStock`] if stock cannot cover the new
    /// quantity; [`SalesError::InvalidDiscount`] if a fixed line discount
    /// would exceed the shrunken subtotal (adjust the discount first).
    pub fn update_quantity(&mut self, product: &Product, quantity: i64) -> Result<(), SalesError> {
        if quantity < 0 {
            return Err(SalesError::InvalidQuantity { quantity });
        }

        let position = self
            .items
            .iter()
            .position(|i| i.product_id == product.id)
            .ok_or_else(|| SalesError::UnknownProduct(product.id.to_string()))?;

        if quantity == 0 {
            self.items.remove(position);
            return Ok(());
        }

        if !product.available(quantity) {
            return Err(SalesError::InsufficientStock {
                sku: product.sku.clone(),
                requested: quantity,
                available: product.stock_quantity,
            });
        }

        let line = &self.items[position];
        let new_subtotal = line
            .unit_price
            .multiply(rust_decimal::Decimal::from(quantity))
            .round_retail();
        if let Discount::Amount(amount) = &line.discount {
            if *amount > new_subtotal {
                return Err(SalesError::invalid_discount(format!(
                    "fixed discount {} exceeds new line subtotal {}",
                    amount, new_subtotal
                )));
            }
        }

        let line = &mut self.items[position];
        line.quantity = quantity;
        line.refresh();
        Ok(())
    }

    /// Removes a line outright
    pub fn remove_line(&mut self, product_id: &ProductId) -> Result<(), SalesError> {
        let position = self
            .items
            .iter()
            .position(|i| &i.product_id == product_id)
            .ok_or_else(|| SalesError::UnknownProduct(product_id.to_string()))?;
        self.items.remove(position);
        Ok(())
    }

    /// Sets a line's discount, replacing whichever mode was set before
    ///
    /// # Errors
    ///
    /// [`SalesError::InvalidDiscount`] if the percent is outside [0, 100],
    /// the amount is negative or in the wrong currency, or the amount
    /// exceeds the line subtotal.
    pub fn set_line_discount(
        &mut self,
        product_id: &ProductId,
        discount: Discount,
    ) -> Result<(), SalesError> {
        let position = self
            .items
            .iter()
            .position(|i| &i.product_id == product_id)
            .ok_or_else(|| SalesError::UnknownProduct(product_id.to_string()))?;

        let subtotal = self.items[position].subtotal();
        validate_discount(&discount, subtotal, self.currency)?;

        let line = &mut self.items[position];
        line.discount = discount;
        line.refresh();
        Ok(())
    }

    /// Sets the order-level discount
    ///
    /// The order discount applies after line-level aggregation; its fixed
    /// amount is bounded by the cart's discounted pre-tax base.
    pub fn set_order_discount(&mut self, discount: Discount) -> Result<(), SalesError> {
        let base = self.items.iter().fold(
            Money::zero(self.currency),
            |acc, item| {
                let totals = item.totals();
                acc + totals.subtotal - totals.discount
            },
        );
        validate_discount(&discount, base, self.currency)?;
        self.order_discount = discount;
        Ok(())
    }

    /// Attaches or detaches a customer
    pub fn select_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    /// Records a payment toward the cart total
    ///
    /// # Errors
    ///
    /// [`SalesError::InvalidPayment`] if the amount is not positive.
    pub fn record_payment(
        &mut self,
        method: PaymentMethod,
        amount: Money,
    ) -> Result<(), SalesError> {
        if !amount.is_positive() {
            return Err(SalesError::InvalidPayment {
                amount: amount.amount(),
            });
        }
        self.payments.record(method, amount)?;
        Ok(())
    }

    /// Sets the external payment reference
    pub fn set_payment_reference(&mut self, reference: impl Into<String>) {
        self.payments.set_reference(reference);
    }

    /// Computes the cart's derived totals
    ///
    /// Pure: calling this twice without an intervening mutation yields
    /// identical results.
    pub fn totals(&self) -> CartTotals {
        pricing::cart_totals(self)
    }

    pub(crate) fn set_hold(&mut self, on_hold: bool) {
        self.on_hold = on_hold;
    }
}

fn validate_discount(
    discount: &Discount,
    subtotal: Money,
    currency: Currency,
) -> Result<(), SalesError> {
    match discount {
        Discount::None => Ok(()),
        Discount::Percent(rate) => {
            let percent = rate.as_percent();
            if percent < dec!(0) || percent > dec!(100) {
                return Err(SalesError::invalid_discount(format!(
                    "percent {} outside [0, 100]",
                    percent
                )));
            }
            Ok(())
        }
        Discount::Amount(amount) => {
            if amount.currency() != currency {
                return Err(SalesError::invalid_discount(format!(
                    "amount is denominated in {}, cart uses {}",
                    amount.currency(),
                    currency
                )));
            }
            if amount.is_negative() {
                return Err(SalesError::invalid_discount(format!(
                    "amount {} is negative",
                    amount
                )));
            }
            if *amount > subtotal {
                return Err(SalesError::invalid_discount(format!(
                    "amount {} exceeds subtotal {}",
                    amount, subtotal
                )));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ProductId;
    use rust_decimal_macros::dec;

    fn chai() -> Product {
        Product::new(
            ProductId::new(),
            "SKU-CHAI",
            "Masala Chai",
            Money::new(dec!(40.00), Currency::INR),
            Rate::from_percent(dec!(5)),
        )
        .with_stock(10)
    }

    #[test]
    fn test_add_merges_lines_by_product() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai();

        cart.add_product(&product, 2).unwrap();
        cart.add_product(&product, 3).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai();

        assert!(matches!(
            cart.add_product(&product, 0),
            Err(SalesError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            cart.add_product(&product, -2),
            Err(SalesError::InvalidQuantity { quantity: -2 })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merged_quantity_checked_against_stock() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai(); // stock 10

        cart.add_product(&product, 6).unwrap();
        let result = cart.add_product(&product, 5);

        assert!(matches!(
            result,
            Err(SalesError::InsufficientStock {
                requested: 11,
                available: 10,
                ..
            })
        ));
        // Cart unchanged by the failed add.
        assert_eq!(cart.items()[0].quantity, 6);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai();

        cart.add_product(&product, 2).unwrap();
        cart.update_quantity(&product, 0).unwrap();

        assert!(cart.is_empty());
    }

    #[test]
    fn test_line_discount_modes_are_exclusive() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai();
        cart.add_product(&product, 2).unwrap();

        cart.set_line_discount(&product.id, Discount::Percent(Rate::from_percent(dec!(10))))
            .unwrap();
        cart.set_line_discount(
            &product.id,
            Discount::Amount(Money::new(dec!(5.00), Currency::INR)),
        )
        .unwrap();

        // The amount mode replaced the percent mode entirely.
        assert!(matches!(
            cart.item(&product.id).unwrap().discount,
            Discount::Amount(_)
        ));
        assert_eq!(cart.totals().discount_amount.amount(), dec!(5.00));
    }

    #[test]
    fn test_discount_bounds() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai();
        cart.add_product(&product, 2).unwrap(); // subtotal 80.00

        assert!(matches!(
            cart.set_line_discount(&product.id, Discount::Percent(Rate::from_percent(dec!(101)))),
            Err(SalesError::InvalidDiscount { .. })
        ));
        assert!(matches!(
            cart.set_line_discount(
                &product.id,
                Discount::Amount(Money::new(dec!(80.01), Currency::INR))
            ),
            Err(SalesError::InvalidDiscount { .. })
        ));
        assert!(cart
            .set_line_discount(
                &product.id,
                Discount::Amount(Money::new(dec!(80.00), Currency::INR))
            )
            .is_ok());
    }

    #[test]
    fn test_shrinking_quantity_below_fixed_discount_rejected() {
        let mut cart = Cart::new(Currency::INR);
        let product = chai();
        cart.add_product(&product, 2).unwrap(); // subtotal 80.00
        cart.set_line_discount(
            &product.id,
            Discount::Amount(Money::new(dec!(60.00), Currency::INR)),
        )
        .unwrap();

        // One unit would leave a 40.00 subtotal under a 60.00 discount.
        let result = cart.update_quantity(&product, 1);
        assert!(matches!(result, Err(SalesError::InvalidDiscount { .. })));
        assert_eq!(cart.item(&product.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_payment_must_be_positive() {
        let mut cart = Cart::new(Currency::INR);
        let result = cart.record_payment(
            PaymentMethod::Cash,
            Money::new(dec!(-10.00), Currency::INR),
        );
        assert!(matches!(result, Err(SalesError::InvalidPayment { .. })));

        let result = cart.record_payment(PaymentMethod::Cash, Money::zero(Currency::INR));
        assert!(matches!(result, Err(SalesError::InvalidPayment { .. })));
    }
}
