//! Pre-built test fixtures
//!
//! Ready-to-use test data for common entities across the retail core.
//! Fixtures are consistent and predictable for unit tests; anything that
//! needs variation goes through the builders instead.

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, ProductId, Rate};
use domain_ledger::{Ledger, RetailChartOfAccounts};
use domain_sales::{Cart, Discount, Product};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard INR amount
    pub fn inr_100() -> Money {
        Money::new(dec!(100.00), Currency::INR)
    }

    /// The reference cart total from the pricing scenario
    pub fn inr_198() -> Money {
        Money::new(dec!(198.00), Currency::INR)
    }

    /// Zero rupees
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// A USD amount for currency-mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for catalog products
pub struct ProductFixtures;

impl ProductFixtures {
    /// 100.00 with 10% tax, ten in stock
    pub fn chai() -> Product {
        Product::new(
            ProductId::new(),
            "SKU-CHAI",
            "Masala Chai",
            Money::new(dec!(100.00), Currency::INR),
            Rate::from_percent(dec!(10)),
        )
        .with_category("Beverages")
        .with_stock(10)
    }

    /// 50.00 with 5% tax, three in stock
    pub fn coffee() -> Product {
        Product::new(
            ProductId::new(),
            "SKU-COFFEE",
            "Filter Coffee",
            Money::new(dec!(50.00), Currency::INR),
            Rate::from_percent(dec!(5)),
        )
        .with_barcode("8901234567890")
        .with_category("Beverages")
        .with_stock(3)
    }

    /// Untaxed 25.00 item with deep stock
    pub fn biscuits() -> Product {
        Product::new(
            ProductId::new(),
            "SKU-BISC",
            "Butter Biscuits",
            Money::new(dec!(25.00), Currency::INR),
            Rate::zero(),
        )
        .with_stock(500)
    }
}

/// Fixture for carts in known states
pub struct CartFixtures;

impl CartFixtures {
    /// The reference pricing scenario: one line, unit 100.00 x 2,
    /// 10% tax, 10% line discount; totals 200 / 20 / 18 / 198.
    pub fn reference_cart() -> Cart {
        let product = ProductFixtures::chai();
        let mut cart = Cart::new(Currency::INR);
        cart.add_product(&product, 2).unwrap();
        cart.set_line_discount(
            &product.id,
            Discount::Percent(Rate::from_percent(dec!(10))),
        )
        .unwrap();
        cart
    }
}

/// Fixture for ledgers
pub struct LedgerFixtures;

impl LedgerFixtures {
    /// A ledger preloaded with the standard retail chart
    pub fn retail_ledger() -> Ledger {
        Ledger::with_accounts(
            Currency::INR,
            RetailChartOfAccounts::standard_accounts(Currency::INR),
        )
        .unwrap()
    }
}
