//! Product records at the inventory collaborator boundary
//!
//! Products are owned externally by inventory; the pricing engine treats
//! them as immutable inputs. Cart lines copy the unit price and tax rate
//! at add time, so later product edits never retroactively change a cart.

use serde::{Deserialize, Serialize};

use core_kernel::{Money, ProductId, Rate};

/// A product available for sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: ProductId,
    /// Stock keeping unit, the human-readable business identifier
    pub sku: String,
    /// Barcode (EAN-13, UPC-A, ...)
    pub barcode: Option<String>,
    /// Display name
    pub name: String,
    /// Unit price (non-negative)
    pub unit_price: Money,
    /// Tax rate as a percentage in [0, 100]
    pub tax_rate: Rate,
    /// Units on hand; may be zero
    pub stock_quantity: i64,
    /// Optional category for display grouping
    pub category: Option<String>,
    /// Whether the product can still be sold
    pub is_active: bool,
}

impl Product {
    /// Creates a new active product with no stock
    pub fn new(
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        tax_rate: Rate,
    ) -> Self {
        Self {
            id,
            sku: sku.into(),
            barcode: None,
            name: name.into(),
            unit_price,
            tax_rate,
            stock_quantity: 0,
            category: None,
            is_active: true,
        }
    }

    /// Sets the barcode
    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the stock on hand
    pub fn with_stock(mut self, quantity: i64) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Returns true if the requested quantity can be fulfilled from stock
    pub fn available(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }
}
