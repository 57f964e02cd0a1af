//! Sales domain errors

use core_kernel::{MoneyError, PortError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the sales domain
///
/// All variants are recoverable domain errors returned to the caller; the
/// presentation layer decides whether to surface them. No error path
/// leaves the cart partially mutated.
#[derive(Debug, Error)]
pub enum SalesError {
    /// Quantity must be positive (zero only for removal via update)
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Requested quantity exceeds what the catalog has on hand
    #[error("Insufficient stock for {sku}: requested {requested}, available {available}")]
    InsufficientStock {
        sku: String,
        requested: i64,
        available: i64,
    },

    /// Discount percent outside [0, 100] or amount beyond the line subtotal
    #[error("Invalid discount: {detail}")]
    InvalidDiscount { detail: String },

    /// Payment amounts must be positive
    #[error("Invalid payment amount: {amount}")]
    InvalidPayment { amount: Decimal },

    /// The operation requires at least one line item
    #[error("Cart has no line items")]
    EmptyCart,

    /// No held sale is stored under the given id
    #[error("Held sale not found: {0}")]
    HeldSaleNotFound(String),

    /// The product is not in the catalog, or is no longer sellable
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Monetary arithmetic failed (currency mismatch, division by zero)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// A collaborator rejected a synchronous handoff
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl SalesError {
    /// Creates an InvalidDiscount error
    pub fn invalid_discount(detail: impl Into<String>) -> Self {
        SalesError::InvalidDiscount {
            detail: detail.into(),
        }
    }
}
