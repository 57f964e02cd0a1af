//! Sales orders
//!
//! A sales order is the immutable snapshot a cart collapses into at
//! checkout. It freezes the lines, the customer, the computed totals and
//! the payment split; nothing on it changes after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, OrderId};

use crate::cart::{Cart, CartItem};
use crate::customer::Customer;
use crate::payment::{PaymentSplit, SettlementStatus};
use crate::pricing::CartTotals;

/// A finalized sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    /// Unique identifier
    pub id: OrderId,
    /// Human-readable order number
    pub order_number: String,
    /// Line snapshots, in cart order
    pub lines: Vec<CartItem>,
    /// Customer at checkout, if one was selected
    pub customer: Option<Customer>,
    /// Sum of line subtotals before discount
    pub subtotal: Money,
    /// Total discount taken
    pub discount_amount: Money,
    /// Total tax collected
    pub tax_amount: Money,
    /// Grand total
    pub total_amount: Money,
    /// Total tendered
    pub paid_amount: Money,
    /// Amount still owed; negative records an overpayment
    pub due_amount: Money,
    /// How the sale was tendered
    pub payments: PaymentSplit,
    /// Final settlement status
    pub status: SettlementStatus,
    /// When the sale was finalized
    pub placed_at: DateTime<Utc>,
}

impl SalesOrder {
    /// Snapshots a cart into an order using its computed totals
    pub(crate) fn from_cart(cart: &Cart, totals: &CartTotals) -> Self {
        Self {
            id: OrderId::new_v7(),
            order_number: generate_order_number(),
            lines: cart.items().to_vec(),
            customer: cart.customer().cloned(),
            subtotal: totals.subtotal,
            discount_amount: totals.discount_amount,
            tax_amount: totals.tax_amount,
            total_amount: totals.total_amount,
            paid_amount: totals.paid_amount,
            due_amount: totals.due_amount,
            payments: cart.payments().clone(),
            status: totals.status,
            placed_at: Utc::now(),
        }
    }
}

/// Generates a unique order number
fn generate_order_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("SO-{}", duration.as_millis() % 10_000_000_000)
}
