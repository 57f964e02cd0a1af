//! Payment methods, splits, and settlement status
//!
//! The source of record for "how was this sale paid" is a closed
//! per-method split: unknown tender methods are unrepresentable, and each
//! method accumulates its own amount for split-tender sales.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Currency, Money, MoneyError};

/// Tender methods accepted at the register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash
    Cash,
    /// Card on an external terminal
    Card,
    /// UPI transfer
    Upi,
}

impl PaymentMethod {
    /// All accepted methods, in display order
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Upi];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
        };
        write!(f, "{}", name)
    }
}

/// Amounts tendered so far, one slot per method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSplit {
    /// Cash component
    pub cash: Money,
    /// Card component
    pub card: Money,
    /// UPI component
    pub upi: Money,
    /// External reference (card auth code, UPI transaction id, ...)
    pub reference: Option<String>,
}

impl PaymentSplit {
    /// Creates an empty split in the given currency
    pub fn new(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            cash: zero,
            card: zero,
            upi: zero,
            reference: None,
        }
    }

    /// Returns the amount tendered via one method
    pub fn amount(&self, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::Upi => self.upi,
        }
    }

    /// Accumulates an amount into one method's slot
    pub fn record(&mut self, method: PaymentMethod, amount: Money) -> Result<(), MoneyError> {
        let slot = match method {
            PaymentMethod::Cash => &mut self.cash,
            PaymentMethod::Card => &mut self.card,
            PaymentMethod::Upi => &mut self.upi,
        };
        *slot = slot.checked_add(&amount)?;
        Ok(())
    }

    /// Sets the external reference
    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = Some(reference.into());
    }

    /// Total tendered across all methods
    pub fn total_paid(&self) -> Money {
        self.cash + self.card + self.upi
    }

    /// Returns true if nothing has been tendered yet
    pub fn is_empty(&self) -> bool {
        self.total_paid().is_zero()
    }

    /// Methods that carry a nonzero amount, in display order
    pub fn methods_used(&self) -> Vec<PaymentMethod> {
        PaymentMethod::ALL
            .into_iter()
            .filter(|m| !self.amount(*m).is_zero())
            .collect()
    }
}

/// Settlement status of a cart or order
///
/// A pure function of paid vs. total, with an explicit hold override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Paid in full (or over)
    Paid,
    /// Something is still due
    PartiallyPaid,
    /// Parked for later resumption
    Hold,
}

impl SettlementStatus {
    /// Derives the status from the tendered and owed amounts
    ///
    /// The hold override wins regardless of amounts. Otherwise
    /// `paid >= total` means Paid and anything else is PartiallyPaid
    /// (including a fully unpaid cart, which is simply 100% due).
    pub fn derive(paid: Money, total: Money, on_hold: bool) -> Self {
        if on_hold {
            SettlementStatus::Hold
        } else if paid >= total {
            SettlementStatus::Paid
        } else {
            SettlementStatus::PartiallyPaid
        }
    }
}
