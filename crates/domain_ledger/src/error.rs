//! Ledger domain errors

use core_kernel::{MoneyError, PortError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the ledger domain
///
/// All variants are recoverable: the caller decides whether to surface
/// them, and no error path leaves account balances partially updated.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A transaction needs at least two entries to balance
    #[error("Transaction requires at least two entries, got {count}")]
    InsufficientEntries { count: usize },

    /// An entry must carry exactly one positive side
    #[error("Malformed entry: {detail}")]
    MalformedEntry { detail: String },

    /// Total debits and credits disagree beyond the balance tolerance
    #[error("Unbalanced transaction: debits={debits}, credits={credits}")]
    UnbalancedTransaction { debits: Decimal, credits: Decimal },

    /// An entry references an account that is not in the chart
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// An entry references an account that has been deactivated
    #[error("Inactive account: {0}")]
    InactiveAccount(String),

    /// An account with the same id or code is already in the chart
    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    /// The referenced transaction has not been posted to this ledger
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Monetary arithmetic failed (currency mismatch, division by zero)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// The journal store rejected a synchronous save
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl LedgerError {
    /// Creates a MalformedEntry error
    pub fn malformed(detail: impl Into<String>) -> Self {
        LedgerError::MalformedEntry {
            detail: detail.into(),
        }
    }
}
