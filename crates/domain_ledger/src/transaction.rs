//! Transaction and entry types
//!
//! This module defines the structure of financial transactions in the
//! double-entry ledger. A transaction is built by a caller, validated and
//! posted by the [`crate::Ledger`], and never partially applied.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, EntryId, Money, TransactionId};

/// A single entry (line) in a transaction
///
/// Exactly one of `debit`/`credit` must be nonzero; an entry with both
/// sides set, or neither, is rejected at validation time. Entries are
/// owned exclusively by their parent transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionEntry {
    /// Unique entry identifier
    pub id: EntryId,
    /// Account this entry posts against
    pub account_id: AccountId,
    /// Debit amount (zero when the entry is a credit)
    pub debit: Money,
    /// Credit amount (zero when the entry is a debit)
    pub credit: Money,
    /// Optional memo for this line
    pub memo: Option<String>,
}

impl TransactionEntry {
    /// Creates a debit entry
    pub fn debit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: EntryId::new(),
            account_id,
            debit: amount,
            credit: Money::zero(amount.currency()),
            memo: None,
        }
    }

    /// Creates a credit entry
    pub fn credit(account_id: AccountId, amount: Money) -> Self {
        Self {
            id: EntryId::new(),
            account_id,
            debit: Money::zero(amount.currency()),
            credit: amount,
            memo: None,
        }
    }

    /// Adds a memo to the entry
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Returns a copy with the debit and credit sides swapped
    pub fn swapped(&self) -> Self {
        Self {
            id: EntryId::new(),
            account_id: self.account_id,
            debit: self.credit,
            credit: self.debit,
            memo: self.memo.clone(),
        }
    }
}

/// A financial transaction consisting of two or more entries
///
/// Transactions must always balance: total debits = total credits.
/// Once posted, a transaction is immutable except for the reconciliation
/// flag, which is a manual marker matched against external records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Transaction date
    pub date: DateTime<Utc>,
    /// Transaction description
    pub description: String,
    /// Optional reference (order number, original transaction, ...)
    pub reference: Option<String>,
    /// The entries, in insertion order
    pub entries: Vec<TransactionEntry>,
    /// Set by the ledger when the transaction is posted
    pub posted_at: Option<DateTime<Utc>>,
    /// Manual reconciliation flag; posting never sets this
    pub is_reconciled: bool,
}

impl Transaction {
    /// Creates a new transaction dated now
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: TransactionId::new_v7(),
            date: Utc::now(),
            description: description.into(),
            reference: None,
            entries: Vec::new(),
            posted_at: None,
            is_reconciled: false,
        }
    }

    /// Sets the transaction date
    pub fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sets the reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Adds a debit entry
    pub fn debit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.entries.push(TransactionEntry::debit(account_id, amount));
        self
    }

    /// Adds a credit entry
    pub fn credit(mut self, account_id: AccountId, amount: Money) -> Self {
        self.entries.push(TransactionEntry::credit(account_id, amount));
        self
    }

    /// Adds a prepared entry
    pub fn entry(mut self, entry: TransactionEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Sum of all debit amounts
    pub fn total_debits(&self) -> Decimal {
        self.entries.iter().map(|e| e.debit.amount()).sum()
    }

    /// Sum of all credit amounts
    pub fn total_credits(&self) -> Decimal {
        self.entries.iter().map(|e| e.credit.amount()).sum()
    }

    /// Checks whether debits and credits agree within the given tolerance
    pub fn is_balanced_within(&self, epsilon: Decimal) -> bool {
        (self.total_debits() - self.total_credits()).abs() <= epsilon
    }

    /// Checks whether debits and credits agree exactly
    pub fn is_balanced(&self) -> bool {
        self.is_balanced_within(Decimal::ZERO)
    }

    /// Returns true once the ledger has applied this transaction
    pub fn is_posted(&self) -> bool {
        self.posted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    #[test]
    fn test_debit_entry_has_zero_credit() {
        let entry = TransactionEntry::debit(AccountId::new(), inr(dec!(100)));
        assert_eq!(entry.debit.amount(), dec!(100));
        assert!(entry.credit.is_zero());
    }

    #[test]
    fn test_swapped_exchanges_sides() {
        let entry = TransactionEntry::credit(AccountId::new(), inr(dec!(75.50)))
            .with_memo("tax portion");
        let swapped = entry.swapped();

        assert_eq!(swapped.debit.amount(), dec!(75.50));
        assert!(swapped.credit.is_zero());
        assert_eq!(swapped.account_id, entry.account_id);
        assert_eq!(swapped.memo.as_deref(), Some("tax portion"));
        assert_ne!(swapped.id, entry.id);
    }

    #[test]
    fn test_builder_collects_entries_in_order() {
        let cash = AccountId::new();
        let revenue = AccountId::new();

        let txn = Transaction::new("Walk-in sale")
            .debit(cash, inr(dec!(500)))
            .credit(revenue, inr(dec!(500)));

        assert_eq!(txn.entries.len(), 2);
        assert_eq!(txn.entries[0].account_id, cash);
        assert_eq!(txn.entries[1].account_id, revenue);
        assert!(txn.is_balanced());
        assert!(!txn.is_posted());
        assert!(!txn.is_reconciled);
    }

    #[test]
    fn test_is_balanced_within_tolerance() {
        let txn = Transaction::new("Rounding drift")
            .debit(AccountId::new(), inr(dec!(99.99)))
            .credit(AccountId::new(), inr(dec!(100.00)));

        assert!(!txn.is_balanced());
        assert!(txn.is_balanced_within(dec!(0.01)));
    }
}
