//! Canned transactions for common retail events
//!
//! Builders that translate point-of-sale outcomes into balanced ledger
//! transactions. Tax entries are omitted when the tax amount is zero,
//! since a zero-amount entry is malformed by definition.

use core_kernel::{AccountId, Money};

use crate::transaction::Transaction;

/// Builder for common retail transactions
pub struct RetailPostings;

impl RetailPostings {
    /// Records a sale settled in cash
    ///
    /// Debits the cash account for the gross amount, credits revenue for
    /// the net amount and tax payable for the collected tax.
    ///
    /// # Arguments
    ///
    /// * `cash` - Cash asset account
    /// * `revenue` - Sales revenue account
    /// * `tax_payable` - Tax liability account
    /// * `net` - Sale total before tax
    /// * `tax` - Tax collected
    /// * `order_number` - Sales order reference
    pub fn cash_sale(
        cash: AccountId,
        revenue: AccountId,
        tax_payable: AccountId,
        net: Money,
        tax: Money,
        order_number: &str,
    ) -> Transaction {
        let mut txn = Transaction::new(format!("Cash sale {}", order_number))
            .with_reference(order_number)
            .debit(cash, net + tax)
            .credit(revenue, net);
        if !tax.is_zero() {
            txn = txn.credit(tax_payable, tax);
        }
        txn
    }

    /// Records a sale settled by card
    ///
    /// Identical to a cash sale except the gross amount lands in the card
    /// clearing account until the processor settles.
    pub fn card_sale(
        card_clearing: AccountId,
        revenue: AccountId,
        tax_payable: AccountId,
        net: Money,
        tax: Money,
        order_number: &str,
    ) -> Transaction {
        let mut txn = Transaction::new(format!("Card sale {}", order_number))
            .with_reference(order_number)
            .debit(card_clearing, net + tax)
            .credit(revenue, net);
        if !tax.is_zero() {
            txn = txn.credit(tax_payable, tax);
        }
        txn
    }

    /// Records a refund of a previous sale
    ///
    /// Mirror image of [`RetailPostings::cash_sale`]: revenue and tax
    /// payable are debited, cash is credited.
    pub fn sale_refund(
        cash: AccountId,
        revenue: AccountId,
        tax_payable: AccountId,
        net: Money,
        tax: Money,
        order_number: &str,
    ) -> Transaction {
        let mut txn = Transaction::new(format!("Refund of sale {}", order_number))
            .with_reference(order_number)
            .debit(revenue, net)
            .credit(cash, net + tax);
        if !tax.is_zero() {
            txn = txn.debit(tax_payable, tax);
        }
        txn
    }

    /// Records an operating expense paid from cash
    pub fn expense_payment(
        expense: AccountId,
        cash: AccountId,
        amount: Money,
        memo: &str,
    ) -> Transaction {
        Transaction::new(format!("Expense: {}", memo))
            .debit(expense, amount)
            .credit(cash, amount)
    }
}
