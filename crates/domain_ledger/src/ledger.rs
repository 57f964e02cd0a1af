//! Double-entry ledger implementation
//!
//! This module provides the posting engine: transactions are validated as
//! a whole, then applied to account balances atomically. Validation never
//! mutates; posting stages every new balance before committing any of
//! them, so a failure leaves the chart untouched.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use core_kernel::{AccountId, Currency, Money, TransactionId};

use crate::account::{Account, ChartOfAccounts};
use crate::error::LedgerError;
use crate::ports::JournalStore;
use crate::transaction::Transaction;

/// Tolerance for the debit/credit balance check
///
/// Absorbs the half-up rounding applied by upstream pricing: entries are
/// rounded independently, so a transaction assembled from rounded figures
/// can drift by at most one minor unit.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// The ledger: a chart of accounts plus the journal of posted transactions
///
/// # Invariants
///
/// - Every posted transaction balances within [`BALANCE_EPSILON`]
/// - Account balances are always consistent with the posted journal
/// - Posted transactions are never modified, only reversed
///
/// A ledger is a single-mutator aggregate: it owns its chart exclusively,
/// which serializes all balance updates against any shared account.
#[derive(Debug)]
pub struct Ledger {
    chart: ChartOfAccounts,
    posted: Vec<Transaction>,
    currency: Currency,
}

impl Ledger {
    /// Creates a new ledger with an empty chart
    pub fn new(currency: Currency) -> Self {
        Self {
            chart: ChartOfAccounts::new(currency),
            posted: Vec::new(),
            currency,
        }
    }

    /// Creates a ledger preloaded with the given accounts
    pub fn with_accounts(
        currency: Currency,
        accounts: Vec<Account>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(currency);
        for account in accounts {
            ledger.add_account(account)?;
        }
        Ok(ledger)
    }

    /// Returns the ledger currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Adds an account to the chart
    pub fn add_account(&mut self, account: Account) -> Result<(), LedgerError> {
        self.chart.add(account)
    }

    /// Gets an account by id
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.chart.get(id)
    }

    /// Gets an account by code
    pub fn account_by_code(&self, code: &str) -> Option<&Account> {
        self.chart.get_by_code(code)
    }

    /// Gets the current balance of an account
    pub fn balance(&self, id: &AccountId) -> Option<Money> {
        self.chart.get(id).map(|a| a.balance)
    }

    /// Deactivates an account so future postings against it are rejected
    pub fn deactivate_account(&mut self, id: &AccountId) -> Result<(), LedgerError> {
        self.chart.deactivate(id)
    }

    /// Returns the chart of accounts
    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Returns all posted transactions in posting order
    pub fn journal(&self) -> &[Transaction] {
        &self.posted
    }

    /// Gets a posted transaction by id
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.posted.iter().find(|t| &t.id == id)
    }

    /// Validates a transaction against this ledger without mutating anything
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientEntries`] - fewer than two entries
    /// - [`LedgerError::MalformedEntry`] - an entry with both sides set,
    ///   neither side set, or a negative side
    /// - [`LedgerError::UnbalancedTransaction`] - debits and credits differ
    ///   by more than [`BALANCE_EPSILON`]
    /// - [`LedgerError::UnknownAccount`] / [`LedgerError::InactiveAccount`]
    pub fn validate(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        if transaction.entries.len() < 2 {
            return Err(LedgerError::InsufficientEntries {
                count: transaction.entries.len(),
            });
        }

        for entry in &transaction.entries {
            if entry.debit.currency() != self.currency
                || entry.credit.currency() != self.currency
            {
                return Err(LedgerError::malformed(format!(
                    "entry {} is not denominated in {}",
                    entry.id, self.currency
                )));
            }
            if entry.debit.is_negative() || entry.credit.is_negative() {
                return Err(LedgerError::malformed(format!(
                    "entry {} carries a negative amount",
                    entry.id
                )));
            }
            match (entry.debit.is_zero(), entry.credit.is_zero()) {
                (false, false) => {
                    return Err(LedgerError::malformed(format!(
                        "entry {} carries both a debit and a credit",
                        entry.id
                    )));
                }
                (true, true) => {
                    return Err(LedgerError::malformed(format!(
                        "entry {} carries neither a debit nor a credit",
                        entry.id
                    )));
                }
                _ => {}
            }

            match self.chart.get(&entry.account_id) {
                None => {
                    return Err(LedgerError::UnknownAccount(entry.account_id.to_string()));
                }
                Some(account) if !account.is_active => {
                    return Err(LedgerError::InactiveAccount(account.code.clone()));
                }
                Some(_) => {}
            }
        }

        if !transaction.is_balanced_within(BALANCE_EPSILON) {
            return Err(LedgerError::UnbalancedTransaction {
                debits: transaction.total_debits(),
                credits: transaction.total_credits(),
            });
        }

        Ok(())
    }

    /// Validates and posts a transaction, updating account balances
    ///
    /// Balances move toward the account's normal side: debit-normal
    /// accounts gain `debit - credit`, credit-normal accounts gain
    /// `credit - debit`. All entries of one transaction are applied
    /// atomically; every new balance is computed before any is written.
    ///
    /// # Returns
    ///
    /// The posted transaction's id
    pub fn post(&mut self, mut transaction: Transaction) -> Result<TransactionId, LedgerError> {
        self.validate(&transaction)?;

        // Stage every balance change, then commit.
        let mut staged: Vec<(AccountId, Money)> = Vec::with_capacity(transaction.entries.len());
        for entry in &transaction.entries {
            let account = self
                .chart
                .get(&entry.account_id)
                .ok_or_else(|| LedgerError::UnknownAccount(entry.account_id.to_string()))?;

            let current = staged
                .iter()
                .rev()
                .find(|(id, _)| id == &entry.account_id)
                .map(|(_, balance)| *balance)
                .unwrap_or(account.balance);

            let delta = if account.account_type.is_debit_normal() {
                entry.debit.checked_sub(&entry.credit)?
            } else {
                entry.credit.checked_sub(&entry.debit)?
            };

            staged.push((entry.account_id, current.checked_add(&delta)?));
        }

        for (account_id, balance) in staged {
            if let Some(account) = self.chart.get_mut(&account_id) {
                account.balance = balance;
            }
        }

        transaction.posted_at = Some(Utc::now());
        let id = transaction.id;
        debug!(
            transaction = %id,
            entries = transaction.entries.len(),
            debits = %transaction.total_debits(),
            "posted transaction"
        );
        self.posted.push(transaction);

        Ok(id)
    }

    /// Posts a transaction and hands it to the journal store synchronously
    ///
    /// The store also receives every account the transaction touched, so
    /// persisted balances stay consistent with the persisted journal.
    pub fn post_and_save(
        &mut self,
        transaction: Transaction,
        store: &mut dyn JournalStore,
    ) -> Result<TransactionId, LedgerError> {
        let id = self.post(transaction)?;

        if let Some(posted) = self.transaction(&id) {
            store.save_posted(posted)?;
            for entry in &posted.entries {
                if let Some(account) = self.chart.get(&entry.account_id) {
                    store.save_account(account)?;
                }
            }
        }

        Ok(id)
    }

    /// Posts a reversal of a previously posted transaction
    ///
    /// The reversal is a new transaction with every entry's debit and
    /// credit swapped, referencing the original; the original is never
    /// mutated.
    pub fn reverse(
        &mut self,
        original_id: &TransactionId,
        reason: &str,
    ) -> Result<TransactionId, LedgerError> {
        let original = self
            .transaction(original_id)
            .ok_or_else(|| LedgerError::TransactionNotFound(original_id.to_string()))?;

        let mut reversal = Transaction::new(format!(
            "Reversal of {}: {}",
            original_id, reason
        ))
        .with_reference(original_id.to_string());
        for entry in &original.entries {
            reversal = reversal.entry(entry.swapped());
        }

        self.post(reversal)
    }

    /// Marks a posted transaction as reconciled
    ///
    /// Reconciliation is a manual flag matched against external records;
    /// posting never sets it.
    pub fn reconcile(&mut self, id: &TransactionId) -> Result<(), LedgerError> {
        match self.posted.iter_mut().find(|t| &t.id == id) {
            Some(transaction) => {
                transaction.is_reconciled = true;
                Ok(())
            }
            None => Err(LedgerError::TransactionNotFound(id.to_string())),
        }
    }

    /// Generates a trial balance over the current chart
    ///
    /// A pure projection: debit-normal balances go to the debit column,
    /// credit-normal balances to the credit column (negative balances
    /// cross over). The two totals must agree for a consistent ledger.
    pub fn trial_balance(&self) -> TrialBalance {
        let zero = Money::zero(self.currency);
        let mut entries = Vec::new();
        let mut total_debits = zero;
        let mut total_credits = zero;

        for account in self.chart.accounts() {
            if account.balance.is_zero() {
                continue;
            }

            let debit_side = account.account_type.is_debit_normal()
                != account.balance.is_negative();
            let magnitude = account.balance.abs();
            let (debit, credit) = if debit_side {
                (magnitude, zero)
            } else {
                (zero, magnitude)
            };

            total_debits += debit;
            total_credits += credit;
            entries.push(TrialBalanceEntry {
                account_id: account.id,
                code: account.code.clone(),
                name: account.name.clone(),
                debit,
                credit,
            });
        }

        entries.sort_by(|a, b| a.code.cmp(&b.code));

        let is_balanced =
            (total_debits.amount() - total_credits.amount()).abs() <= BALANCE_EPSILON;

        TrialBalance {
            entries,
            total_debits,
            total_credits,
            is_balanced,
        }
    }
}

/// Trial balance report
#[derive(Debug)]
pub struct TrialBalance {
    /// Per-account rows, ordered by account code
    pub entries: Vec<TrialBalanceEntry>,
    /// Total of the debit column
    pub total_debits: Money,
    /// Total of the credit column
    pub total_credits: Money,
    /// Whether the two columns agree within [`BALANCE_EPSILON`]
    pub is_balanced: bool,
}

/// A single row in the trial balance
#[derive(Debug)]
pub struct TrialBalanceEntry {
    /// Account id
    pub account_id: AccountId,
    /// Account code
    pub code: String,
    /// Account name
    pub name: String,
    /// Debit column amount
    pub debit: Money,
    /// Credit column amount
    pub credit: Money,
}
