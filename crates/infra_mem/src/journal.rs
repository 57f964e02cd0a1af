//! In-memory journal store

use std::collections::HashMap;

use core_kernel::{AccountId, PortError, Repository, TransactionId};
use domain_ledger::{Account, JournalStore, Transaction};

/// Journal store backed by a vector and a balance map
#[derive(Debug, Default)]
pub struct InMemoryJournal {
    transactions: Vec<Transaction>,
    accounts: HashMap<AccountId, Account>,
}

impl InMemoryJournal {
    /// Creates an empty journal store
    pub fn new() -> Self {
        Self::default()
    }

    /// Persisted transactions, in save order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Looks up a persisted transaction
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Last persisted balance snapshot for an account
    pub fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }
}

impl Repository for InMemoryJournal {}

impl JournalStore for InMemoryJournal {
    fn save_posted(&mut self, transaction: &Transaction) -> Result<(), PortError> {
        if !transaction.is_posted() {
            return Err(PortError::validation(
                "refusing to persist an unposted transaction",
            ));
        }
        self.transactions.push(transaction.clone());
        Ok(())
    }

    fn save_account(&mut self, account: &Account) -> Result<(), PortError> {
        self.accounts.insert(account.id, account.clone());
        Ok(())
    }
}
