//! Ledger port traits
//!
//! Persistence of posted transactions and updated account balances is a
//! synchronous handoff to a storage collaborator; the engine never blocks
//! on I/O beyond that call.

use core_kernel::{PortError, Repository};

use crate::account::Account;
use crate::transaction::Transaction;

/// Storage collaborator for the posted journal
///
/// Implementations persist posted transactions and the account balances
/// they produced. [`crate::Ledger::post_and_save`] calls `save_posted`
/// first, then `save_account` for every account the transaction touched.
pub trait JournalStore: Repository {
    /// Persists a posted transaction
    fn save_posted(&mut self, transaction: &Transaction) -> Result<(), PortError>;

    /// Persists an account's updated balance
    fn save_account(&mut self, account: &Account) -> Result<(), PortError>;
}
