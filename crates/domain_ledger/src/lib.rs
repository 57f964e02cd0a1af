//! Ledger Domain - Double-Entry Posting Engine
//!
//! This crate implements a strict double-entry bookkeeping system for the
//! retail commerce core, ensuring financial integrity for all monetary
//! transactions.
//!
//! # Double-Entry Accounting Principles
//!
//! Every financial transaction carries balanced debits and credits:
//! - Debits increase asset/expense accounts
//! - Credits increase liability/equity/revenue accounts
//! - The sum of all debits must equal the sum of all credits
//!
//! Transactions are validated as a whole and applied atomically: an
//! invalid transaction never changes any account balance.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{Ledger, Transaction};
//!
//! let mut ledger = Ledger::new(Currency::INR);
//!
//! // Record a cash sale
//! let transaction = Transaction::new("Walk-in sale")
//!     .debit(cash_account, amount)
//!     .credit(sales_revenue, amount);
//!
//! ledger.post(transaction)?;
//! ```

pub mod account;
pub mod error;
pub mod ledger;
pub mod ports;
pub mod retail_postings;
pub mod transaction;

pub use account::{Account, AccountType, ChartOfAccounts, RetailChartOfAccounts};
pub use error::LedgerError;
pub use ledger::{Ledger, TrialBalance, TrialBalanceEntry, BALANCE_EPSILON};
pub use ports::JournalStore;
pub use retail_postings::RetailPostings;
pub use transaction::{Transaction, TransactionEntry};
