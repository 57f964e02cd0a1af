//! Account types for the chart of accounts
//!
//! This module defines the account structure for double-entry bookkeeping.
//! Each account carries a running balance that only the posting engine
//! mutates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{AccountId, Currency, Money, MoneyError};

use crate::error::LedgerError;

/// Types of accounts in the chart of accounts
///
/// The type is fixed at creation and determines the account's normal
/// balance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Asset accounts (debit normal balance)
    Asset,
    /// Liability accounts (credit normal balance)
    Liability,
    /// Equity accounts (credit normal balance)
    Equity,
    /// Revenue accounts (credit normal balance)
    Revenue,
    /// Expense accounts (debit normal balance)
    Expense,
}

impl AccountType {
    /// Returns true if this account type has a debit normal balance
    pub fn is_debit_normal(&self) -> bool {
        matches!(self, AccountType::Asset | AccountType::Expense)
    }
}

/// An account in the chart of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Account code, unique within a chart (e.g., "1000")
    pub code: String,
    /// Account name
    pub name: String,
    /// Account type (fixed at creation)
    pub account_type: AccountType,
    /// Running balance, relative to the normal balance side
    pub balance: Money,
    /// Description
    pub description: Option<String>,
    /// Whether account accepts new postings
    pub is_active: bool,
}

impl Account {
    /// Creates a new account with a zero opening balance
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier
    /// * `code` - Account code
    /// * `name` - Account name
    /// * `account_type` - Type of account
    /// * `currency` - Currency the balance is kept in
    pub fn new(
        id: AccountId,
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
        currency: Currency,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            account_type,
            balance: Money::zero(currency),
            description: None,
            is_active: true,
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the account as no longer accepting postings
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// The chart of accounts: every account a ledger can post against
///
/// Accounts are keyed by id with a unique code index. The chart is owned
/// exclusively by one [`crate::Ledger`], which serializes all balance
/// updates against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    currency: Currency,
    accounts: HashMap<AccountId, Account>,
    code_index: HashMap<String, AccountId>,
}

impl ChartOfAccounts {
    /// Creates an empty chart for the given currency
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            accounts: HashMap::new(),
            code_index: HashMap::new(),
        }
    }

    /// Returns the chart currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Adds an account to the chart
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateAccount`] if the id or code is
    /// already taken, or a money error if the account balance is kept in
    /// a different currency than the chart.
    pub fn add(&mut self, account: Account) -> Result<(), LedgerError> {
        if account.balance.currency() != self.currency {
            return Err(LedgerError::Money(MoneyError::CurrencyMismatch(
                account.balance.currency().to_string(),
                self.currency.to_string(),
            )));
        }
        if self.accounts.contains_key(&account.id) {
            return Err(LedgerError::DuplicateAccount(account.id.to_string()));
        }
        if self.code_index.contains_key(&account.code) {
            return Err(LedgerError::DuplicateAccount(account.code.clone()));
        }

        self.code_index.insert(account.code.clone(), account.id);
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Gets an account by id
    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Gets an account by code
    pub fn get_by_code(&self, code: &str) -> Option<&Account> {
        self.code_index.get(code).and_then(|id| self.accounts.get(id))
    }

    /// Deactivates an account so future postings against it are rejected
    pub fn deactivate(&mut self, id: &AccountId) -> Result<(), LedgerError> {
        match self.accounts.get_mut(id) {
            Some(account) => {
                account.deactivate();
                Ok(())
            }
            None => Err(LedgerError::UnknownAccount(id.to_string())),
        }
    }

    /// Iterates over all accounts in the chart
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of accounts in the chart
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub(crate) fn get_mut(&mut self, id: &AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }
}

/// Standard chart of accounts for a retail business
pub struct RetailChartOfAccounts;

impl RetailChartOfAccounts {
    /// Creates the standard retail accounts
    pub fn standard_accounts(currency: Currency) -> Vec<Account> {
        vec![
            // Assets
            Account::new(AccountId::new(), "1000", "Cash", AccountType::Asset, currency),
            Account::new(
                AccountId::new(),
                "1100",
                "Card Clearing",
                AccountType::Asset,
                currency,
            ),
            Account::new(
                AccountId::new(),
                "1200",
                "Inventory",
                AccountType::Asset,
                currency,
            ),
            Account::new(
                AccountId::new(),
                "1300",
                "Accounts Receivable",
                AccountType::Asset,
                currency,
            ),
            // Liabilities
            Account::new(
                AccountId::new(),
                "2000",
                "Tax Payable",
                AccountType::Liability,
                currency,
            ),
            Account::new(
                AccountId::new(),
                "2100",
                "Accounts Payable",
                AccountType::Liability,
                currency,
            ),
            // Equity
            Account::new(
                AccountId::new(),
                "3000",
                "Owner Equity",
                AccountType::Equity,
                currency,
            ),
            // Revenue
            Account::new(
                AccountId::new(),
                "4000",
                "Sales Revenue",
                AccountType::Revenue,
                currency,
            ),
            Account::new(
                AccountId::new(),
                "4100",
                "Other Income",
                AccountType::Revenue,
                currency,
            ),
            // Expenses
            Account::new(
                AccountId::new(),
                "5000",
                "Cost of Goods Sold",
                AccountType::Expense,
                currency,
            ),
            Account::new(
                AccountId::new(),
                "5100",
                "Operating Expense",
                AccountType::Expense,
                currency,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_balance_sides() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_chart_rejects_duplicate_code() {
        let mut chart = ChartOfAccounts::new(Currency::INR);
        chart
            .add(Account::new(
                AccountId::new(),
                "1000",
                "Cash",
                AccountType::Asset,
                Currency::INR,
            ))
            .unwrap();

        let result = chart.add(Account::new(
            AccountId::new(),
            "1000",
            "Cash Again",
            AccountType::Asset,
            Currency::INR,
        ));
        assert!(matches!(result, Err(LedgerError::DuplicateAccount(_))));
    }

    #[test]
    fn test_chart_lookup_by_code() {
        let mut chart = ChartOfAccounts::new(Currency::INR);
        let account = Account::new(
            AccountId::new(),
            "4000",
            "Sales Revenue",
            AccountType::Revenue,
            Currency::INR,
        );
        let id = account.id;
        chart.add(account).unwrap();

        assert_eq!(chart.get_by_code("4000").map(|a| a.id), Some(id));
        assert!(chart.get_by_code("9999").is_none());
    }

    #[test]
    fn test_standard_retail_chart_covers_all_types() {
        let accounts = RetailChartOfAccounts::standard_accounts(Currency::INR);

        for account_type in [
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
            AccountType::Revenue,
            AccountType::Expense,
        ] {
            assert!(
                accounts.iter().any(|a| a.account_type == account_type),
                "missing {:?}",
                account_type
            );
        }
    }
}
