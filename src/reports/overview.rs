//! Account overview
//!
//! Balances across all accounts and each account's share of the money held.

use crate::error::ExpenseResult;
use crate::models::{Account, AccountId, AccountType, Money};
use crate::storage::Storage;

use super::analysis::{format_percentage, percentage_of};

#[derive(Debug, Clone)]
pub struct AccountShare {
    pub account_id: AccountId,
    pub name: String,
    pub account_type: AccountType,
    pub balance: Money,
    /// Remaining credit, credit accounts only
    pub available_credit: Option<Money>,
    /// Share of the positive balance held across accounts
    pub share: f64,
}

impl AccountShare {
    pub fn share_label(&self) -> String {
        format_percentage(self.share)
    }
}

#[derive(Debug, Clone)]
pub struct AccountOverview {
    pub accounts: Vec<AccountShare>,
    pub total_balance: Money,
    pub available_credit: Money,
}

impl AccountOverview {
    pub fn generate(storage: &Storage) -> ExpenseResult<Self> {
        Ok(Self::from_accounts(&storage.accounts.get_all()?))
    }

    pub fn from_accounts(accounts: &[Account]) -> Self {
        let positive: Money = accounts
            .iter()
            .filter(|a| a.balance.is_positive())
            .map(|a| a.balance)
            .sum();

        let shares = accounts
            .iter()
            .map(|a| AccountShare {
                account_id: a.id,
                name: a.name.clone(),
                account_type: a.account_type,
                balance: a.balance,
                available_credit: a.available_credit(),
                share: if a.balance.is_positive() {
                    percentage_of(a.balance, positive)
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            accounts: shares,
            total_balance: accounts.iter().map(|a| a.balance).sum(),
            available_credit: accounts.iter().filter_map(|a| a.available_credit()).sum(),
        }
    }
}
