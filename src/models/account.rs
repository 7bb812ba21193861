//! Account model
//!
//! Represents where money lives: bank accounts, cash and credit cards.
//! The balance is maintained by transactions; credit accounts also carry a limit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Bank account
    #[default]
    Bank,
    /// Cash/wallet
    Cash,
    /// Credit card
    Credit,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bank" | "checking" | "savings" => Some(Self::Bank),
            "cash" | "wallet" => Some(Self::Cash),
            "credit" | "credit_card" | "creditcard" | "card" => Some(Self::Credit),
            _ => None,
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank => write!(f, "Bank"),
            Self::Cash => write!(f, "Cash"),
            Self::Credit => write!(f, "Credit Card"),
        }
    }
}

pub const DEFAULT_ACCOUNT_COLOR: &str = "#4CAF50";
pub const DEFAULT_ACCOUNT_ICON: &str = "wallet";

/// An account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    /// Account name (e.g., "Cash", "HDFC Savings")
    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Current balance, adjusted by every transaction
    #[serde(default)]
    pub balance: Money,

    /// Credit limit; zero unless this is a credit account
    #[serde(default)]
    pub credit_limit: Money,

    /// Display color as `#RRGGBB`
    #[serde(default = "default_color")]
    pub color: String,

    /// Icon name
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Display order
    #[serde(default)]
    pub sequence: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_ACCOUNT_COLOR.to_string()
}

fn default_icon() -> String {
    DEFAULT_ACCOUNT_ICON.to_string()
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            balance: Money::zero(),
            credit_limit: Money::zero(),
            color: default_color(),
            icon: default_icon(),
            sequence: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with an opening balance
    pub fn with_balance(
        name: impl Into<String>,
        account_type: AccountType,
        balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type);
        account.balance = balance;
        account
    }

    /// Apply a signed balance change
    ///
    /// Leaves the account untouched if the new balance would not fit.
    pub fn adjust_balance(&mut self, delta: Money) -> Result<(), AccountValidationError> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or(AccountValidationError::BalanceOverflow)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Credit still available on a credit account
    ///
    /// A credit account's balance goes negative as it is spent, so the
    /// available credit is the limit plus the (usually negative) balance.
    pub fn available_credit(&self) -> Option<Money> {
        if self.account_type.is_credit() {
            Some([self.credit_limit, self.balance].into_iter().sum())
        } else {
            None
        }
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        let name_chars = self.name.chars().count();
        if name_chars > 100 {
            return Err(AccountValidationError::NameTooLong(name_chars));
        }

        if !self.balance.is_within_limit() || !self.credit_limit.is_within_limit() {
            return Err(AccountValidationError::AmountTooLarge);
        }

        if self.credit_limit.is_negative() {
            return Err(AccountValidationError::NegativeCreditLimit);
        }

        if !self.account_type.is_credit() && !self.credit_limit.is_zero() {
            return Err(AccountValidationError::CreditLimitOnNonCredit);
        }

        if !is_hex_color(&self.color) {
            return Err(AccountValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

/// Whether `s` looks like `#RRGGBB`
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeCreditLimit,
    CreditLimitOnNonCredit,
    InvalidColor(String),
    AmountTooLarge,
    BalanceOverflow,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::NegativeCreditLimit => write!(f, "Credit limit cannot be negative"),
            Self::CreditLimitOnNonCredit => {
                write!(f, "Only credit card accounts can have a credit limit")
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color '{}': expected #RRGGBB", color)
            }
            Self::AmountTooLarge => {
                write!(f, "Balance and credit limit must not exceed {}", Money::MAX_AMOUNT)
            }
            Self::BalanceOverflow => write!(f, "Account balance would overflow"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let account = Account::new("Wallet", AccountType::Cash);
        assert_eq!(account.name, "Wallet");
        assert_eq!(account.account_type, AccountType::Cash);
        assert_eq!(account.balance, Money::zero());
        assert_eq!(account.color, DEFAULT_ACCOUNT_COLOR);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new("Valid Name", AccountType::Bank);
        assert!(account.validate().is_ok());

        account.name = "   ".into();
        assert_eq!(account.validate(), Err(AccountValidationError::EmptyName));

        account.name = "a".repeat(101);
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::NameTooLong(101))
        ));

        // Length counts characters, not UTF-8 bytes
        account.name = "Д".repeat(60);
        assert!(account.validate().is_ok());
        account.name = "Д".repeat(101);
        assert_eq!(account.validate(), Err(AccountValidationError::NameTooLong(101)));

        account.name = "Savings".into();
        account.balance = Money::from_cents(Money::MAX_AMOUNT.cents() + 1);
        assert_eq!(account.validate(), Err(AccountValidationError::AmountTooLarge));
    }

    #[test]
    fn test_adjust_balance_overflow() {
        let mut account = Account::with_balance("Vault", AccountType::Bank, Money::from_cents(i64::MAX - 5));
        let before = account.clone();

        assert_eq!(
            account.adjust_balance(Money::from_cents(10)),
            Err(AccountValidationError::BalanceOverflow)
        );
        assert_eq!(account.balance, before.balance);
        assert_eq!(account.updated_at, before.updated_at);

        account.adjust_balance(Money::from_cents(-5)).unwrap();
        assert_eq!(account.balance.cents(), i64::MAX - 10);
    }

    #[test]
    fn test_credit_limit_rules() {
        let mut bank = Account::new("Bank", AccountType::Bank);
        bank.credit_limit = Money::from_cents(1000);
        assert_eq!(
            bank.validate(),
            Err(AccountValidationError::CreditLimitOnNonCredit)
        );

        let mut card = Account::new("Card", AccountType::Credit);
        card.credit_limit = Money::from_cents(-1);
        assert_eq!(
            card.validate(),
            Err(AccountValidationError::NegativeCreditLimit)
        );

        card.credit_limit = Money::from_cents(50000);
        assert!(card.validate().is_ok());
    }

    #[test]
    fn test_color_validation() {
        assert!(is_hex_color("#A1b2C3"));
        assert!(!is_hex_color("A1B2C3"));
        assert!(!is_hex_color("#A1B2C"));
        assert!(!is_hex_color("#GGGGGG"));

        let mut account = Account::new("Cash", AccountType::Cash);
        account.color = "red".into();
        assert!(matches!(
            account.validate(),
            Err(AccountValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_available_credit() {
        let mut card = Account::new("Card", AccountType::Credit);
        card.credit_limit = Money::from_cents(100000);
        card.adjust_balance(Money::from_cents(-25000)).unwrap();
        assert_eq!(card.available_credit(), Some(Money::from_cents(75000)));

        let cash = Account::new("Cash", AccountType::Cash);
        assert_eq!(cash.available_credit(), None);
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("bank"), Some(AccountType::Bank));
        assert_eq!(AccountType::parse("CASH"), Some(AccountType::Cash));
        assert_eq!(AccountType::parse("credit_card"), Some(AccountType::Credit));
        assert_eq!(AccountType::parse("invalid"), None);
    }

    #[test]
    fn test_serialization() {
        let account = Account::with_balance("Test", AccountType::Bank, Money::from_cents(500));
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"type\":\"bank\""));
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account.id, deserialized.id);
        assert_eq!(deserialized.balance.cents(), 500);
    }

    #[test]
    fn test_display() {
        let account = Account::new("My Card", AccountType::Credit);
        assert_eq!(format!("{}", account), "My Card (Credit Card)");
    }
}
