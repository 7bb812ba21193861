//! Currency display settings

use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    #[default]
    Prefix,
    Suffix,
}

/// Currency symbol and placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    #[serde(default)]
    pub position: CurrencyPosition,
}

impl Currency {
    pub fn new(symbol: impl Into<String>, position: CurrencyPosition) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }

    /// Wrap an already formatted, unsigned number with the symbol
    pub fn apply(&self, number: &str, negative: bool) -> String {
        let sign = if negative { "-" } else { "" };
        match self.position {
            CurrencyPosition::Prefix => format!("{}{}{}", sign, self.symbol, number),
            CurrencyPosition::Suffix => format!("{}{} {}", sign, number, self.symbol),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("$", CurrencyPosition::Prefix)
    }
}
