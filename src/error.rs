//! Error types for the expense manager
//!
//! Every service and repository returns `ExpenseResult<T>`: either the value
//! or an `ExpenseError`. Screens and CLI handlers turn an error into the text
//! shown to the user with [`ExpenseError::user_message`].

use thiserror::Error;

/// The main error type for expense manager operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ExpenseError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// A short ID prefix that matches more than one entity
    pub fn ambiguous_id(entity_type: &str, identifier: &str, matches: usize) -> Self {
        Self::Validation(format!(
            "{} ID '{}' is ambiguous ({} matches); use a longer prefix",
            entity_type, identifier, matches
        ))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text suitable for a status bar or terminal message.
    ///
    /// Validation and lookup failures are already phrased for the user and are
    /// shown as-is; persistence failures collapse into a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotFound { .. } | Self::Duplicate { .. } => self.to_string(),
            Self::Export(_) => "Unable to export data. Please try again.".to_string(),
            Self::Config(_) => "Unable to read settings.".to_string(),
            Self::Io(_) | Self::Json(_) | Self::Storage(_) => {
                "Unable to save changes. Please try again.".to_string()
            }
        }
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExpenseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for expense manager operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
