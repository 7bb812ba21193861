//! Export module
//!
//! Writes a selection of transactions in one of three formats:
//! - CSV: one row per transaction, for spreadsheets
//! - JSON: full export with accounts, categories and metadata
//! - YAML: the same full export in a human-readable form

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_full_yaml;

/// Output file type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}
