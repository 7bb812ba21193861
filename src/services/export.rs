//! Export service
//!
//! Selects transactions by date range and accounts, writes them in the
//! requested format and reports where the file went.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::config::{FilterSettings, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_full_json, export_full_yaml, export_transactions_csv, ExportFormat, FullExport};
use crate::models::{AccountId, DateRangeType};
use crate::storage::Storage;

use super::date_range::DateRangeService;
use super::filter::query_transactions;

/// What to export and where
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Destination file; defaults to a timestamped file in the export directory
    pub output: Option<PathBuf>,
    pub date_range_type: DateRangeType,
    pub accounts: Vec<AccountId>,
    /// When set, `accounts` is ignored and every account is exported
    pub all_accounts_selected: bool,
}

/// A finished export
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub transactions: usize,
}

pub struct ExportService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    today: Option<NaiveDate>,
}

impl<'a> ExportService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn export(&self, request: ExportRequest) -> ExpenseResult<ExportOutcome> {
        if !request.all_accounts_selected && request.accounts.is_empty() {
            return Err(ExpenseError::Validation(
                "Select at least one account to export".into(),
            ));
        }
        for id in &request.accounts {
            if !self.storage.accounts.exists(*id)? {
                return Err(ExpenseError::account_not_found(id.to_string()));
            }
        }

        let dates = match self.today {
            Some(today) => DateRangeService::with_today(self.settings, today),
            None => DateRangeService::new(self.settings),
        };
        let range = dates.range_for(request.date_range_type);
        let label = dates.range_label(request.date_range_type);

        let filter = FilterSettings {
            date_range_type: request.date_range_type,
            custom_range: self.settings.filter.custom_range,
            accounts: if request.all_accounts_selected {
                Vec::new()
            } else {
                request.accounts.clone()
            },
            ..FilterSettings::default()
        };
        let transactions = query_transactions(self.storage, &filter, range)?;
        let count = transactions.len();

        let path = match request.output {
            Some(path) => path,
            None => self.default_path(request.format),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExpenseError::Export(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let file = File::create(&path)
            .map_err(|e| ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);

        match request.format {
            ExportFormat::Csv => export_transactions_csv(self.storage, &transactions, &mut writer)?,
            ExportFormat::Json => {
                let export = FullExport::build(self.storage, transactions, label)?;
                export_full_json(&export, &mut writer)?
            }
            ExportFormat::Yaml => {
                let export = FullExport::build(self.storage, transactions, label)?;
                export_full_yaml(&export, &mut writer)?
            }
        }

        std::io::Write::flush(&mut writer)
            .map_err(|e| ExpenseError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            format = %request.format,
            transactions = count,
            "exported transactions"
        );

        Ok(ExportOutcome {
            path,
            transactions: count,
        })
    }

    fn default_path(&self, format: ExportFormat) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.storage
            .paths()
            .export_dir()
            .join(format!("transactions_{}.{}", stamp, format.extension()))
    }
}
