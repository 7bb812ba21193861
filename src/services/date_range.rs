//! Date range service
//!
//! Resolves the selected date range type against today and the user's
//! settings, and produces the label shown above transaction lists.

use chrono::{Local, NaiveDate};

use crate::config::Settings;
use crate::models::{DateRange, DateRangeType};

/// Resolves date ranges relative to a fixed "today"
pub struct DateRangeService<'a> {
    settings: &'a Settings,
    today: NaiveDate,
}

impl<'a> DateRangeService<'a> {
    /// Service anchored on the local date
    pub fn new(settings: &'a Settings) -> Self {
        Self::with_today(settings, Local::now().date_naive())
    }

    pub fn with_today(settings: &'a Settings, today: NaiveDate) -> Self {
        Self { settings, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Range for the currently selected type; `None` means all dates
    pub fn current_range(&self) -> Option<DateRange> {
        self.range_for(self.settings.filter.date_range_type)
    }

    pub fn range_for(&self, range_type: DateRangeType) -> Option<DateRange> {
        range_type.resolve(
            self.today,
            self.settings.first_day_of_week,
            self.settings.filter.custom_range,
        )
    }

    /// Label for the currently selected type
    pub fn current_label(&self) -> String {
        self.range_label(self.settings.filter.date_range_type)
    }

    /// Human text for a range type, e.g. `October 2026` or `Today (17/10/2026)`
    pub fn range_label(&self, range_type: DateRangeType) -> String {
        let Some(range) = self.range_for(range_type) else {
            return "All".to_string();
        };

        match range_type {
            DateRangeType::Today => format!("Today ({})", self.format_date(range.start)),
            DateRangeType::ThisMonth => range.start.format("%B %Y").to_string(),
            DateRangeType::ThisYear => range.start.format("%Y").to_string(),
            DateRangeType::ThisWeek | DateRangeType::Custom | DateRangeType::All => format!(
                "{} - {}",
                self.format_date(range.start),
                self.format_date(range.end)
            ),
        }
    }

    /// Format a date with the user's date format
    pub fn format_date(&self, date: NaiveDate) -> String {
        format_date(date, &self.settings.date_format)
    }
}

/// Format `date` with a strftime pattern, falling back to ISO for bad patterns
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    use chrono::format::{Item, StrftimeItems};
    use std::fmt::Write;

    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return date.to_string();
    }

    let mut out = String::new();
    match write!(out, "{}", date.format_with_items(items.into_iter())) {
        Ok(()) => out,
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_labels() {
        let settings = Settings::default();
        let service = DateRangeService::with_today(&settings, date(2026, 10, 17));

        assert_eq!(service.range_label(DateRangeType::Today), "Today (17/10/2026)");
        assert_eq!(service.range_label(DateRangeType::ThisMonth), "October 2026");
        assert_eq!(service.range_label(DateRangeType::ThisYear), "2026");
        assert_eq!(
            service.range_label(DateRangeType::ThisWeek),
            "12/10/2026 - 18/10/2026"
        );
        assert_eq!(service.range_label(DateRangeType::All), "All");
    }

    #[test]
    fn test_custom_label_uses_stored_range() {
        let mut settings = Settings::default();
        settings.filter.date_range_type = DateRangeType::Custom;
        settings.filter.custom_range = Some(DateRange::new(date(2026, 10, 1), date(2026, 10, 7)).unwrap());

        let service = DateRangeService::with_today(&settings, date(2026, 10, 17));
        assert_eq!(service.current_label(), "01/10/2026 - 07/10/2026");
        assert_eq!(
            service.current_range(),
            Some(DateRange::new(date(2026, 10, 1), date(2026, 10, 7)).unwrap())
        );
    }

    #[test]
    fn test_current_range_follows_settings() {
        let mut settings = Settings::default();
        let today = date(2026, 10, 17);

        let service = DateRangeService::with_today(&settings, today);
        assert_eq!(service.current_range(), Some(DateRange::month_of(today)));

        settings.filter.date_range_type = DateRangeType::All;
        let service = DateRangeService::with_today(&settings, today);
        assert_eq!(service.current_range(), None);
    }

    #[test]
    fn test_format_date_handles_bad_pattern() {
        let d = date(2026, 1, 5);
        assert_eq!(format_date(d, "%Y/%m/%d"), "2026/01/05");
        assert_eq!(format_date(d, "%Q"), "2026-01-05");
    }
}
