//! Turning transaction dates into chart and list labels.

use crate::model::TransactionDate;
use crate::Result;
use anyhow::bail;
use chrono::format::{Item, StrftimeItems};

/// The default label pattern, e.g. `1 Jan 2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%-d %b %Y";

/// Produces the label shown for a date. Implementations must be pure: the same date always gives
/// the same label, and no other record is consulted.
pub trait DateFormatter {
    fn format(&self, date: &TransactionDate) -> String;
}

impl<F> DateFormatter for F
where
    F: Fn(&TransactionDate) -> String,
{
    fn format(&self, date: &TransactionDate) -> String {
        self(date)
    }
}

/// Formats dates with a strftime pattern, in UTC.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PatternFormatter {
    pattern: String,
}

impl PatternFormatter {
    /// Validates `pattern` up front so that formatting can never fail later.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid date format pattern '{pattern}'");
        }
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DateFormatter for PatternFormatter {
    fn format(&self, date: &TransactionDate) -> String {
        date.value().format(&self.pattern).to_string()
    }
}
