//! What a row in the income or expense list shows.

use crate::date_format::DateFormatter;
use crate::model::{TransactionKind, TransactionRecord};
use serde::Serialize;

/// The display-ready fields of one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ItemView {
    pub id: String,
    pub kind: TransactionKind,
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    /// `None` for categories outside the fixed set; the row then shows no glyph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ItemView {
    pub fn new<F>(
        record: &TransactionRecord,
        kind: TransactionKind,
        formatter: &F,
        currency_symbol: &str,
    ) -> Self
    where
        F: DateFormatter + ?Sized,
    {
        let category = record.category().unwrap_or_default();
        Self {
            id: record.id().to_string(),
            kind,
            title: record.title().to_string(),
            amount: record.amount().format(currency_symbol),
            date: formatter.format(&record.date()),
            category: category.to_string(),
            icon: kind.category_icon(category),
            description: record.description().map(str::to_string),
        }
    }
}

/// Views for every record of `kind`, in list order.
pub fn item_views<F>(
    records: &[TransactionRecord],
    kind: TransactionKind,
    formatter: &F,
    currency_symbol: &str,
) -> Vec<ItemView>
where
    F: DateFormatter + ?Sized,
{
    records
        .iter()
        .map(|r| ItemView::new(r, kind, formatter, currency_symbol))
        .collect()
}
