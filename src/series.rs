//! Date-labelled series for the line chart.

use crate::date_format::DateFormatter;
use crate::model::{Amount, TransactionRecord};
use serde::{Deserialize, Serialize};

/// Parallel labels and values, one of each per input record, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    labels: Vec<String>,
    values: Vec<Amount>,
}

impl TimeSeries {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Amount] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Amount)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Projects each record to its formatted date and its amount. No sorting, filtering or
/// de-duplication happens here; see [`SeriesOrder`] for callers that want dates in order.
pub fn build_series<'a, F>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    formatter: &F,
) -> TimeSeries
where
    F: DateFormatter + ?Sized,
{
    let (labels, values) = records
        .into_iter()
        .map(|r| (formatter.format(&r.date()), r.amount()))
        .unzip();
    TimeSeries { labels, values }
}

/// The order records are fed to the series builder in.
///
/// `Input` keeps whatever order the backend returned, which is what the dashboard has always
/// drawn. If that order is not chronological the line zig-zags, so `Chronological` is available
/// but must be asked for.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrder {
    #[default]
    Input,
    Chronological,
}

serde_plain::derive_display_from_serialize!(SeriesOrder);
serde_plain::derive_fromstr_from_deserialize!(SeriesOrder);

impl SeriesOrder {
    /// Returns the records in this order. Sorting is stable, so records sharing a date keep
    /// their relative input order.
    pub fn arrange<'a>(&self, records: &'a [TransactionRecord]) -> Vec<&'a TransactionRecord> {
        let mut arranged: Vec<&TransactionRecord> = records.iter().collect();
        if let SeriesOrder::Chronological = self {
            arranged.sort_by_key(|r| r.date());
        }
        arranged
    }
}
