//! Turns the income and expense records of a personal finance ledger into chart data:
//! per-category totals, date-labelled series, list rows, and Chart.js payloads.

pub mod args;
pub mod chart;
pub mod commands;
mod config;
pub mod date_format;
mod error;
pub mod item;
pub mod model;
pub mod output;
pub mod series;
pub mod totals;
mod utils;


pub use chart::{Chart, ChartSet};
pub use config::Config;
pub use date_format::{DateFormatter, PatternFormatter};
pub use error::Error;
pub use error::Result;
pub use item::{item_views, ItemView};
pub use model::{Amount, CategoryKey, Ledger, TransactionDate, TransactionKind, TransactionRecord};
pub use series::{build_series, SeriesOrder, TimeSeries};
pub use totals::{aggregate_by_category, CategoryTotals};
