//! Chart.js-shaped payloads for the analytics screen.
//!
//! Nothing here draws anything. Each [`Chart`] serializes to the `{ type, data, options }` object
//! a Chart.js renderer takes, with the same colours and options the dashboard has always used.

use crate::date_format::DateFormatter;
use crate::model::{Ledger, TransactionKind};
use crate::series::{build_series, SeriesOrder, TimeSeries};
use crate::totals::{aggregate_by_category, CategoryTotals};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

const INCOME_LINE: &str = "green";
const EXPENSE_LINE: &str = "red";
const LINE_TENSION: f64 = 0.2;

const INCOME_BAR_FILL: &str = "rgba(0, 208, 132, 0.7)";
const INCOME_BAR_BORDER: &str = "rgba(0, 208, 132, 1)";
const EXPENSE_BAR_FILL: &str = "rgba(255, 84, 84, 0.7)";
const EXPENSE_BAR_BORDER: &str = "rgba(255, 84, 84, 1)";
const BAR_BORDER_WIDTH: u32 = 2;
const BAR_BORDER_RADIUS: u32 = 5;

pub const LINE_TITLE: &str = "Income vs Expenses Over Time";
pub const INCOME_LABEL: &str = "Income";
pub const EXPENSE_LABEL: &str = "Expenses";
pub const INCOME_BARS_LABEL: &str = "Income by Category";
pub const EXPENSE_BARS_LABEL: &str = "Expenses by Category";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Line,
    Bar,
}

/// A colour for the whole dataset, or one colour per bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    One(String),
    PerPoint(Vec<String>),
}

impl Colors {
    fn repeat(color: &str, n: usize) -> Self {
        Colors::PerPoint(vec![color.to_string(); n])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Colors,
    pub border_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
}

impl Dataset {
    fn line(label: &str, series: &TimeSeries, color: &str) -> Self {
        Self {
            label: label.to_string(),
            data: series.values().iter().map(|a| a.to_f64()).collect(),
            background_color: Colors::One(color.to_string()),
            border_color: Colors::One(color.to_string()),
            tension: Some(LINE_TENSION),
            border_width: None,
            border_radius: None,
        }
    }

    fn bars(label: &str, totals: &CategoryTotals, fill: &str, border: &str) -> Self {
        Self {
            label: label.to_string(),
            data: totals.values().map(|a| a.to_f64()).collect(),
            background_color: Colors::repeat(fill, totals.len()),
            border_color: Colors::repeat(border, totals.len()),
            tension: None,
            border_width: Some(BAR_BORDER_WIDTH),
            border_radius: Some(BAR_BORDER_RADIUS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One chart ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    #[serde(rename = "type")]
    pub kind: ChartType,
    pub data: ChartData,
    pub options: Value,
}

impl Chart {
    /// The combined line chart. Labels come from the income dates; the expense dataset is laid
    /// against the same labels by position, so the two datasets can differ in length.
    pub fn income_vs_expenses(incomes: &TimeSeries, expenses: &TimeSeries) -> Self {
        if incomes.len() != expenses.len() {
            debug!(
                "Line chart has {} income points and {} expense points",
                incomes.len(),
                expenses.len()
            );
        }
        Self {
            kind: ChartType::Line,
            data: ChartData {
                labels: incomes.labels().to_vec(),
                datasets: vec![
                    Dataset::line(INCOME_LABEL, incomes, INCOME_LINE),
                    Dataset::line(EXPENSE_LABEL, expenses, EXPENSE_LINE),
                ],
            },
            options: line_options(),
        }
    }

    /// A bar per category. Empty totals give a chart with no bars rather than an error.
    pub fn by_category(kind: TransactionKind, totals: &CategoryTotals) -> Self {
        let (label, fill, border) = match kind {
            TransactionKind::Income => (INCOME_BARS_LABEL, INCOME_BAR_FILL, INCOME_BAR_BORDER),
            TransactionKind::Expense => (EXPENSE_BARS_LABEL, EXPENSE_BAR_FILL, EXPENSE_BAR_BORDER),
        };
        Self {
            kind: ChartType::Bar,
            data: ChartData {
                labels: totals.keys().map(|k| k.to_string()).collect(),
                datasets: vec![Dataset::bars(label, totals, fill, border)],
            },
            options: bar_options(),
        }
    }
}

/// The three charts of the analytics screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ChartSet {
    pub line: Chart,
    pub income_bars: Chart,
    pub expense_bars: Chart,
}

impl ChartSet {
    /// Builds all three charts from the same snapshot. Each chart is computed independently.
    pub fn assemble<F>(ledger: &Ledger, formatter: &F, order: SeriesOrder) -> Self
    where
        F: DateFormatter + ?Sized,
    {
        let income_series = build_series(order.arrange(ledger.incomes()), formatter);
        let expense_series = build_series(order.arrange(ledger.expenses()), formatter);
        let income_totals = aggregate_by_category(ledger.incomes());
        let expense_totals = aggregate_by_category(ledger.expenses());

        for (kind, totals) in [
            (TransactionKind::Income, &income_totals),
            (TransactionKind::Expense, &expense_totals),
        ] {
            let unknown = totals.unknown_keys(kind);
            if !unknown.is_empty() {
                warn!("Unrecognized {kind} categories will be charted as-is: {unknown:?}");
            }
        }

        Self {
            line: Chart::income_vs_expenses(&income_series, &expense_series),
            income_bars: Chart::by_category(TransactionKind::Income, &income_totals),
            expense_bars: Chart::by_category(TransactionKind::Expense, &expense_totals),
        }
    }
}

fn line_options() -> Value {
    json!({
        "plugins": {
            "legend": {
                "display": true,
                "position": "top",
                "align": "end",
                "labels": {
                    "boxWidth": 15,
                    "padding": 20,
                    "usePointStyle": true,
                    "font": { "size": 12, "weight": 500 }
                }
            },
            "title": { "display": true, "text": LINE_TITLE }
        },
        "scales": {
            "y": {
                "beginAtZero": true,
                "grid": { "color": "rgba(0, 0, 0, 0.1)", "drawBorder": false },
                "ticks": { "padding": 10, "font": { "size": 11 } }
            },
            "x": {
                "grid": { "display": false, "drawBorder": false },
                "ticks": { "padding": 10, "font": { "size": 11 } }
            }
        },
        "responsive": true,
        "maintainAspectRatio": false,
        "layout": { "padding": { "left": 10, "right": 20, "top": 20, "bottom": 10 } },
        "elements": {
            "line": { "tension": 0.4 },
            "point": { "radius": 4, "hitRadius": 8, "hoverRadius": 6 }
        }
    })
}

fn bar_options() -> Value {
    json!({
        "plugins": {
            "legend": { "display": false },
            "title": {
                "display": true,
                "font": { "size": 16, "weight": "bold" },
                "padding": { "top": 10, "bottom": 30 }
            }
        },
        "scales": {
            "y": { "beginAtZero": true, "grid": { "color": "rgba(0, 0, 0, 0.1)" } },
            "x": { "grid": { "display": false } }
        },
        "responsive": true,
        "maintainAspectRatio": true,
        "aspectRatio": 2.5 / 3.5
    })
}
