use crate::args::ReportArgs;
use crate::commands::{plural, Out};
use crate::model::{Ledger, TransactionKind};
use crate::output::{Rows, Tabular};
use crate::totals::{aggregate_by_category, CategoryTotals};
use crate::Result;
use serde::Serialize;
use tracing::warn;

/// Per-category totals for the requested record lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TotalsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<CategoryTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense: Option<CategoryTotals>,
}

impl TotalsReport {
    pub fn build(ledger: &Ledger, kinds: &[TransactionKind]) -> Self {
        let mut report = TotalsReport::default();
        for &kind in kinds {
            let totals = aggregate_by_category(ledger.records(kind));
            match kind {
                TransactionKind::Income => report.income = Some(totals),
                TransactionKind::Expense => report.expense = Some(totals),
            }
        }
        report
    }

    fn sections(&self) -> impl Iterator<Item = (TransactionKind, &CategoryTotals)> {
        [
            (TransactionKind::Income, self.income.as_ref()),
            (TransactionKind::Expense, self.expense.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, totals)| totals.map(|t| (kind, t)))
    }

    fn category_count(&self) -> usize {
        self.sections().map(|(_, t)| t.len()).sum()
    }
}

impl Tabular for TotalsReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["kind", "category", "total", "known"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.sections()
            .flat_map(|(kind, totals)| {
                totals.iter().map(move |(key, total)| {
                    let known = kind.is_known_category(key.as_str());
                    vec![
                        kind.to_string(),
                        key.to_string(),
                        total.to_string(),
                        if known { "yes" } else { "no" }.to_string(),
                    ]
                })
            })
            .collect()
    }
}

/// Sums the amounts of each category in the ledger at `args.input()`.
pub async fn totals(args: ReportArgs) -> Result<Out<Rows>> {
    let ledger = Ledger::load(args.input()).await?;
    let report = TotalsReport::build(&ledger, &args.kind().kinds());

    for (kind, totals) in report.sections() {
        let unknown = totals.unknown_keys(kind);
        if !unknown.is_empty() {
            warn!("These {kind} categories are not in the known set: {unknown:?}");
        }
    }

    let message = format!(
        "Totalled {}",
        plural(report.category_count(), "category", "categories")
    );
    Ok(Out::new(message, Rows::render(args.format(), &report)?))
}
