use crate::args::SeriesArgs;
use crate::commands::{plural, Out};
use crate::model::{Ledger, TransactionKind};
use crate::output::{Rows, Tabular};
use crate::series::{build_series, SeriesOrder, TimeSeries};
use crate::{Config, Result};
use serde::Serialize;
use tracing::debug;

/// The date-labelled series for the requested record lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SeriesReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<TimeSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense: Option<TimeSeries>,
}

impl SeriesReport {
    pub fn build(
        ledger: &Ledger,
        kinds: &[TransactionKind],
        config: &Config,
        order: SeriesOrder,
    ) -> Self {
        let mut report = SeriesReport::default();
        for &kind in kinds {
            let series = build_series(order.arrange(ledger.records(kind)), config.formatter());
            match kind {
                TransactionKind::Income => report.income = Some(series),
                TransactionKind::Expense => report.expense = Some(series),
            }
        }
        report
    }

    fn sections(&self) -> impl Iterator<Item = (TransactionKind, &TimeSeries)> {
        [
            (TransactionKind::Income, self.income.as_ref()),
            (TransactionKind::Expense, self.expense.as_ref()),
        ]
        .into_iter()
        .filter_map(|(kind, series)| series.map(|s| (kind, s)))
    }

    fn point_count(&self) -> usize {
        self.sections().map(|(_, s)| s.len()).sum()
    }
}

impl Tabular for SeriesReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["kind", "label", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.sections()
            .flat_map(|(kind, series)| {
                series
                    .iter()
                    .map(move |(label, value)| {
                        vec![kind.to_string(), label.to_string(), value.to_string()]
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Builds the line chart series from the ledger at `args.report().input()`.
pub async fn series(config: Config, args: SeriesArgs) -> Result<Out<Rows>> {
    let report_args = args.report();
    let order = args.order().unwrap_or(config.series_order());
    debug!("Building series in {order} order");

    let ledger = Ledger::load(report_args.input()).await?;
    let report = SeriesReport::build(&ledger, &report_args.kind().kinds(), &config, order);

    let message = format!("Built {}", plural(report.point_count(), "point", "points"));
    Ok(Out::new(
        message,
        Rows::render(report_args.format(), &report)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{KindFilter, OutputFormat, ReportArgs};
    use crate::test::{expense, income};
    use crate::utils;
    use tempfile::TempDir;

    fn ledger() -> Ledger {
        Ledger::new(
            vec![income(30, 3, "bank"), income(100, 1, "salary")],
            vec![expense(12, 2, "groceries")],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_report_rows_in_input_order() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).await.unwrap();
        let report = SeriesReport::build(
            &ledger(),
            &KindFilter::Both.kinds(),
            &config,
            SeriesOrder::Input,
        );
        assert_eq!(report.point_count(), 3);
        assert_eq!(
            report.rows(),
            vec![
                vec!["income", "3 Jan 2024", "30"],
                vec!["income", "1 Jan 2024", "100"],
                vec!["expense", "2 Jan 2024", "12"],
            ]
        );
    }

    #[tokio::test]
    async fn test_series_command_uses_configured_order() {
        let dir = TempDir::new().unwrap();
        let json = r#"{
            "app_name": "expense-charts",
            "config_version": 1,
            "date_format": "%Y-%m-%d",
            "series_order": "chronological"
        }"#;
        utils::write(dir.path().join("config.json"), json)
            .await
            .unwrap();
        let input = dir.path().join("ledger.json");
        utils::write(&input, serde_json::to_string(&ledger()).unwrap())
            .await
            .unwrap();
        let config = Config::load(dir.path()).await.unwrap();

        let args = SeriesArgs::new(
            ReportArgs::new(&input, KindFilter::Income, OutputFormat::Csv),
            None,
        );
        let out = series(config, args).await.unwrap();

        assert_eq!(out.message(), "Built 2 points");
        assert_eq!(
            out.structure().unwrap().to_string(),
            "kind,label,value\nincome,2024-01-01,100\nincome,2024-01-03,30\n"
        );
    }

    #[tokio::test]
    async fn test_series_command_order_flag_wins() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ledger.json");
        utils::write(&input, serde_json::to_string(&ledger()).unwrap())
            .await
            .unwrap();
        let config = Config::load(dir.path()).await.unwrap();
        assert_eq!(config.series_order(), SeriesOrder::Input);

        let args = SeriesArgs::new(
            ReportArgs::new(&input, KindFilter::Income, OutputFormat::Json),
            Some(SeriesOrder::Chronological),
        );
        let out = series(config, args).await.unwrap();

        match out.structure().unwrap() {
            Rows::Json(v) => {
                assert_eq!(v["income"]["labels"][0], "1 Jan 2024");
                assert_eq!(v["income"]["values"][0], 100.0);
                assert!(v.get("expense").is_none());
            }
            other => panic!("expected JSON, got {other:?}"),
        }
    }
}
