use crate::args::ChartsArgs;
use crate::chart::ChartSet;
use crate::commands::Out;
use crate::model::Ledger;
use crate::output::Rows;
use crate::{utils, Config, Result};
use anyhow::Context;
use tracing::debug;

/// Builds the three analytics charts. With `--output` they are written to that file, otherwise
/// they are returned for printing.
pub async fn charts(config: Config, args: ChartsArgs) -> Result<Out<Rows>> {
    let order = args.order().unwrap_or(config.series_order());
    let ledger = Ledger::load(args.input()).await?;
    if ledger.is_empty() {
        debug!("The ledger is empty, the charts will have no data");
    }

    let charts = ChartSet::assemble(&ledger, config.formatter(), order);
    let value = serde_json::to_value(&charts).context("Unable to serialize the charts")?;

    match args.output() {
        Some(path) => {
            let json =
                serde_json::to_string_pretty(&value).context("Unable to serialize the charts")?;
            utils::write(path, json).await?;
            Ok(Out::new_message(format!(
                "Wrote charts to {}",
                path.display()
            )))
        }
        None => Ok(Out::new("Built charts", Rows::Json(value))),
    }
}
