//! These structs provide the CLI interface for the expense-charts CLI.

use crate::model::TransactionKind;
use crate::series::SeriesOrder;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// expense-charts: turns income and expense records into chart data.
///
/// Reads a ledger exported from the expense tracker backend, either as
/// `{"incomes": [...], "expenses": [...]}` or as a flat list of records carrying a `type`, and
/// produces per-category totals, date-labelled series, list rows, or the Chart.js payloads for
/// the analytics screen.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and a default config.json.
    ///
    /// Running this is optional; without a config file every command uses the defaults.
    Init,
    /// Sum amounts per category.
    Totals(ReportArgs),
    /// Date labels and amounts for each record, in line chart order.
    Series(SeriesArgs),
    /// Write the line chart and both category bar charts as Chart.js JSON.
    Charts(ChartsArgs),
    /// The rows of the income and expense lists.
    Items(ReportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory holding config.json. Defaults to ~/expense-charts
    #[arg(long, env = "EXPENSE_CHARTS_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Which of the two record lists a command reports on.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    Income,
    Expense,
    #[default]
    Both,
}

serde_plain::derive_display_from_serialize!(KindFilter);
serde_plain::derive_fromstr_from_deserialize!(KindFilter);

impl KindFilter {
    pub fn kinds(&self) -> Vec<TransactionKind> {
        match self {
            KindFilter::Income => vec![TransactionKind::Income],
            KindFilter::Expense => vec![TransactionKind::Expense],
            KindFilter::Both => vec![TransactionKind::Income, TransactionKind::Expense],
        }
    }
}

/// How structured command output is printed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    /// A markdown table.
    #[default]
    Table,
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// Args shared by the commands that report on a ledger file.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The ledger JSON file.
    input: PathBuf,

    /// Which records to report on.
    #[arg(long, value_enum, default_value_t = KindFilter::Both)]
    kind: KindFilter,

    /// The output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ReportArgs {
    pub fn new(input: impl Into<PathBuf>, kind: KindFilter, format: OutputFormat) -> Self {
        Self {
            input: input.into(),
            kind,
            format,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn kind(&self) -> KindFilter {
        self.kind
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// (Not shown): Args for the `expense-charts series` command.
#[derive(Debug, Parser, Clone)]
pub struct SeriesArgs {
    #[clap(flatten)]
    report: ReportArgs,

    /// Overrides the series_order from config.json.
    #[arg(long, value_enum)]
    order: Option<SeriesOrder>,
}

impl SeriesArgs {
    pub fn new(report: ReportArgs, order: Option<SeriesOrder>) -> Self {
        Self { report, order }
    }

    pub fn report(&self) -> &ReportArgs {
        &self.report
    }

    pub fn order(&self) -> Option<SeriesOrder> {
        self.order
    }
}

/// (Not shown): Args for the `expense-charts charts` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartsArgs {
    /// The ledger JSON file.
    input: PathBuf,

    /// Write the charts here instead of to stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Overrides the series_order from config.json.
    #[arg(long, value_enum)]
    order: Option<SeriesOrder>,
}

impl ChartsArgs {
    pub fn new(
        input: impl Into<PathBuf>,
        output: Option<PathBuf>,
        order: Option<SeriesOrder>,
    ) -> Self {
        Self {
            input: input.into(),
            output,
            order,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn order(&self) -> Option<SeriesOrder> {
        self.order
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expense-charts"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or EXPENSE_CHARTS_HOME instead of relying on the default \
                home directory.",
            );
            PathBuf::from("expense-charts")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
