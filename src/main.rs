use clap::Parser;
use expense_charts::args::{Args, Command};
use expense_charts::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home).await?.print(),

        Command::Totals(report_args) => commands::totals(report_args.clone()).await?.emit(),

        Command::Series(series_args) => {
            let config = Config::load(home).await?;
            commands::series(config, series_args.clone())
                .await?
                .emit()
        }

        Command::Charts(charts_args) => {
            let config = Config::load(home).await?;
            commands::charts(config, charts_args.clone())
                .await?
                .emit()
        }

        Command::Items(report_args) => {
            let config = Config::load(home).await?;
            commands::items(config, report_args.clone()).await?.emit()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so stdout carries only command output.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
