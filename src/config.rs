//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSE_CHARTS_HOME/config.json` and holds the
//! presentation settings: how dates are labelled, which currency symbol amounts carry, and the
//! order the line chart is drawn in.

use crate::date_format::{PatternFormatter, DEFAULT_DATE_FORMAT};
use crate::series::SeriesOrder;
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "expense-charts";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSE_CHARTS_HOME` and from there it loads `config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    formatter: PatternFormatter,
}

impl Config {
    /// Creates the home directory, if needed, and writes a default `config.json` into it.
    ///
    /// # Errors
    /// - Returns an error if a `config.json` already exists or any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        anyhow::ensure!(
            !config_path.exists(),
            "A config file already exists at '{}'",
            config_path.display()
        );

        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;
        Self::from_parts(root, config_path, config_file)
    }

    /// Loads `config.json` from `home`. When the home directory or the file does not exist the
    /// defaults are used, so the tool works without running `init` first.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let root = home.into();
        let config_path = root.join(CONFIG_JSON);
        let config_file = if config_path.is_file() {
            ConfigFile::load(&config_path).await?
        } else {
            debug!(
                "No config file at '{}', using defaults",
                config_path.display()
            );
            ConfigFile::default()
        };
        Self::from_parts(root, config_path, config_file)
    }

    fn from_parts(root: PathBuf, config_path: PathBuf, config_file: ConfigFile) -> Result<Self> {
        let formatter = PatternFormatter::new(&config_file.date_format).with_context(|| {
            format!("Bad date_format in config file '{}'", config_path.display())
        })?;
        Ok(Self {
            root,
            config_path,
            config_file,
            formatter,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The formatter built from the configured `date_format`.
    pub fn formatter(&self) -> &PatternFormatter {
        &self.formatter
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config_file.currency_symbol
    }

    pub fn series_order(&self) -> SeriesOrder {
        self.config_file.series_order
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expense-charts",
///   "config_version": 1,
///   "date_format": "%-d %b %Y",
///   "currency_symbol": "₹",
///   "series_order": "input"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expense-charts"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// strftime pattern for date labels
    #[serde(default = "default_date_format")]
    date_format: String,

    /// Symbol placed in front of formatted amounts
    #[serde(default = "default_currency_symbol")]
    currency_symbol: String,

    /// Order the line chart series are built in
    #[serde(default)]
    series_order: SeriesOrder,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            date_format: default_date_format(),
            currency_symbol: default_currency_symbol(),
            series_order: SeriesOrder::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
