use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and writes a default `config.json` into it.
///
/// # Errors
/// - Returns an error if a config file already exists or any file operation fails.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the home directory and config")?;
    Ok(format!("Created {}", config.config_path().display()).into())
}
