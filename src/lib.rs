pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::{InputArgs, TerminalPrompt};
use crate::core::config::AppConfig;
use crate::providers::OpenExchangeRatesProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs one conversion and returns the line to print.
pub async fn run(config_path: Option<&str>, input: InputArgs) -> Result<String> {
    info!("Currency converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = config.catalog()?;
    let provider = OpenExchangeRatesProvider::new(&config.provider.base_url, &AppConfig::app_id());
    let collector = Arc::new(TerminalPrompt::new(input));

    let conversion = cli::convert::run(collector, &provider, &catalog).await?;
    Ok(conversion.describe(&catalog))
}
