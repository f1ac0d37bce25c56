use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use super::prompt::InputCollector;
use super::ui;
use crate::core::{Conversion, CurrencyCatalog, RateProvider, convert};

/// Runs the pipeline once: collect input, fetch rates, convert.
pub async fn run(
    collector: Arc<dyn InputCollector>,
    provider: &(dyn RateProvider + Send + Sync),
    catalog: &CurrencyCatalog,
) -> Result<Conversion> {
    // Prompts block on the terminal, so keep them off the async workers.
    let prompt_catalog = catalog.clone();
    let request = tokio::task::spawn_blocking(move || collector.collect(&prompt_catalog))
        .await
        .context("Input prompt task failed")??;

    let pb = ui::new_spinner("Fetching exchange rates...")?;
    let fetched = provider.latest().await;
    pb.finish_and_clear();
    let table = fetched?;

    if let Some(published_at) = table.published_at() {
        info!(base = %table.base, %published_at, "Using rates");
    }

    let conversion = convert::convert(&table, &request)?;
    debug!(?conversion, "Conversion complete");
    Ok(conversion)
}
