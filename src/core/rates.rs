//! Exchange rate tables and the provider abstraction

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rates for a set of currencies, all quoted against `base`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateTable {
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl RateTable {
    pub fn new(base: &str, rates: HashMap<String, f64>) -> Self {
        RateTable {
            disclaimer: None,
            license: None,
            timestamp: None,
            base: base.to_string(),
            rates,
        }
    }

    /// Rate for `code`. Absent, zero and non-finite rates are errors since
    /// any of them would turn the conversion ratio into 0, inf or NaN.
    pub fn rate(&self, code: &str) -> Result<f64> {
        let rate = *self.rates.get(code).ok_or_else(|| {
            anyhow!(
                "No exchange rate for {} in rate table (base {})",
                code,
                self.base
            )
        })?;

        if rate == 0.0 || !rate.is_finite() {
            bail!("Invalid exchange rate for {}: {}", code, rate);
        }
        Ok(rate)
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn latest(&self) -> Result<RateTable>;
}
