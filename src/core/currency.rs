//! Supported currencies and their display symbols

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Currency {
    pub code: String,
    pub symbol: String,
}

impl Currency {
    pub fn new(code: &str, symbol: &str) -> Self {
        Currency {
            code: code.trim().to_uppercase(),
            symbol: symbol.to_string(),
        }
    }

    /// Label shown in the selection prompt, e.g. `£ GBP`.
    pub fn label(&self) -> String {
        format!("{} {}", self.symbol, self.code)
    }
}

/// Ordered, read-only list of the currencies a user may pick from.
///
/// Built once at startup and handed to the prompt and the formatter; nothing
/// mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCatalog {
    currencies: Vec<Currency>,
}

impl CurrencyCatalog {
    pub fn new(currencies: Vec<Currency>) -> Result<Self> {
        if currencies.is_empty() {
            bail!("At least one currency must be configured");
        }

        let mut normalised: Vec<Currency> = Vec::with_capacity(currencies.len());
        for currency in currencies {
            let currency = Currency::new(&currency.code, &currency.symbol);
            if currency.code.is_empty() {
                bail!("Currency code must not be empty");
            }
            if normalised.iter().any(|c| c.code == currency.code) {
                bail!("Duplicate currency code: {}", currency.code);
            }
            normalised.push(currency);
        }

        Ok(CurrencyCatalog {
            currencies: normalised,
        })
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn get(&self, code: &str) -> Option<&Currency> {
        let code = code.trim();
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Symbol for `code`, or an empty string for codes outside the catalog.
    pub fn symbol(&self, code: &str) -> &str {
        self.get(code).map_or("", |c| c.symbol.as_str())
    }

    /// Resolves a user-supplied code to its canonical upper-case form.
    pub fn resolve(&self, code: &str) -> Result<String> {
        match self.get(code) {
            Some(currency) => Ok(currency.code.clone()),
            None => bail!(
                "Unsupported currency: {} (expected one of {})",
                code,
                self.codes().join(", ")
            ),
        }
    }

    pub fn codes(&self) -> Vec<&str> {
        self.currencies.iter().map(|c| c.code.as_str()).collect()
    }
}

impl Default for CurrencyCatalog {
    fn default() -> Self {
        CurrencyCatalog {
            currencies: default_currencies(),
        }
    }
}

pub fn default_currencies() -> Vec<Currency> {
    vec![
        Currency::new("AUD", "$"),
        Currency::new("USD", "$"),
        Currency::new("GBP", "£"),
        Currency::new("EUR", "€"),
    ]
}
