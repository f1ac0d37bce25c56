use anyhow::{Result, anyhow};
use tracing::debug;

use super::currency::CurrencyCatalog;
use super::rates::RateTable;

pub const INVALID_AMOUNT_MESSAGE: &str = "Please enter a number, eg. 3.50";

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub request: ConversionRequest,
    pub ratio: f64,
    pub converted: f64,
}

/// Parses amount text as a base-10 float. Sign and magnitude are not bounded,
/// but text that overflows `f64` is rejected rather than read as infinity.
pub fn parse_amount(text: &str) -> Result<f64> {
    let amount = text
        .parse::<f64>()
        .map_err(|_| anyhow!(INVALID_AMOUNT_MESSAGE))?;

    if !amount.is_finite() && !spells_non_finite(text) {
        return Err(anyhow!(INVALID_AMOUNT_MESSAGE));
    }
    Ok(amount)
}

fn spells_non_finite(text: &str) -> bool {
    let unsigned = text.trim_start_matches(['+', '-']);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|word| unsigned.eq_ignore_ascii_case(word))
}

pub fn convert(table: &RateTable, request: &ConversionRequest) -> Result<Conversion> {
    let from_rate = table.rate(&request.from)?;
    let to_rate = table.rate(&request.to)?;
    let ratio = to_rate / from_rate;

    debug!(
        from = %request.from,
        to = %request.to,
        from_rate,
        to_rate,
        ratio,
        "Computed conversion ratio"
    );

    Ok(Conversion {
        request: request.clone(),
        ratio,
        converted: request.amount * ratio,
    })
}

impl Conversion {
    /// `$10.00 USD converts to $15.00 AUD`
    pub fn describe(&self, catalog: &CurrencyCatalog) -> String {
        let ConversionRequest { from, to, amount } = &self.request;
        format!(
            "{}{:.2} {} converts to {}{:.2} {}",
            catalog.symbol(from),
            amount,
            from,
            catalog.symbol(to),
            self.converted,
            to
        )
    }
}
