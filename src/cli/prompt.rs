use anyhow::{Context, Result, bail};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use tracing::debug;

use crate::core::convert::{INVALID_AMOUNT_MESSAGE, parse_amount};
use crate::core::{ConversionRequest, Currency, CurrencyCatalog};

/// Values given on the command line. Each one present skips its prompt.
#[derive(Debug, Clone, Default)]
pub struct InputArgs {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
}

pub trait InputCollector: Send + Sync {
    fn collect(&self, catalog: &CurrencyCatalog) -> Result<ConversionRequest>;
}

/// Collects a conversion request from the terminal, using any values
/// supplied as arguments instead of asking for them.
pub struct TerminalPrompt {
    args: InputArgs,
}

impl TerminalPrompt {
    pub fn new(args: InputArgs) -> Self {
        TerminalPrompt { args }
    }
}

impl InputCollector for TerminalPrompt {
    fn collect(&self, catalog: &CurrencyCatalog) -> Result<ConversionRequest> {
        // Reject bad arguments before the user is asked anything.
        let from = self
            .args
            .from
            .as_deref()
            .map(|code| catalog.resolve(code))
            .transpose()?;
        let to = self
            .args
            .to
            .as_deref()
            .map(|code| catalog.resolve(code))
            .transpose()?;
        let amount = self
            .args
            .amount
            .as_deref()
            .map(|text| parse_amount(text).with_context(|| format!("Invalid amount: {text}")))
            .transpose()?;

        let from = match from {
            Some(code) => code,
            None => select_currency(catalog, "From currency:")?,
        };
        let to = match to {
            Some(code) => code,
            None => select_currency(catalog, "To currency:")?,
        };
        let amount = match amount {
            Some(amount) => amount,
            None => prompt_amount()?,
        };

        let request = ConversionRequest { from, to, amount };
        debug!(?request, "Collected conversion request");
        Ok(request)
    }
}

fn select_currency(catalog: &CurrencyCatalog, prompt: &str) -> Result<String> {
    let items: Vec<String> = catalog.currencies().iter().map(Currency::label).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact_opt()
        .context("Currency selection failed")?;

    match selection {
        Some(index) => Ok(catalog.currencies()[index].code.clone()),
        None => bail!("Currency selection cancelled"),
    }
}

fn prompt_amount() -> Result<f64> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Amount to convert")
        .validate_with(|input: &String| -> Result<(), &str> {
            parse_amount(input)
                .map(|_| ())
                .map_err(|_| INVALID_AMOUNT_MESSAGE)
        })
        .interact_text()
        .context("Amount entry failed")?;

    parse_amount(&text)
}
