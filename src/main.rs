use anyhow::Result;
use cashconv::cli::InputArgs;
use cashconv::cli::ui::{StyleType, style_text};
use cashconv::core::log::init_logging;
use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Currency to convert from, e.g. USD (skips the prompt)
    #[arg(long)]
    from: Option<String>,

    /// Currency to convert to, e.g. AUD (skips the prompt)
    #[arg(long)]
    to: Option<String>,

    /// Amount to convert, e.g. 3.50 (skips the prompt)
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Best effort: a missing or unparsable .env is ignored.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let input = InputArgs {
        from: cli.from,
        to: cli.to,
        amount: cli.amount,
    };

    let line = cashconv::run(cli.config_path.as_deref(), input)
        .await
        .inspect_err(|e| tracing::error!(error = %format!("{e:#}"), "Application failed"))?;

    println!("{}", style_text(&line, StyleType::Result));
    Ok(())
}
