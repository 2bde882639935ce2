//! Trading mentor - conversational day trading assistant
//!
#![doc = "Main entry point for the trading mentor CLI."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trading_mentor::cli::{Cli, Commands};
use trading_mentor::commands;
use trading_mentor::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    config.validate()?;

    match cli.command {
        Commands::Chat => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask { prompt } => {
            tracing::debug!("Using prompt: {}", prompt);
            commands::ask::run_ask(config, prompt).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so replies on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "trading_mentor=debug"
    } else {
        "trading_mentor=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
