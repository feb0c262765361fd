//! tickertape entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Live stock ticker over a growing quote feed file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via TAPE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Quote feed file to follow (overrides config)
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Portfolio CSV path (overrides config)
    #[arg(long)]
    portfolio: Option<PathBuf>,

    /// Output format: txt, csv or html (overrides config)
    #[arg(short, long)]
    format: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tape_ticker::init_logging();

    info!("Starting tickertape v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > TAPE_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("TAPE_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    let mut config = tape_ticker::TickerConfig::load(&config_path)?;
    if let Some(feed) = args.feed {
        config.feed = Some(feed);
    }
    if let Some(portfolio) = args.portfolio {
        config.portfolio = Some(portfolio);
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    info!(
        feed = ?config.feed,
        portfolio = ?config.portfolio,
        format = %config.format,
        "Configuration loaded"
    );

    let ticker = tape_ticker::Ticker::new(config)?;
    ticker.run().await?;

    Ok(())
}
