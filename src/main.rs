#![forbid(unsafe_code)]

mod barcode;
mod config;
mod constants;
mod crash;
mod gui;
mod increment;
mod rules;
mod session;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::ConfigStore;

/// Render Code 128, QR and Data Matrix symbols from typed rules
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the per-user default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error (falls back to LOG_LEVEL, then info)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Start minimized to the tray
    #[arg(long)]
    start_hidden: bool,
}

fn parse_level(value: &str) -> TraceLevel {
    match value.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .map(|v| parse_level(&v))
        .unwrap_or(TraceLevel::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    crash::install_panic_hook();

    let store = match cli.config {
        Some(path) => ConfigStore::at(path),
        None => ConfigStore::new(),
    };
    info!(path = %store.path().display(), "Using config file");

    gui::run_gui(store, cli.start_hidden)
}
