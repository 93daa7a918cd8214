use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use payscan_core::PayscanConfig;

mod commands;

/// Read the payment amount and transaction ID off payment-app screenshots.
#[derive(Parser)]
#[command(name = "payscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from already-recognized text
    Extract(commands::ExtractArgs),

    /// Recognize and extract fields from a screenshot
    Scan(commands::ScanArgs),

    /// Scan screenshots as they are dropped into a share inbox directory
    Watch(commands::WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = PayscanConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract(args) => commands::extract(args),
        Commands::Scan(args) => commands::scan(args, &config).await,
        Commands::Watch(args) => commands::watch(args, &config).await,
    }
}

/// Logs go to stderr; stdout carries only JSON reports.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
