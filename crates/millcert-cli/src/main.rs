//! CLI application for mill test certificate extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, log, process, vendors};

/// Mill certificate extractor - split and index steel test certificates
#[derive(Parser)]
#[command(name = "millcert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to pipeline config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single certificate PDF
    Process(process::ProcessArgs),

    /// Process multiple certificate PDFs
    Batch(batch::BatchArgs),

    /// Inspect, validate, and auto-detect vendor configurations
    Vendors(vendors::VendorsArgs),

    /// Query the master log
    Log(log::LogArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Vendors(args) => vendors::run(args, cli.config.as_deref()).await,
        Commands::Log(args) => log::run(args, cli.config.as_deref()).await,
    }
}
