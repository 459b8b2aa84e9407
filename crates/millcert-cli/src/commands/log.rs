//! Log command - query the master log.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use millcert_core::{CsvLogStore, LogRecord, LogStore};

use super::process::OutputFormat;

/// Arguments for the log command.
#[derive(Args)]
pub struct LogArgs {
    /// Only show records for this vendor name
    #[arg(long)]
    vendor: Option<String>,

    /// Only show duplicate records
    #[arg(long)]
    duplicates: bool,

    /// Show only the most recent N records
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: LogArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let store = CsvLogStore::open(&config.log_file)?;

    let mut records: Vec<LogRecord> = store
        .records()?
        .into_iter()
        .filter(|r| {
            args.vendor
                .as_deref()
                .is_none_or(|v| r.vendor.eq_ignore_ascii_case(v))
        })
        .filter(|r| !args.duplicates || r.duplicate_of.is_some())
        .collect();

    if let Some(limit) = args.limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }

    if records.is_empty() {
        println!("{} No matching records", style("ℹ").blue());
        return Ok(());
    }

    let output = super::process::format_records(&records, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
        if matches!(args.format, OutputFormat::Text) {
            println!("{} {} records", style("ℹ").blue(), records.len());
        }
    }

    Ok(())
}
