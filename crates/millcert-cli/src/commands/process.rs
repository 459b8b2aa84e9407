//! Process command - extract one certificate PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use millcert_core::{LogRecord, RunOutcome};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input certificate PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Vendor config file (JSON)
    #[arg(short = 'V', long, required = true)]
    vendor: PathBuf,

    /// Output file for the record list (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show run statistics
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let vendor = super::load_vendor(&args.vendor)?;
    info!(
        "Processing {} as vendor {}",
        args.input.display(),
        vendor.vendor_name
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {}", args.input.display()));

    let pipeline = super::build_pipeline(config)?;
    let outcome = pipeline.process_file(&args.input, &vendor)?;

    pb.finish_with_message("Done");

    let output = format_records(&outcome.records, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else if !output.is_empty() {
        println!("{}", output);
    }

    print_summary(&outcome);
    if args.stats {
        println!();
        println!("{}", serde_json::to_string_pretty(&outcome.statistics)?);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if !outcome.statistics.extraction_success {
        anyhow::bail!("No entries extracted; the document may need better OCR input");
    }
    Ok(())
}

/// One-line run verdict: clean success, partial, or nothing found.
pub fn print_summary(outcome: &RunOutcome) {
    let stats = &outcome.statistics;
    if !stats.extraction_success {
        println!(
            "{} No entries extracted ({} pages, {} failed)",
            style("✗").red(),
            stats.total_pages,
            stats.failed_pages.len()
        );
    } else if stats.partial_extraction {
        println!(
            "{} Partial extraction: {} records, {} of {} pages succeeded, OCR on {:?}",
            style("!").yellow(),
            outcome.records.len(),
            stats.successful_pages,
            stats.total_pages,
            stats.ocr_fallback_pages
        );
    } else {
        println!(
            "{} Extracted {} records from {} pages",
            style("✓").green(),
            outcome.records.len(),
            stats.total_pages
        );
    }
}

pub fn format_records(records: &[LogRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            for record in records {
                wtr.serialize(record)?;
            }
            let data = String::from_utf8(wtr.into_inner()?)?;
            Ok(data)
        }
        OutputFormat::Text => {
            let mut output = String::new();
            for record in records {
                output.push_str(&format!(
                    "#{:<5} {:<15} {:<15} {:<20} page {:>3}  {}\n",
                    record.serial_number,
                    record.plate_no,
                    record.heat_no,
                    record.test_cert_no,
                    record.source_page,
                    record.output_filename.as_deref().unwrap_or("-")
                ));
            }
            Ok(output)
        }
    }
}
