//! Vendors command - list, validate, and auto-detect vendor configurations.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use millcert_core::detect::{detect_vendor, detection_text, DETECT_THRESHOLD};
use millcert_core::{CompiledVendor, PdfDocument, VendorConfig};

/// Arguments for the vendors command.
#[derive(Args)]
pub struct VendorsArgs {
    #[command(subcommand)]
    command: VendorsCommand,
}

#[derive(Subcommand)]
enum VendorsCommand {
    /// List vendor configs and their fields
    List {
        /// Vendor config file or directory of config files
        #[arg(required = true)]
        path: PathBuf,

        /// Compile every pattern and fail on the first invalid config
        #[arg(long)]
        validate: bool,
    },

    /// Identify which vendor a certificate PDF belongs to
    Detect {
        /// Input PDF file
        #[arg(required = true)]
        pdf: PathBuf,

        /// Vendor config file or directory of config files
        #[arg(short = 'V', long, required = true)]
        vendors: PathBuf,
    },
}

pub async fn run(args: VendorsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        VendorsCommand::List { path, validate } => list(&path, validate),
        VendorsCommand::Detect { pdf, vendors } => detect(&pdf, &vendors, config_path),
    }
}

fn list(path: &PathBuf, validate: bool) -> anyhow::Result<()> {
    let files = collect_config_files(path)?;
    if files.is_empty() {
        anyhow::bail!("No vendor config files found at {}", path.display());
    }

    let mut invalid = 0usize;
    for file in &files {
        debug!("Reading vendor config {}", file.display());
        let config = VendorConfig::from_file(file)?;

        match config.compile() {
            Ok(vendor) => {
                let fields: Vec<&str> = vendor.fields.iter().map(|f| f.name.as_str()).collect();
                println!(
                    "{} {:<12} {:<24} table={:<5} fields: {}",
                    style("✓").green(),
                    vendor.vendor_id,
                    vendor.vendor_name,
                    vendor.table_extraction,
                    fields.join(", ")
                );
            }
            Err(e) => {
                invalid += 1;
                println!("{} {}: {}", style("✗").red(), file.display(), e);
                if validate {
                    anyhow::bail!("Invalid vendor config {}: {}", file.display(), e);
                }
            }
        }
    }

    println!();
    println!(
        "{} {} configs, {} invalid",
        style("ℹ").blue(),
        files.len(),
        invalid
    );
    Ok(())
}

fn detect(pdf: &PathBuf, vendors: &PathBuf, config_path: Option<&str>) -> anyhow::Result<()> {
    let files = collect_config_files(vendors)?;
    if files.is_empty() {
        anyhow::bail!("No vendor config files found at {}", vendors.display());
    }
    let compiled: Vec<CompiledVendor> = files
        .iter()
        .map(|file| super::load_vendor(file))
        .collect::<anyhow::Result<_>>()?;

    let config = super::load_config(config_path)?;
    let ocr = super::load_ocr_backend(&config);
    let document = PdfDocument::open(pdf)?;
    let text = detection_text(
        &document,
        ocr.as_deref(),
        config.min_text_length,
        config.render_dpi,
    );

    match detect_vendor(&compiled, &text) {
        Some(hit) => {
            println!(
                "{} {} ({}) confidence {:.2}",
                style("✓").green(),
                hit.vendor_name,
                hit.vendor_id,
                hit.confidence
            );
            Ok(())
        }
        None => {
            println!(
                "{} No vendor matched {} (threshold {:.2})",
                style("✗").red(),
                pdf.display(),
                DETECT_THRESHOLD
            );
            anyhow::bail!("Vendor detection failed for {}", pdf.display());
        }
    }
}

fn collect_config_files(path: &PathBuf) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.clone()]);
    }
    if !path.is_dir() {
        anyhow::bail!("Path not found: {}", path.display());
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    Ok(files)
}
