//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root directory for per-vendor split-page output.
    pub output_root: PathBuf,

    /// Path of the master log file.
    pub log_file: PathBuf,

    /// Directory containing OCR model files.
    pub model_dir: PathBuf,

    /// Minimum stripped text length before OCR fallback kicks in.
    /// Exactly this many characters does not trigger OCR.
    pub min_text_length: usize,

    /// DPI for rendering pages to images for OCR.
    pub render_dpi: u32,

    /// Bounded retries on a log write conflict before the entry's page
    /// degrades to failed.
    pub log_retry_limit: u32,

    /// Write the split page even for strict duplicates. Off by default:
    /// duplicates are always logged but redundant artifact I/O is skipped.
    pub write_duplicate_artifacts: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("extracted_output"),
            log_file: PathBuf::from("logs/master_log.csv"),
            model_dir: PathBuf::from("models"),
            min_text_length: 50,
            render_dpi: 300,
            log_retry_limit: 3,
            write_duplicate_artifacts: false,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
