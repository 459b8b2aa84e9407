//! Core library for mill test certificate extraction.
//!
//! This crate provides:
//! - PDF processing (per-page text, images, single-page splitting)
//! - OCR fallback for scanned pages
//! - Vendor-config-driven pattern extraction (plate / heat / cert numbers)
//! - Weighted-pattern vendor auto-detection
//! - A deduplicating, append-only master log
//! - The page-by-page pipeline orchestrator

pub mod artifact;
pub mod detect;
pub mod error;
pub mod extract;
pub mod log;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;

pub use artifact::{safe_filename, ArtifactWriter};
pub use detect::{detect_vendor, detection_text, Detection};
pub use error::{MillcertError, Result};
pub use extract::{extract_entries, ExtractionStrategy, Table};
pub use log::{fingerprint, AppendOutcome, CsvLogStore, LogStore};
pub use models::{
    CanonicalField, CompiledVendor, Entry, LogRecord, PipelineConfig, RunStatistics, VendorConfig,
    NOT_AVAILABLE,
};
pub use ocr::OcrBackend;
#[cfg(feature = "native")]
pub use ocr::PureOcrBackend;
pub use pdf::{DocumentSource, PdfDocument};
pub use pipeline::{Pipeline, RunOutcome};
