//! Core data model: extracted entries, durable log records, run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vendor::CanonicalField;

/// Sentinel for a field value that could not be extracted.
pub const NOT_AVAILABLE: &str = "NA";

/// One candidate certified item found on one page.
///
/// Ephemeral: lives only within one page's processing, consumed by the
/// dedup log and the artifact writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub plate_no: String,
    pub heat_no: String,
    pub test_cert_no: String,
}

impl Entry {
    /// Build an entry from optional raw values. Values are trimmed;
    /// missing values become [`NOT_AVAILABLE`].
    pub fn new(plate_no: Option<&str>, heat_no: Option<&str>, test_cert_no: Option<&str>) -> Self {
        fn norm(value: Option<&str>) -> String {
            match value.map(str::trim) {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => NOT_AVAILABLE.to_string(),
            }
        }
        Self {
            plate_no: norm(plate_no),
            heat_no: norm(heat_no),
            test_cert_no: norm(test_cert_no),
        }
    }

    /// Value for a canonical field.
    pub fn value(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::Plate => &self.plate_no,
            CanonicalField::Heat => &self.heat_no,
            CanonicalField::Cert => &self.test_cert_no,
        }
    }
}

/// The durable, append-only unit written per accepted entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Monotonically increasing serial, assigned at append time.
    pub serial_number: u64,
    /// Vendor display name.
    pub vendor: String,
    pub plate_no: String,
    pub heat_no: String,
    pub test_cert_no: String,
    /// Split-page filename, `None` when the write was skipped or failed.
    pub output_filename: Option<String>,
    /// 1-based source page number.
    pub source_page: u32,
    /// Basename of the source PDF.
    pub source_pdf: String,
    /// Append timestamp.
    pub created_at: DateTime<Utc>,
    /// Content fingerprint over vendor id + the three field values.
    pub content_hash: String,
    /// Serial of the first record with the same fingerprint, if any.
    pub duplicate_of: Option<u64>,
    /// Whether OCR fallback produced this page's text.
    pub ocr_used: bool,
}

/// Per-page outcome, used only for statistics aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageExtractionResult {
    /// 1-based page number.
    pub page_number: u32,
    pub used_ocr: bool,
    pub entry_count: usize,
    pub failed: bool,
}

/// Aggregated statistics over one pipeline invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub total_pages: u32,
    pub successful_pages: u32,
    /// 1-based page numbers that went through OCR fallback.
    pub ocr_fallback_pages: Vec<u32>,
    /// 1-based page numbers that produced nothing or errored.
    pub failed_pages: Vec<u32>,
    /// At least one entry was produced.
    pub extraction_success: bool,
    /// At least one entry was produced AND at least one OCR fallback or
    /// page failure occurred.
    pub partial_extraction: bool,
}

impl RunStatistics {
    /// Fold one page outcome into the statistics.
    ///
    /// A failed page counts only as failed, even when OCR ran on it;
    /// `ocr_fallback_pages` lists pages that succeeded via OCR.
    pub fn record_page(&mut self, page: &PageExtractionResult) {
        if page.failed {
            self.failed_pages.push(page.page_number);
        } else if page.used_ocr {
            self.ocr_fallback_pages.push(page.page_number);
        }
    }

    /// Finalize derived counters once all pages are folded in.
    pub fn finalize(&mut self, total_pages: u32, accepted_records: usize) {
        self.total_pages = total_pages;
        self.successful_pages = total_pages - self.failed_pages.len() as u32;
        self.extraction_success = accepted_records > 0;
        self.partial_extraction = self.extraction_success
            && (!self.ocr_fallback_pages.is_empty() || !self.failed_pages.is_empty());
    }
}
