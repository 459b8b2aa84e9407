//! Vendor auto-detection from document text.
//!
//! Scores each compiled vendor's detection patterns against the first
//! few pages of a document and picks the best vendor above a confidence
//! threshold. Scoring favors multiple distinct matches and normalizes
//! away the advantage of very long documents.

use tracing::{debug, warn};

use crate::models::CompiledVendor;
use crate::ocr::OcrBackend;
use crate::pdf::DocumentSource;

/// Minimum confidence for a detection verdict.
pub const DETECT_THRESHOLD: f32 = 0.4;

/// Pages sampled for detection text.
pub const DETECT_PAGE_LIMIT: u32 = 3;

/// A scored detection candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// `vendor_id` of the matched config.
    pub vendor_id: String,
    /// Human-readable vendor name.
    pub vendor_name: String,
    /// Confidence in `0.0..=1.0`.
    pub confidence: f32,
}

/// Collect detection text from the first [`DETECT_PAGE_LIMIT`] pages.
///
/// Native text is used per page; pages whose stripped text falls below
/// `min_text_length` fall back to OCR when a backend is available. Page
/// failures degrade to empty text, matching the pipeline's acquisition
/// behavior.
pub fn detection_text(
    source: &dyn DocumentSource,
    ocr: Option<&dyn OcrBackend>,
    min_text_length: usize,
    render_dpi: u32,
) -> String {
    let pages = source.page_count().min(DETECT_PAGE_LIMIT);
    let mut text = String::new();

    for page in 1..=pages {
        let native = match source.page_text(page) {
            Ok(native) => native,
            Err(e) => {
                warn!(page, error = %e, "detection text extraction failed, skipping page");
                continue;
            }
        };
        if native.trim().chars().count() >= min_text_length {
            text.push_str(&native);
            text.push('\n');
            continue;
        }

        let Some(backend) = ocr else {
            text.push_str(&native);
            text.push('\n');
            continue;
        };
        match source
            .render_page(page, render_dpi)
            .map_err(|e| e.to_string())
            .and_then(|image| backend.recognize(&image).map_err(|e| e.to_string()))
        {
            Ok(recognized) => {
                text.push_str(&recognized);
                text.push('\n');
            }
            Err(error) => {
                warn!(page, error, "detection OCR failed, using native text");
                text.push_str(&native);
                text.push('\n');
            }
        }
    }

    text
}

/// Score one vendor's detection patterns against document text.
///
/// Each pattern contributes `weight * matches`; negative weights lower
/// the score. A vendor with no positive-pattern match scores zero. More
/// than one positive match earns a 1.2x bonus, long documents are
/// normalized by `1000 / len`, and the result is clamped to `0.0..=1.0`.
pub fn score_vendor(vendor: &CompiledVendor, text: &str) -> f32 {
    let mut score = 0.0f32;
    let mut positive_matches = 0usize;

    for detect in &vendor.detect {
        let matches = detect.regex.find_iter(text).count();
        if matches == 0 {
            continue;
        }
        score += detect.weight * matches as f32;
        if detect.weight > 0.0 {
            positive_matches += matches;
        }
    }

    if positive_matches == 0 {
        return 0.0;
    }
    if positive_matches > 1 {
        score *= 1.2;
    }
    let len = text.chars().count();
    if len > 1000 {
        score *= 1000.0 / len as f32;
    }
    score.clamp(0.0, 1.0)
}

/// Pick the best-scoring vendor above [`DETECT_THRESHOLD`].
///
/// Returns `None` when no vendor reaches the threshold.
pub fn detect_vendor(vendors: &[CompiledVendor], text: &str) -> Option<Detection> {
    vendors
        .iter()
        .map(|vendor| {
            let confidence = score_vendor(vendor, text);
            debug!(vendor_id = %vendor.vendor_id, confidence, "scored vendor");
            Detection {
                vendor_id: vendor.vendor_id.clone(),
                vendor_name: vendor.vendor_name.clone(),
                confidence,
            }
        })
        .filter(|d| d.confidence >= DETECT_THRESHOLD)
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
