//! Default proximity strategy: certificate-scoped blocks with positional
//! fallback.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{capture_value, ExtractionStrategy, Table};
use crate::models::record::Entry;
use crate::models::vendor::{CanonicalField, CompiledVendor};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Certificate-number-scoped extraction.
///
/// Every certificate match opens a text block running to the next
/// certificate match (or end of text). Within each block, whitespace is
/// normalized and the vendor's combined `plate ... heat` pattern pairs the
/// two values; every pair inherits the block's certificate number. When no
/// certificate matches anywhere, plate and heat matches are paired
/// positionally with the certificate left unavailable.
pub struct ProximityStrategy;

impl ExtractionStrategy for ProximityStrategy {
    fn name(&self) -> &'static str {
        "proximity"
    }

    fn extract(
        &self,
        text: &str,
        _tables: Option<&[Table]>,
        vendor: &CompiledVendor,
    ) -> Vec<Entry> {
        let cert_re = &vendor.field(CanonicalField::Cert).regex;
        let cert_matches: Vec<regex::Captures> = cert_re.captures_iter(text).collect();

        if cert_matches.is_empty() {
            return positional_fallback(text, vendor);
        }

        let mut entries = Vec::new();
        for (idx, caps) in cert_matches.iter().enumerate() {
            let cert_no = capture_value(caps);
            let start = caps.get(0).map(|m| m.end()).unwrap_or(0);
            let end = cert_matches
                .get(idx + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(text.len());
            let block = &text[start..end];

            // Normalize whitespace so label/value pairs split across
            // lines still match.
            let normalized = WHITESPACE.replace_all(block, " ");
            for pair in vendor.pair.captures_iter(&normalized) {
                entries.push(Entry::new(
                    pair.name("plate").map(|m| m.as_str()),
                    pair.name("heat").map(|m| m.as_str()),
                    Some(cert_no),
                ));
            }
        }
        entries
    }
}

/// Pair plate and heat matches by index when no certificate is present.
fn positional_fallback(text: &str, vendor: &CompiledVendor) -> Vec<Entry> {
    let plates: Vec<String> = vendor
        .field(CanonicalField::Plate)
        .regex
        .captures_iter(text)
        .map(|c| capture_value(&c).to_string())
        .collect();
    let heats: Vec<String> = vendor
        .field(CanonicalField::Heat)
        .regex
        .captures_iter(text)
        .map(|c| capture_value(&c).to_string())
        .collect();

    let count = plates.len().max(heats.len());
    if count > 0 {
        debug!(
            "No certificate match; pairing {} plates with {} heats positionally",
            plates.len(),
            heats.len()
        );
    }

    (0..count)
        .map(|i| {
            Entry::new(
                plates.get(i).map(String::as_str),
                heats.get(i).map(String::as_str),
                None,
            )
        })
        .collect()
}
