//! Pattern Extraction Engine.
//!
//! Turns page text (and, for table-oriented vendors, reconstructed table
//! rows) into candidate [`Entry`] values using the vendor's compiled
//! patterns. Strategy selection is driven by configuration data and text
//! shape, never by vendor identity:
//!
//! 1. [`TableStrategy`] when the vendor declares `table_extraction` and
//!    table rows are available; its entries are final for the page.
//! 2. [`LineScanStrategy`] when the text mixes non-Latin and Latin script
//!    or shows OCR fragmentation signatures.
//! 3. [`ProximityStrategy`] otherwise: certificate-scoped blocks with a
//!    positional plate/heat fallback.

pub mod linescan;
pub mod proximity;
pub mod table;

pub use linescan::LineScanStrategy;
pub use proximity::ProximityStrategy;
pub use table::{detect_tables, TableStrategy};

use tracing::debug;

use crate::models::record::Entry;
use crate::models::vendor::CompiledVendor;

/// A reconstructed table: rows of trimmed cell strings.
pub type Table = Vec<Vec<String>>;

/// One extraction strategy.
pub trait ExtractionStrategy {
    /// Name for logging.
    fn name(&self) -> &'static str;

    /// Produce zero or more entries from the page.
    fn extract(&self, text: &str, tables: Option<&[Table]>, vendor: &CompiledVendor)
        -> Vec<Entry>;
}

/// Extract all entries from one page of text.
///
/// Runs the selected strategies in order and returns the first non-empty
/// result; an empty result means the caller decides between OCR retry and
/// marking the page failed.
pub fn extract_entries(
    text: &str,
    tables: Option<&[Table]>,
    vendor: &CompiledVendor,
) -> Vec<Entry> {
    for strategy in select_strategies(text, tables.is_some_and(|t| !t.is_empty()), vendor) {
        let entries = strategy.extract(text, tables, vendor);
        if !entries.is_empty() {
            debug!(
                "{} strategy extracted {} entries",
                strategy.name(),
                entries.len()
            );
            return entries;
        }
    }
    Vec::new()
}

/// Build the ordered strategy list for a page.
pub fn select_strategies(
    text: &str,
    has_tables: bool,
    vendor: &CompiledVendor,
) -> Vec<Box<dyn ExtractionStrategy>> {
    let mut strategies: Vec<Box<dyn ExtractionStrategy>> = Vec::new();
    if vendor.table_extraction && has_tables {
        strategies.push(Box::new(TableStrategy));
    }
    if linescan::needs_line_scan(text) {
        strategies.push(Box::new(LineScanStrategy));
    }
    strategies.push(Box::new(ProximityStrategy));
    strategies
}

/// Value of a match: first capture group when the pattern declares one,
/// the whole match otherwise.
pub(crate) fn capture_value<'t>(caps: &regex::Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn test_vendor(json: &str) -> CompiledVendor {
    let config: crate::models::vendor::VendorConfig = serde_json::from_str(json).unwrap();
    config.compile().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vendor() -> CompiledVendor {
        test_vendor(
            r#"{"vendor_id": "jsw", "vendor_name": "JSW Steel",
                "fields": {"PLATE_NO": "PP\\d+", "HEAT_NO": "SU\\d+",
                           "TEST_CERT_NO": "ABC-\\d+"}}"#,
        )
    }

    #[test]
    fn test_end_to_end_two_entry_page() {
        let text = "Certificate No: ABC-001\nPart No: PP100 Heat No: SU200\nPart No: PP101 Heat No: SU201";
        let entries = extract_entries(text, None, &vendor());

        assert_eq!(
            entries,
            vec![
                Entry::new(Some("PP100"), Some("SU200"), Some("ABC-001")),
                Entry::new(Some("PP101"), Some("SU201"), Some("ABC-001")),
            ]
        );
    }

    #[test]
    fn test_capture_value_prefers_group() {
        let re = regex::Regex::new(r"No[.:]\s*(\w+)").unwrap();
        let caps = re.captures("Cert No: X123").unwrap();
        assert_eq!(capture_value(&caps), "X123");

        let re = regex::Regex::new(r"X\d+").unwrap();
        let caps = re.captures("Cert No: X123").unwrap();
        assert_eq!(capture_value(&caps), "X123");
    }

    #[test]
    fn test_table_strategy_selected_by_capability_flag() {
        let mut v = vendor();
        let strategies = select_strategies("text", true, &v);
        assert!(!strategies.iter().any(|s| s.name() == "table"));

        v.table_extraction = true;
        let strategies = select_strategies("text", true, &v);
        assert_eq!(strategies[0].name(), "table");

        // No tables on the page: capability alone is not enough.
        let strategies = select_strategies("text", false, &v);
        assert!(!strategies.iter().any(|s| s.name() == "table"));
    }
}
