//! Line-scanning strategy for fragmented OCR output and mixed-script
//! certificates.
//!
//! Certificates from some mills interleave non-Latin label text with the
//! Latin values (`Certificate No.证书号: HR2023060813`), and OCR output
//! often splits labels and values across short lines. This strategy scans
//! the text line by line (or globally, per field `match_type`), honoring
//! `share_value` so one heat or certificate number covers every entry on
//! the page.

use crate::models::record::{Entry, NOT_AVAILABLE};
use crate::models::vendor::{CanonicalField, CompiledVendor, MatchType};

use super::{capture_value, ExtractionStrategy, Table};

/// Whether the page text calls for line scanning.
///
/// True for mixed non-Latin/Latin script, or for fragmentation signatures
/// (a meaningful share of very short lines).
pub fn needs_line_scan(text: &str) -> bool {
    has_mixed_script(text) || is_fragmented(text)
}

fn has_mixed_script(text: &str) -> bool {
    let has_non_latin = text.chars().any(is_non_latin_script);
    let has_latin = text.chars().any(|c| c.is_ascii_alphanumeric());
    has_non_latin && has_latin
}

fn is_non_latin_script(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}'   // CJK extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK unified
        | '\u{3040}'..='\u{30FF}' // Hiragana, Katakana
        | '\u{AC00}'..='\u{D7AF}' // Hangul
        | '\u{0400}'..='\u{04FF}' // Cyrillic
    )
}

fn is_fragmented(text: &str) -> bool {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 8 {
        return false;
    }
    let short = lines
        .iter()
        .filter(|l| l.chars().count() <= 3)
        .count();
    // 30% or more isolated short lines reads as fragmented OCR output.
    short * 10 >= lines.len() * 3
}

/// Per-field line scanning with value sharing.
pub struct LineScanStrategy;

impl ExtractionStrategy for LineScanStrategy {
    fn name(&self) -> &'static str {
        "line-scan"
    }

    fn extract(
        &self,
        text: &str,
        _tables: Option<&[Table]>,
        vendor: &CompiledVendor,
    ) -> Vec<Entry> {
        let mut plate_vals: Vec<String> = Vec::new();
        let mut heat_vals: Vec<String> = Vec::new();
        let mut cert_vals: Vec<String> = Vec::new();
        let mut shared_heat: Option<String> = None;
        let mut shared_cert: Option<String> = None;
        let mut any_match = false;

        for field in &vendor.fields {
            let values: Vec<String> = match field.match_type {
                MatchType::LineByLine => text
                    .lines()
                    .flat_map(|line| field.regex.captures_iter(line).collect::<Vec<_>>())
                    .map(|c| capture_value(&c).trim().to_string())
                    .collect(),
                MatchType::Global => field
                    .regex
                    .captures_iter(text)
                    .map(|c| capture_value(&c).trim().to_string())
                    .collect(),
            };

            if values.is_empty() {
                continue;
            }
            any_match = true;

            match field.canonical {
                Some(CanonicalField::Plate) => plate_vals.extend(values),
                Some(CanonicalField::Heat) => {
                    if field.share_value && shared_heat.is_none() {
                        shared_heat = values.first().cloned();
                    }
                    heat_vals.extend(values);
                }
                Some(CanonicalField::Cert) => {
                    if field.share_value && shared_cert.is_none() {
                        shared_cert = values.first().cloned();
                    }
                    cert_vals.extend(values);
                }
                None => {}
            }
        }

        // One entry per plate; without plates, multi_match may still emit
        // a single entry from whatever matched.
        let mut plates = plate_vals;
        if plates.is_empty() && vendor.multi_match && any_match {
            plates.push(NOT_AVAILABLE.to_string());
        }

        plates
            .iter()
            .map(|plate| {
                let heat = shared_heat.as_deref().or(heat_vals.first().map(String::as_str));
                let cert = shared_cert.as_deref().or(cert_vals.first().map(String::as_str));
                Entry::new(Some(plate), heat, cert)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_vendor;
    use pretty_assertions::assert_eq;

    fn vendor() -> CompiledVendor {
        test_vendor(
            r#"{"vendor_id": "hengrun", "vendor_name": "Hengrun Steel",
                "fields": {
                    "PART_NO": {"pattern": "\\b(6-\\d{4})\\b", "match_type": "line_by_line"},
                    "HEAT_NO": {"pattern": "(S\\d{8}[A-Z]{2})", "share_value": true},
                    "CERTIFICATE_NO": {"pattern": "(HR\\d{10})", "share_value": true}
                }}"#,
        )
    }

    #[test]
    fn test_mixed_script_detection() {
        assert!(needs_line_scan("Certificate No.证书号: HR2023060813"));
        assert!(!needs_line_scan("Certificate No: ABC-001"));
        // Non-Latin alone, no Latin values: nothing for patterns to find.
        assert!(!needs_line_scan("证书号 炉号"));
    }

    #[test]
    fn test_fragmentation_detection() {
        let fragmented = "PP1\nNo\n.\nSU\n1\nvalue goes here\nX\n:\nY\nZ";
        assert!(needs_line_scan(fragmented));

        let normal = "Certificate No: ABC-001\nPart No: PP100 Heat No: SU200";
        assert!(!needs_line_scan(normal));
    }

    #[test]
    fn test_shared_values_cover_all_entries() {
        let text = "产品质量证明书\nCertificate No.证书号: HR2023060813\n\
                    6-0003 | φ3916*φ3608*160 | S12304003QX\n\
                    6-0002 | φ3916*φ3608*160 | S12304003QX";
        let entries = LineScanStrategy.extract(text, None, &vendor());

        assert_eq!(
            entries,
            vec![
                Entry::new(Some("6-0003"), Some("S12304003QX"), Some("HR2023060813")),
                Entry::new(Some("6-0002"), Some("S12304003QX"), Some("HR2023060813")),
            ]
        );
    }

    #[test]
    fn test_multi_match_emits_single_entry_without_plates() {
        let mut v = vendor();
        v.multi_match = true;
        let text = "Certificate No.证书号: HR2023060813";
        let entries = LineScanStrategy.extract(text, None, &v);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].plate_no, NOT_AVAILABLE);
        assert_eq!(entries[0].test_cert_no, "HR2023060813");
    }

    #[test]
    fn test_no_matches_yields_nothing() {
        assert!(LineScanStrategy
            .extract("nothing relevant", None, &vendor())
            .is_empty());
    }
}
