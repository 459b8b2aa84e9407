//! Table-cell-driven extraction for vendors with reliable table layouts.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::{capture_value, ExtractionStrategy, Table};
use crate::models::record::Entry;
use crate::models::vendor::{CanonicalField, CompiledVendor};

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Row-wise cell matching.
///
/// A row yields an entry only when both a plate-matching cell and a
/// heat-matching cell are found in it. The certificate number is taken
/// once per page (first match in the full page text) and applied to every
/// row-derived entry.
pub struct TableStrategy;

impl ExtractionStrategy for TableStrategy {
    fn name(&self) -> &'static str {
        "table"
    }

    fn extract(
        &self,
        text: &str,
        tables: Option<&[Table]>,
        vendor: &CompiledVendor,
    ) -> Vec<Entry> {
        let Some(tables) = tables else {
            return Vec::new();
        };

        let cert_no = vendor
            .field(CanonicalField::Cert)
            .regex
            .captures(text)
            .map(|c| capture_value(&c).to_string());

        let plate_re = &vendor.field(CanonicalField::Plate).regex;
        let heat_re = &vendor.field(CanonicalField::Heat).regex;

        let mut entries = Vec::new();
        for table in tables {
            for row in table {
                let plate = row.iter().find(|cell| plate_re.is_match(cell));
                let heat = row.iter().find(|cell| heat_re.is_match(cell));
                if let (Some(plate), Some(heat)) = (plate, heat) {
                    entries.push(Entry::new(
                        Some(plate),
                        Some(heat),
                        cert_no.as_deref(),
                    ));
                }
            }
        }

        debug!(
            "Table extraction: {} entries from {} tables",
            entries.len(),
            tables.len()
        );
        entries
    }
}

/// Reconstruct tables from page text.
///
/// A table row is a line splitting into two or more cells on pipes, tabs,
/// or runs of two or more spaces; two or more consecutive such lines form
/// a table.
pub fn detect_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Table = Vec::new();

    for line in text.lines() {
        let cells = split_row(line);
        if cells.len() >= 2 {
            current.push(cells);
        } else if !current.is_empty() {
            if current.len() >= 2 {
                tables.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.len() >= 2 {
        tables.push(current);
    }
    tables
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    let raw: Vec<&str> = if line.contains('|') {
        line.split('|').collect()
    } else if line.contains('\t') {
        line.split('\t').collect()
    } else {
        MULTI_SPACE.split(line).collect()
    };

    raw.into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
