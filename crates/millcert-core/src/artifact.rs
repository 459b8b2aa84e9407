//! Split-page artifact writer.
//!
//! Writes one single-page PDF per accepted entry under a vendor-derived
//! directory, named from the entry's field values in the vendor config's
//! declared field order.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::ArtifactError;
use crate::models::record::Entry;
use crate::models::vendor::CompiledVendor;
use crate::pdf::DocumentSource;

type Result<T> = std::result::Result<T, ArtifactError>;

lazy_static! {
    /// Characters that cannot appear in a filename on any supported
    /// platform, collapsed runs included.
    static ref UNSAFE_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*\n\r\t]+"#).unwrap();
}

/// Replace path-hostile characters with `_` and trim the result.
pub fn safe_filename(raw: &str) -> String {
    UNSAFE_CHARS
        .replace_all(raw, "_")
        .trim_matches(|c: char| c == '_' || c.is_whitespace())
        .to_string()
}

/// Writes split single-page PDFs under a configured output root.
pub struct ArtifactWriter {
    output_root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// The directory artifacts for `vendor` land in.
    pub fn vendor_dir(&self, vendor: &CompiledVendor) -> PathBuf {
        self.output_root.join(vendor.dir_name())
    }

    /// Write the single-page PDF for `entry`, returning the filename it
    /// was saved under.
    ///
    /// When two entries sanitize to the same name, the later one gets a
    /// `_p<page>` suffix (then a running counter) instead of silently
    /// overwriting the first.
    pub fn write_page(
        &self,
        source: &dyn DocumentSource,
        page: u32,
        vendor: &CompiledVendor,
        entry: &Entry,
    ) -> Result<String> {
        let dir = self.vendor_dir(vendor);
        std::fs::create_dir_all(&dir).map_err(|source| ArtifactError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;

        let stem = self.filename_stem(vendor, entry);
        let filename = resolve_collision(&dir, &stem, page);
        let path = dir.join(&filename);

        source
            .save_page(page, &path)
            .map_err(|e| ArtifactError::Write {
                filename: filename.clone(),
                message: e.to_string(),
            })?;

        debug!("Wrote page {} to {}", page, path.display());
        Ok(filename)
    }

    /// Join the entry's values for each declared field, in declaration
    /// order, and sanitize the result.
    fn filename_stem(&self, vendor: &CompiledVendor, entry: &Entry) -> String {
        let joined = vendor
            .fields
            .iter()
            .filter_map(|field| field.canonical.map(|c| entry.value(c)))
            .collect::<Vec<_>>()
            .join("_");
        let stem = safe_filename(&joined);
        if stem.is_empty() {
            warn!("Entry produced an empty filename stem, using fallback");
            "unnamed".to_string()
        } else {
            stem
        }
    }
}

fn resolve_collision(dir: &Path, stem: &str, page: u32) -> String {
    let plain = format!("{stem}.pdf");
    if !dir.join(&plain).exists() {
        return plain;
    }

    let paged = format!("{stem}_p{page}.pdf");
    if !dir.join(&paged).exists() {
        return paged;
    }

    let mut counter = 2u32;
    loop {
        let candidate = format!("{stem}_p{page}_{counter}.pdf");
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_safe_filename_strips_hostile_characters() {
        let raw = "PP/100\\A:B*C?D\"E<F>G|H\nI\rJ\tK";
        let safe = safe_filename(raw);
        for forbidden in ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\n', '\r', '\t'] {
            assert!(!safe.contains(forbidden), "found {forbidden:?} in {safe}");
        }
        assert_eq!(safe, "PP_100_A_B_C_D_E_F_G_H_I_J_K");
    }

    #[test]
    fn test_safe_filename_collapses_runs() {
        assert_eq!(safe_filename("A//\\\\B"), "A_B");
    }

    #[test]
    fn test_safe_filename_trims_edges() {
        assert_eq!(safe_filename("/PP100/"), "PP100");
    }

    #[test]
    fn test_collision_gets_page_suffix() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_collision(dir.path(), "PP100_SU200", 3), "PP100_SU200.pdf");

        std::fs::write(dir.path().join("PP100_SU200.pdf"), b"x").unwrap();
        assert_eq!(
            resolve_collision(dir.path(), "PP100_SU200", 3),
            "PP100_SU200_p3.pdf"
        );

        std::fs::write(dir.path().join("PP100_SU200_p3.pdf"), b"x").unwrap();
        assert_eq!(
            resolve_collision(dir.path(), "PP100_SU200", 3),
            "PP100_SU200_p3_2.pdf"
        );
    }
}
