//! Pipeline orchestrator: per-page text acquisition with OCR fallback,
//! pattern extraction, deduplication, and split-page artifact writing.
//!
//! Pages are processed strictly in order within one run. Every failure
//! below run level is isolated to its page: a bad page is marked failed
//! and the run continues. The only error that aborts a run outright is a
//! configuration error, raised before any page is touched.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::artifact::ArtifactWriter;
use crate::error::{LogError, Result};
use crate::extract::{detect_tables, extract_entries, Table};
use crate::log::{fingerprint, LogStore};
use crate::models::record::{Entry, LogRecord, PageExtractionResult, RunStatistics};
use crate::models::vendor::CompiledVendor;
use crate::models::PipelineConfig;
use crate::ocr::OcrBackend;
use crate::pdf::{DocumentSource, PdfDocument};

/// Result of one pipeline run over one document.
#[derive(Debug, Default)]
pub struct RunOutcome {
    /// Accepted, non-duplicate records in log order.
    pub records: Vec<LogRecord>,
    /// Aggregated per-page statistics.
    pub statistics: RunStatistics,
}

/// One extraction pipeline: a log store, an optional OCR backend, and an
/// artifact writer, driven over documents page by page.
pub struct Pipeline {
    config: PipelineConfig,
    log: Arc<dyn LogStore>,
    ocr: Option<Box<dyn OcrBackend>>,
    writer: ArtifactWriter,
    cancel: Arc<AtomicBool>,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        log: Arc<dyn LogStore>,
        ocr: Option<Box<dyn OcrBackend>>,
    ) -> Self {
        let writer = ArtifactWriter::new(config.output_root.clone());
        Self {
            config,
            log,
            ocr,
            writer,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that stops the run before the next page when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Process a PDF file from disk.
    pub fn process_file(&self, path: &Path, vendor: &CompiledVendor) -> Result<RunOutcome> {
        let document = PdfDocument::open(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.process_document(&document, &name, vendor)
    }

    /// Process an already-open document.
    pub fn process_document(
        &self,
        source: &dyn DocumentSource,
        source_name: &str,
        vendor: &CompiledVendor,
    ) -> Result<RunOutcome> {
        let page_count = source.page_count();
        info!(
            "Processing {} ({} pages) for vendor {}",
            source_name, page_count, vendor.vendor_name
        );

        let mut outcome = RunOutcome::default();
        let mut entries_produced = 0usize;
        let mut processed = 0u32;

        for page in 1..=page_count {
            if self.cancel.load(Ordering::Relaxed) {
                info!("Run cancelled before page {}", page);
                break;
            }
            processed += 1;

            let result = match self.process_page(source, source_name, page, vendor) {
                Ok((page_result, records)) => {
                    entries_produced += page_result.entry_count;
                    outcome.records.extend(records);
                    page_result
                }
                Err(e) => {
                    warn!("Page {} of {} failed: {}", page, source_name, e);
                    PageExtractionResult {
                        page_number: page,
                        used_ocr: false,
                        entry_count: 0,
                        failed: true,
                    }
                }
            };
            outcome.statistics.record_page(&result);
        }

        outcome.statistics.finalize(processed, entries_produced);
        info!(
            "Finished {}: {} records, {}/{} pages succeeded",
            source_name,
            outcome.records.len(),
            outcome.statistics.successful_pages,
            outcome.statistics.total_pages
        );
        Ok(outcome)
    }

    /// Process one page through the full state machine.
    ///
    /// Native text first; when the stripped text is shorter than the
    /// configured minimum, or when extraction finds nothing in native
    /// text, the page goes through OCR exactly once. A page that yields
    /// nothing after OCR is failed without a second retry.
    fn process_page(
        &self,
        source: &dyn DocumentSource,
        source_name: &str,
        page: u32,
        vendor: &CompiledVendor,
    ) -> Result<(PageExtractionResult, Vec<LogRecord>)> {
        let (text, mut used_ocr) = self.acquire_page_text(source, page)?;
        let mut entries = self.extract_page(&text, vendor);

        if entries.is_empty() && !used_ocr {
            debug!("Page {} yielded no entries natively, retrying via OCR", page);
            let ocr_text = self.ocr_text(source, page);
            used_ocr = true;
            entries = self.extract_page(&ocr_text, vendor);
        }

        if entries.is_empty() {
            debug!("Page {} yielded no entries (ocr={})", page, used_ocr);
            return Ok((
                PageExtractionResult {
                    page_number: page,
                    used_ocr,
                    entry_count: 0,
                    failed: true,
                },
                Vec::new(),
            ));
        }

        let entry_count = entries.len();
        let mut records = Vec::new();
        let mut write_failures = 0usize;
        for entry in entries.drain(..) {
            let (record, write_failed) =
                self.accept_entry(source, source_name, page, vendor, entry, used_ocr)?;
            if write_failed {
                write_failures += 1;
            }
            records.extend(record);
        }

        // Losing the artifact for the page's only entry surfaces as a
        // page-level failure; the log record itself is already in.
        let failed = entry_count == 1 && write_failures == 1;

        Ok((
            PageExtractionResult {
                page_number: page,
                used_ocr,
                entry_count,
                failed,
            },
            records,
        ))
    }

    /// Native text when long enough, OCR text otherwise.
    ///
    /// A stripped length of exactly `min_text_length` characters counts
    /// as reliable native text.
    fn acquire_page_text(&self, source: &dyn DocumentSource, page: u32) -> Result<(String, bool)> {
        let native = source.page_text(page)?;
        if native.trim().chars().count() >= self.config.min_text_length {
            return Ok((native, false));
        }
        debug!("Page {} has too little native text, falling back to OCR", page);
        Ok((self.ocr_text(source, page), true))
    }

    /// Best-effort OCR of one page. Render or recognition failure
    /// degrades to empty text so the page runs out through the normal
    /// no-entries path.
    fn ocr_text(&self, source: &dyn DocumentSource, page: u32) -> String {
        let Some(ocr) = self.ocr.as_deref() else {
            warn!("Page {} needs OCR but no backend is configured", page);
            return String::new();
        };
        let image = match source.render_page(page, self.config.render_dpi) {
            Ok(image) => image,
            Err(e) => {
                warn!("Failed to render page {}: {}", page, e);
                return String::new();
            }
        };
        match ocr.recognize(&image) {
            Ok(text) => text,
            Err(e) => {
                warn!("OCR failed on page {}: {}", page, e);
                String::new()
            }
        }
    }

    fn extract_page(&self, text: &str, vendor: &CompiledVendor) -> Vec<Entry> {
        let tables: Option<Vec<Table>> = vendor.table_extraction.then(|| detect_tables(text));
        extract_entries(text, tables.as_deref(), vendor)
    }

    /// Fingerprint, dedup, artifact write, and log append for one entry.
    ///
    /// Returns the record when it is new, `None` for a strict duplicate
    /// (the duplicate is still appended to the log, annotated with the
    /// serial of its first occurrence), plus whether the artifact write
    /// was attempted and lost.
    fn accept_entry(
        &self,
        source: &dyn DocumentSource,
        source_name: &str,
        page: u32,
        vendor: &CompiledVendor,
        entry: Entry,
        used_ocr: bool,
    ) -> Result<(Option<LogRecord>, bool)> {
        let hash = fingerprint(&vendor.vendor_id, &entry);
        let seen = self.log.lookup(&hash)?.is_some();

        // A write failure must not lose the extraction fact: the record
        // goes in with output_filename unset.
        let mut write_failed = false;
        let output_filename = if !seen || self.config.write_duplicate_artifacts {
            match self.writer.write_page(source, page, vendor, &entry) {
                Ok(filename) => Some(filename),
                Err(e) => {
                    warn!("Artifact write failed for page {}: {}", page, e);
                    write_failed = true;
                    None
                }
            }
        } else {
            None
        };

        let mut record = LogRecord {
            serial_number: 0,
            vendor: vendor.vendor_name.clone(),
            plate_no: entry.plate_no.clone(),
            heat_no: entry.heat_no.clone(),
            test_cert_no: entry.test_cert_no.clone(),
            output_filename,
            source_page: page,
            source_pdf: source_name.to_string(),
            created_at: Utc::now(),
            content_hash: hash,
            duplicate_of: None,
            ocr_used: used_ocr,
        };

        let outcome = self.append_with_retry(&mut record)?;
        if outcome.is_duplicate() {
            debug!(
                "Entry {} on page {} duplicates serial {:?}",
                record.plate_no, page, outcome.duplicate_of
            );
            Ok((None, write_failed))
        } else {
            Ok((Some(record), write_failed))
        }
    }

    /// Append under the bounded conflict-retry policy: refresh the store
    /// and try again, up to the configured limit.
    fn append_with_retry(&self, record: &mut LogRecord) -> Result<crate::log::AppendOutcome> {
        let mut attempts = 0u32;
        loop {
            match self.log.append(record) {
                Ok(outcome) => return Ok(outcome),
                Err(LogError::Conflict) if attempts < self.config.log_retry_limit => {
                    attempts += 1;
                    warn!(
                        "Log write conflict, retry {}/{}",
                        attempts, self.config.log_retry_limit
                    );
                    self.log.refresh()?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::log::{AppendOutcome, CsvLogStore};
    use crate::models::vendor::VendorConfig;
    use image::DynamicImage;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicU32;
    use std::sync::Mutex;

    const PAGE_TEXT: &str =
        "Certificate No: ABC-001\nPart No: PP100 Heat No: SU200\nPart No: PP101 Heat No: SU201";
    const OTHER_PAGE_TEXT: &str =
        "Certificate No: ABC-002\nPart No: PP300 Heat No: SU400 padding padding padding";

    fn vendor() -> CompiledVendor {
        let config: VendorConfig = serde_json::from_str(
            r#"{"vendor_id": "jsw", "vendor_name": "JSW Steel",
                "fields": {"PLATE_NO": "PP\\d+", "HEAT_NO": "SU\\d+",
                           "TEST_CERT_NO": "ABC-\\d+"}}"#,
        )
        .unwrap();
        config.compile().unwrap()
    }

    /// Synthetic document: native text per page plus one shared OCR
    /// transcript handed out by the fake backend.
    struct FakeSource {
        pages: Vec<String>,
        render_calls: AtomicU32,
    }

    impl FakeSource {
        fn new(pages: &[&str]) -> Self {
            Self {
                pages: pages.iter().map(|p| p.to_string()).collect(),
                render_calls: AtomicU32::new(0),
            }
        }
    }

    impl DocumentSource for FakeSource {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn page_text(&self, page: u32) -> crate::pdf::Result<String> {
            self.pages
                .get(page as usize - 1)
                .cloned()
                .ok_or(PdfError::InvalidPage(page))
        }

        fn render_page(&self, _page: u32, _dpi: u32) -> crate::pdf::Result<DynamicImage> {
            self.render_calls.fetch_add(1, Ordering::SeqCst);
            Ok(DynamicImage::new_rgb8(1, 1))
        }

        fn save_page(&self, _page: u32, path: &Path) -> crate::pdf::Result<()> {
            std::fs::write(path, b"%PDF-1.4 stub")
                .map_err(|e| PdfError::PageWrite(e.to_string()))
        }
    }

    /// OCR backend that replays queued transcripts in order.
    struct FakeOcr {
        responses: Mutex<Vec<String>>,
    }

    impl FakeOcr {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().rev().map(|r| r.to_string()).collect()),
            }
        }
    }

    impl OcrBackend for FakeOcr {
        fn recognize(&self, _image: &DynamicImage) -> crate::ocr::Result<String> {
            Ok(self.responses.lock().unwrap().pop().unwrap_or_default())
        }
    }

    /// Store that fails the first N appends with a conflict.
    struct ConflictStore {
        inner: CsvLogStore,
        remaining_conflicts: AtomicU32,
        refreshes: AtomicU32,
    }

    impl LogStore for ConflictStore {
        fn lookup(&self, content_hash: &str) -> crate::log::Result<Option<u64>> {
            self.inner.lookup(content_hash)
        }

        fn append(&self, record: &mut LogRecord) -> crate::log::Result<AppendOutcome> {
            let left = self.remaining_conflicts.load(Ordering::SeqCst);
            if left > 0 {
                self.remaining_conflicts.store(left - 1, Ordering::SeqCst);
                return Err(LogError::Conflict);
            }
            self.inner.append(record)
        }

        fn refresh(&self) -> crate::log::Result<()> {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
            self.inner.refresh()
        }

        fn records(&self) -> crate::log::Result<Vec<LogRecord>> {
            self.inner.records()
        }
    }

    fn pipeline_in(dir: &Path, ocr: Option<Box<dyn OcrBackend>>) -> Pipeline {
        let config = PipelineConfig {
            output_root: dir.join("out"),
            log_file: dir.join("log.csv"),
            ..PipelineConfig::default()
        };
        let log = Arc::new(CsvLogStore::open(&config.log_file).unwrap());
        Pipeline::new(config, log, ocr)
    }

    #[test]
    fn test_native_page_yields_records_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), None);
        let source = FakeSource::new(&[PAGE_TEXT]);

        let outcome = pipeline
            .process_document(&source, "cert.pdf", &vendor())
            .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].plate_no, "PP100");
        assert_eq!(outcome.records[0].serial_number, 1);
        assert_eq!(outcome.records[1].plate_no, "PP101");
        assert!(!outcome.records[0].ocr_used);
        assert_eq!(
            outcome.records[0].output_filename.as_deref(),
            Some("PP100_SU200_ABC-001.pdf")
        );
        assert!(dir
            .path()
            .join("out/JSW_Steel/PP100_SU200_ABC-001.pdf")
            .exists());

        assert!(outcome.statistics.extraction_success);
        assert!(!outcome.statistics.partial_extraction);
        assert_eq!(outcome.statistics.successful_pages, 1);
    }

    #[test]
    fn test_short_text_triggers_ocr_but_fifty_chars_does_not() {
        let dir = tempfile::tempdir().unwrap();

        // Exactly 50 stripped characters: native path, no OCR.
        let exactly_50 = format!("ABC-001 PP100 SU200 {}", "x".repeat(30));
        assert_eq!(exactly_50.trim().chars().count(), 50);
        let pipeline = pipeline_in(dir.path(), Some(Box::new(FakeOcr::new(&[]))));
        let source = FakeSource::new(&[exactly_50.as_str()]);
        let outcome = pipeline
            .process_document(&source, "a.pdf", &vendor())
            .unwrap();
        assert_eq!(source.render_calls.load(Ordering::SeqCst), 0);
        assert!(!outcome.records[0].ocr_used);

        // 49 characters: OCR fallback.
        let dir = tempfile::tempdir().unwrap();
        let short = format!("ABC-001 PP100 SU200 {}", "x".repeat(29));
        assert_eq!(short.trim().chars().count(), 49);
        let pipeline = pipeline_in(dir.path(), Some(Box::new(FakeOcr::new(&[PAGE_TEXT]))));
        let source = FakeSource::new(&[short.as_str()]);
        let outcome = pipeline
            .process_document(&source, "b.pdf", &vendor())
            .unwrap();
        assert_eq!(source.render_calls.load(Ordering::SeqCst), 1);
        assert!(outcome.records[0].ocr_used);
        assert_eq!(outcome.statistics.ocr_fallback_pages, vec![1]);
    }

    #[test]
    fn test_no_entry_native_page_retries_once_via_ocr() {
        let dir = tempfile::tempdir().unwrap();
        // Long enough for the native path but matches nothing.
        let noise = "This is a long page of prose without any identifiers on it at all.";
        let pipeline = pipeline_in(dir.path(), Some(Box::new(FakeOcr::new(&[PAGE_TEXT]))));
        let source = FakeSource::new(&[noise]);

        let outcome = pipeline
            .process_document(&source, "c.pdf", &vendor())
            .unwrap();

        assert_eq!(source.render_calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.records.len(), 2);
        assert!(outcome.records[0].ocr_used);
        assert_eq!(outcome.statistics.ocr_fallback_pages, vec![1]);
    }

    #[test]
    fn test_failed_page_gets_no_second_ocr_retry() {
        let dir = tempfile::tempdir().unwrap();
        let noise = "This is a long page of prose without any identifiers on it at all.";
        let pipeline = pipeline_in(
            dir.path(),
            Some(Box::new(FakeOcr::new(&["still nothing useful here"]))),
        );
        let source = FakeSource::new(&[noise]);

        let outcome = pipeline
            .process_document(&source, "d.pdf", &vendor())
            .unwrap();

        // One OCR pass, then failed. No loop.
        assert_eq!(source.render_calls.load(Ordering::SeqCst), 1);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.statistics.failed_pages, vec![1]);
        assert!(!outcome.statistics.extraction_success);
    }

    #[test]
    fn test_three_page_run_statistics() {
        let dir = tempfile::tempdir().unwrap();
        // Page 1 native, page 2 short text then OCR success, page 3
        // short text then OCR finds nothing.
        let pipeline = pipeline_in(
            dir.path(),
            Some(Box::new(FakeOcr::new(&[OTHER_PAGE_TEXT, "noise"]))),
        );
        let source = FakeSource::new(&[PAGE_TEXT, "short", "short"]);

        let outcome = pipeline
            .process_document(&source, "e.pdf", &vendor())
            .unwrap();

        assert_eq!(outcome.statistics.total_pages, 3);
        assert_eq!(outcome.statistics.successful_pages, 2);
        assert_eq!(outcome.statistics.ocr_fallback_pages, vec![2]);
        assert_eq!(outcome.statistics.failed_pages, vec![3]);
        assert!(outcome.statistics.extraction_success);
        assert!(outcome.statistics.partial_extraction);
        assert_eq!(outcome.records.len(), 3);
    }

    #[test]
    fn test_duplicate_entry_is_logged_but_not_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), None);
        // Two pages carrying the identical single entry.
        let source = FakeSource::new(&[OTHER_PAGE_TEXT, OTHER_PAGE_TEXT]);
        let v = vendor();

        let outcome = pipeline.process_document(&source, "f.pdf", &v).unwrap();

        assert_eq!(outcome.records.len(), 1);
        let logged = pipeline.log.records().unwrap();
        assert_eq!(logged.len(), 2);
        assert_eq!(logged[0].duplicate_of, None);
        assert_eq!(logged[1].duplicate_of, Some(1));
        // The duplicate's artifact write was skipped.
        assert_eq!(logged[1].output_filename, None);
        // Duplicates still count as extracted entries for statistics.
        assert!(outcome.statistics.extraction_success);
        assert_eq!(outcome.statistics.failed_pages, Vec::<u32>::new());
    }

    #[test]
    fn test_write_conflict_is_retried_with_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ConflictStore {
            inner: CsvLogStore::open(dir.path().join("log.csv")).unwrap(),
            remaining_conflicts: AtomicU32::new(2),
            refreshes: AtomicU32::new(0),
        });
        let config = PipelineConfig {
            output_root: dir.path().join("out"),
            log_retry_limit: 3,
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config, Arc::clone(&store) as Arc<dyn LogStore>, None);
        let source = FakeSource::new(&[OTHER_PAGE_TEXT]);

        let outcome = pipeline
            .process_document(&source, "g.pdf", &vendor())
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(store.refreshes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_exhausted_conflict_retries_fail_the_page_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ConflictStore {
            inner: CsvLogStore::open(dir.path().join("log.csv")).unwrap(),
            remaining_conflicts: AtomicU32::new(10),
            refreshes: AtomicU32::new(0),
        });
        let config = PipelineConfig {
            output_root: dir.path().join("out"),
            log_retry_limit: 2,
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(config, store as Arc<dyn LogStore>, None);
        // Page 1 hits the conflicting store; page 2 would too, so both
        // fail while the run itself completes.
        let source = FakeSource::new(&[OTHER_PAGE_TEXT, OTHER_PAGE_TEXT]);

        let outcome = pipeline
            .process_document(&source, "h.pdf", &vendor())
            .unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.statistics.failed_pages, vec![1, 2]);
    }

    #[test]
    fn test_page_error_does_not_abort_run() {
        struct FlakySource(FakeSource);

        impl DocumentSource for FlakySource {
            fn page_count(&self) -> u32 {
                3
            }
            fn page_text(&self, page: u32) -> crate::pdf::Result<String> {
                if page == 2 {
                    return Err(PdfError::TextExtraction("bad stream".into()));
                }
                self.0.page_text(if page == 3 { 2 } else { 1 })
            }
            fn render_page(&self, page: u32, dpi: u32) -> crate::pdf::Result<DynamicImage> {
                self.0.render_page(page, dpi)
            }
            fn save_page(&self, page: u32, path: &Path) -> crate::pdf::Result<()> {
                self.0.save_page(page, path)
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), None);
        let source = FlakySource(FakeSource::new(&[PAGE_TEXT, OTHER_PAGE_TEXT]));

        let outcome = pipeline
            .process_document(&source, "i.pdf", &vendor())
            .unwrap();

        assert_eq!(outcome.statistics.failed_pages, vec![2]);
        assert_eq!(outcome.statistics.successful_pages, 2);
        assert_eq!(outcome.records.len(), 3);
    }

    #[test]
    fn test_lost_artifact_for_sole_entry_fails_the_page() {
        struct NoWriteSource(FakeSource);

        impl DocumentSource for NoWriteSource {
            fn page_count(&self) -> u32 {
                self.0.page_count()
            }
            fn page_text(&self, page: u32) -> crate::pdf::Result<String> {
                self.0.page_text(page)
            }
            fn render_page(&self, page: u32, dpi: u32) -> crate::pdf::Result<DynamicImage> {
                self.0.render_page(page, dpi)
            }
            fn save_page(&self, _page: u32, _path: &Path) -> crate::pdf::Result<()> {
                Err(PdfError::PageWrite("disk full".into()))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), None);
        // One entry on the page, and its artifact write fails.
        let source = NoWriteSource(FakeSource::new(&[OTHER_PAGE_TEXT]));

        let outcome = pipeline
            .process_document(&source, "k.pdf", &vendor())
            .unwrap();

        // The extraction fact is kept, with the filename unavailable.
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].output_filename, None);
        // The lost artifact surfaces as a page-level failure.
        assert_eq!(outcome.statistics.failed_pages, vec![1]);
    }

    #[test]
    fn test_cancellation_stops_before_next_page() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = pipeline_in(dir.path(), None);
        pipeline.cancel_flag().store(true, Ordering::Relaxed);
        let source = FakeSource::new(&[PAGE_TEXT, OTHER_PAGE_TEXT]);

        let outcome = pipeline
            .process_document(&source, "j.pdf", &vendor())
            .unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.statistics.total_pages, 0);
    }
}
