//! PDF processing module.

mod extractor;

pub use extractor::PdfDocument;

use crate::error::PdfError;
use image::DynamicImage;
use std::path::Path;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for per-page document access.
///
/// The pipeline talks to the source PDF only through this seam, so tests
/// can drive the orchestrator with synthetic pages.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Native text of a 1-based page. Empty when the page carries no
    /// extractable text.
    fn page_text(&self, page: u32) -> Result<String>;

    /// Render a 1-based page as an image for OCR.
    ///
    /// `dpi` is advisory. Implementations without a rasterizer may
    /// ignore it; [`PdfDocument`] returns the page's embedded image at
    /// its stored resolution rather than re-rendering the page.
    fn render_page(&self, page: u32, dpi: u32) -> Result<DynamicImage>;

    /// Write a single-page PDF containing exactly the given page.
    fn save_page(&self, page: u32, path: &Path) -> Result<()>;
}
