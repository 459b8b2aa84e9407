//! Error types for the millcert-core library.

use thiserror::Error;

/// Main error type for the millcert library.
#[derive(Error, Debug)]
pub enum MillcertError {
    /// Vendor or pipeline configuration error. Fatal to a run.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Pattern extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Master log error.
    #[error("log error: {0}")]
    Log(#[from] LogError),

    /// Split-page artifact error.
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in vendor or pipeline configuration.
///
/// The only error class allowed to abort a whole run; everything else is
/// caught at page granularity.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required top-level key is missing or empty.
    #[error("missing required key: {0}")]
    MissingKey(&'static str),

    /// No pattern covers one of the three canonical fields.
    #[error("no pattern for canonical field: {0}")]
    MissingFieldPattern(&'static str),

    /// A field pattern failed to compile.
    #[error("invalid pattern for {field}: {message}")]
    InvalidPattern { field: String, message: String },

    /// Failed to read the configuration file.
    #[error("failed to read config: {0}")]
    Read(String),

    /// Failed to parse the configuration file.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to render a page image for OCR.
    #[error("failed to render page image: {0}")]
    PageRender(String),

    /// Failed to write a split page.
    #[error("failed to write page: {0}")]
    PageWrite(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No OCR backend is configured for this pipeline.
    #[error("no OCR backend configured")]
    NoBackend,
}

/// Errors related to pattern extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Table data could not be interpreted.
    #[error("malformed table: {0}")]
    MalformedTable(String),
}

/// Errors related to the durable master log.
#[derive(Error, Debug)]
pub enum LogError {
    /// Failed to open or create the log store.
    #[error("failed to open log: {0}")]
    Open(String),

    /// Failed to append a record.
    #[error("failed to append record: {0}")]
    Append(String),

    /// Concurrent-append race detected; caller should refresh and retry.
    #[error("log write conflict")]
    Conflict,

    /// The existing log file could not be read back.
    #[error("corrupt log: {0}")]
    Corrupt(String),
}

/// Errors related to writing split-page artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// Could not create the vendor output directory.
    #[error("failed to create output dir {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    /// Could not write the split page file.
    #[error("failed to write {filename}: {message}")]
    Write { filename: String, message: String },
}

/// Result type for the millcert library.
pub type Result<T> = std::result::Result<T, MillcertError>;
