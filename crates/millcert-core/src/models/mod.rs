//! Data models: vendor configuration, records, pipeline configuration.

pub mod config;
pub mod record;
pub mod vendor;

pub use config::PipelineConfig;
pub use record::{Entry, LogRecord, PageExtractionResult, RunStatistics, NOT_AVAILABLE};
pub use vendor::{
    CanonicalField, CompiledDetect, CompiledField, CompiledVendor, DetectSpec, FieldSpec,
    MatchType, NamedField, VendorConfig, VendorFields,
};
