//! CLI command implementations.

pub mod batch;
pub mod log;
pub mod process;
pub mod vendors;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use millcert_core::models::PipelineConfig;
use millcert_core::ocr::OcrBackend;
use millcert_core::{CompiledVendor, CsvLogStore, Pipeline, VendorConfig};

/// Load the pipeline config, falling back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PipelineConfig> {
    match config_path {
        Some(path) => Ok(PipelineConfig::from_file(Path::new(path))?),
        None => Ok(PipelineConfig::default()),
    }
}

/// Load and compile one vendor config file.
pub fn load_vendor(path: &Path) -> anyhow::Result<CompiledVendor> {
    let config = VendorConfig::from_file(path)?;
    Ok(config.compile()?)
}

/// Build a pipeline from the config: CSV log store plus the OCR backend
/// when its models are present.
pub fn build_pipeline(config: PipelineConfig) -> anyhow::Result<Pipeline> {
    let log = Arc::new(CsvLogStore::open(&config.log_file)?);
    let ocr = load_ocr_backend(&config);
    Ok(Pipeline::new(config, log, ocr))
}

fn load_ocr_backend(config: &PipelineConfig) -> Option<Box<dyn OcrBackend>> {
    if !config.model_dir.join("det.onnx").exists() {
        warn!(
            "OCR models not found at {}, scanned pages will fail",
            config.model_dir.display()
        );
        return None;
    }
    match millcert_core::PureOcrBackend::from_dir(&config.model_dir) {
        Ok(backend) => {
            debug!("Loaded OCR models from {}", config.model_dir.display());
            Some(Box::new(backend))
        }
        Err(e) => {
            warn!("Failed to load OCR models: {}", e);
            None
        }
    }
}
