//! File-backed CSV log store.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::{AppendOutcome, LogStore, Result};
use crate::error::LogError;
use crate::models::record::LogRecord;

/// Append-only master log backed by one CSV file.
///
/// The full fingerprint index is held in memory and rebuilt from the file
/// at open (and on [`LogStore::refresh`]). All writes go through one
/// mutex: read-index, decide, append is a single critical section.
pub struct CsvLogStore {
    path: PathBuf,
    state: Mutex<LogState>,
}

struct LogState {
    next_serial: u64,
    /// Fingerprint -> serial of the first record carrying it.
    index: HashMap<String, u64>,
    has_header: bool,
}

impl CsvLogStore {
    /// Open (or create) the log at `path`, rebuilding the fingerprint
    /// index from any existing records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| LogError::Open(e.to_string()))?;
            }
        }

        let state = read_state(&path)?;
        info!(
            "Opened log {} with {} known fingerprints",
            path.display(),
            state.index.len()
        );

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogStore for CsvLogStore {
    fn lookup(&self, content_hash: &str) -> Result<Option<u64>> {
        Ok(self.lock().index.get(content_hash).copied())
    }

    fn append(&self, record: &mut LogRecord) -> Result<AppendOutcome> {
        let mut state = self.lock();

        record.serial_number = state.next_serial;
        record.duplicate_of = state.index.get(&record.content_hash).copied();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LogError::Append(e.to_string()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(!state.has_header)
            .from_writer(file);
        writer
            .serialize(&*record)
            .map_err(|e| LogError::Append(e.to_string()))?;
        writer
            .flush()
            .map_err(|e| LogError::Append(e.to_string()))?;

        state.has_header = true;
        state.next_serial += 1;
        state
            .index
            .entry(record.content_hash.clone())
            .or_insert(record.serial_number);

        if let Some(original) = record.duplicate_of {
            debug!(
                "Appended duplicate record {} of serial {}",
                record.serial_number, original
            );
        }

        Ok(AppendOutcome {
            serial: record.serial_number,
            duplicate_of: record.duplicate_of,
        })
    }

    fn refresh(&self) -> Result<()> {
        let fresh = read_state(&self.path)?;
        *self.lock() = fresh;
        Ok(())
    }

    fn records(&self) -> Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| LogError::Open(e.to_string()))?;
        reader
            .deserialize()
            .collect::<std::result::Result<Vec<LogRecord>, _>>()
            .map_err(|e| LogError::Corrupt(e.to_string()))
    }
}

fn read_state(path: &Path) -> Result<LogState> {
    let mut state = LogState {
        next_serial: 1,
        index: HashMap::new(),
        has_header: false,
    };

    if !path.exists() || std::fs::metadata(path).map(|m| m.len()).unwrap_or(0) == 0 {
        return Ok(state);
    }

    let mut reader =
        csv::Reader::from_path(path).map_err(|e| LogError::Open(e.to_string()))?;
    for row in reader.deserialize::<LogRecord>() {
        let record = row.map_err(|e| LogError::Corrupt(e.to_string()))?;
        state
            .index
            .entry(record.content_hash.clone())
            .or_insert(record.serial_number);
        state.next_serial = state.next_serial.max(record.serial_number + 1);
    }
    state.has_header = true;
    Ok(state)
}
