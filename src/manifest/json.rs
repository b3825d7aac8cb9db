use std::path::Path;

use anyhow::Result;

use crate::error::ManifestError;
use crate::models::ManifestRecord;

/// Reads records that were already resolved elsewhere, stored as a JSON
/// array of objects with the [`ManifestRecord`] fields.
pub struct JsonRecordReader;

impl JsonRecordReader {
    pub fn new() -> Self {
        Self
    }
}

impl super::ManifestReader for JsonRecordReader {
    fn read(&self, path: &Path) -> Result<Vec<ManifestRecord>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::Io(e, path.to_path_buf()))?;
        let records: Vec<ManifestRecord> = serde_json::from_str(&content)
            .map_err(|e| ManifestError::Json(e, path.to_path_buf()))?;
        log::debug!("read {} records from {}", records.len(), path.display());
        Ok(records)
    }
}
