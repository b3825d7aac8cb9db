use std::path::Path;

use anyhow::Result;

use crate::models::ManifestRecord;

pub mod json;
pub mod pom;

/// Source of per-dependency manifest records.
pub trait ManifestReader {
    fn read(&self, path: &Path) -> Result<Vec<ManifestRecord>>;
}
