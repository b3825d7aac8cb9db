use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::catalog::LicenseCatalog;

const MISSING_LICENSE: &str = "Missing standard license text for: ";

/// License bodies keyed by canonical id (e.g. `mit.txt`).
#[derive(Debug, Default)]
pub struct LicenseTexts {
    texts: HashMap<String, String>,
}

impl LicenseTexts {
    /// Load `<dir>/<id>` for every canonical id in the catalog. Ids without a
    /// file are skipped; [`LicenseTexts::text`] reports them as missing.
    pub fn load(dir: &Path, catalog: &LicenseCatalog) -> Result<Self> {
        let mut texts = HashMap::new();
        for id in catalog.canonical_ids() {
            let path = dir.join(id);
            if !path.is_file() {
                log::debug!("no license text for {} in {}", id, dir.display());
                continue;
            }
            let body = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read license text {}", path.display()))?;
            texts.insert(id.to_string(), body);
        }
        Ok(Self { texts })
    }

    pub fn text(&self, id: &str) -> String {
        self.texts
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("{}{}", MISSING_LICENSE, id))
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
