//! Report renderers for the built project list.
//!
//! - [`html`]: grouped-by-license notice page with embedded license texts.
//! - [`json`]: machine-readable project list.
//! - [`csv`]: one row per project.
//! - [`text`]: short plain-text notice.
//! - [`terminal`]: colored summary table printed after generation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod csv;
pub mod html;
pub mod json;
pub mod terminal;
pub mod text;

/// File name used for report copies placed in asset directories.
pub const OPEN_SOURCE_LICENSES: &str = "open_source_licenses";

/// A rendered report format.
pub trait Report {
    /// Display name, e.g. `HTML`.
    fn name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Whether there is nothing to report.
    fn is_empty(&self) -> bool;

    fn full_report(&self) -> Result<String>;

    fn empty_report(&self) -> String;

    /// The full report, or the empty report when there are no projects.
    fn report(&self) -> Result<String> {
        if self.is_empty() {
            Ok(self.empty_report())
        } else {
            self.full_report()
        }
    }
}

/// `None` for empty strings; rendered as `null` / blank by the formats.
pub(crate) fn value_or_none(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Write `<dir>/<base_name>.<ext>`, replacing any existing file.
pub fn write_report(dir: &Path, base_name: &str, report: &dyn Report) -> Result<PathBuf> {
    let file = dir.join(format!("{}.{}", base_name, report.extension()));
    write_file(&file, &report.report()?)?;
    log::info!("Wrote {} report to {}.", report.name(), file_url(&file));
    Ok(file)
}

/// Copy a written report to `<asset dir>/open_source_licenses.<ext>` for every
/// asset directory.
pub fn copy_report(source: &Path, asset_dirs: &[PathBuf], report: &dyn Report) -> Result<()> {
    let content = std::fs::read_to_string(source)
        .with_context(|| format!("Failed to read report {}", source.display()))?;

    for dir in asset_dirs {
        let file = dir.join(format!("{}.{}", OPEN_SOURCE_LICENSES, report.extension()));
        write_file(&file, &content)?;
        log::info!("Copied {} report to {}.", report.name(), file_url(&file));
    }
    Ok(())
}

fn write_file(file: &Path, content: &str) -> Result<()> {
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    if file.exists() {
        std::fs::remove_file(file)
            .with_context(|| format!("Failed to remove {}", file.display()))?;
    }
    std::fs::write(file, content).with_context(|| format!("Failed to write {}", file.display()))
}

/// `file://` URL for a path, with an empty authority so terminals make it clickable.
pub fn file_url(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let path = absolute.to_string_lossy().replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}
