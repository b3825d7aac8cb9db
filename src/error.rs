use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a manifest file into records. Reported per file, before
/// anything reaches the builder.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("I/O error for manifest '{1}': {0}")]
    Io(#[source] std::io::Error, PathBuf),

    #[error("Malformed POM '{1}': {0}")]
    Parse(#[source] quick_xml::Error, PathBuf),

    #[error("Malformed record file '{1}': {0}")]
    Json(#[source] serde_json::Error, PathBuf),
}
