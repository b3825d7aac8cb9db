//! License identity normalization.
//!
//! - [`catalog`]: exact-match mapping from raw license names/URLs to canonical
//!   license text ids (`apache-2.0.txt`, `mit.txt`, ...).
//! - [`text`]: license bodies for those ids, loaded from disk for the HTML report.

pub mod catalog;
pub mod text;
