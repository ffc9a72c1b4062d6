//! Persistence for scenes.
//!
//! Two on-disk formats are supported: the line-oriented text record format
//! (one `TAG,field,...` record per shape) and a JSON document that keeps
//! every shape property, including group nesting, rotation and opacity.

mod file;
mod text;

pub use file::{load, read_json, read_text, save, write_json, write_text};
pub use text::{parse_document, parse_record, write_document, ParsedDocument};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error in {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// On-disk scene format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// One comma-separated record per line.
    #[default]
    Text,
    /// Full-fidelity JSON document.
    Json,
}

impl Format {
    /// Pick a format from the file extension; anything but `.json` is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Text,
        }
    }
}

/// Outcome of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Shapes now in the scene.
    pub loaded: usize,
    /// Malformed or unrecognized records that were skipped.
    pub skipped: usize,
}
