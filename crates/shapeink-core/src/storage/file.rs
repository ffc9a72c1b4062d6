//! Reading and writing scene files.

use super::text::{parse_document, write_document, ParsedDocument};
use super::{Format, StorageError, StorageResult};
use crate::shapes::Shape;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Current JSON document version.
const DOCUMENT_VERSION: u32 = 1;

/// On-disk JSON document.
#[derive(Debug, Serialize, Deserialize)]
struct SceneDocument {
    version: u32,
    shapes: Vec<Shape>,
}

fn io_error(path: &Path, source: io::Error) -> StorageError {
    if source.kind() == io::ErrorKind::NotFound {
        StorageError::NotFound(path.to_path_buf())
    } else {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn write_string(path: &Path, contents: &str) -> StorageResult<()> {
    let file = File::create(path).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| io_error(path, e))
}

/// Write shapes as text records.
pub fn write_text(path: &Path, shapes: &[Shape]) -> StorageResult<()> {
    write_string(path, &write_document(shapes))
}

/// Read a text document. The whole file is parsed before returning.
pub fn read_text(path: &Path) -> StorageResult<ParsedDocument> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(parse_document(&contents))
}

/// Write shapes as a pretty-printed JSON document.
pub fn write_json(path: &Path, shapes: &[Shape]) -> StorageResult<()> {
    let doc = SceneDocument {
        version: DOCUMENT_VERSION,
        shapes: shapes.iter().filter(|s| s.is_persistent()).cloned().collect(),
    };
    let json = serde_json::to_string_pretty(&doc).map_err(|source| StorageError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;
    write_string(path, &json)
}

/// Read a JSON document.
///
/// Selection rectangles and empty groups are skipped; every other shape
/// has its values brought back into range.
pub fn read_json(path: &Path) -> StorageResult<ParsedDocument> {
    let json = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let doc: SceneDocument =
        serde_json::from_str(&json).map_err(|source| StorageError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    if doc.version > DOCUMENT_VERSION {
        log::warn!(
            "{} has document version {}, newer than {}",
            path.display(),
            doc.version,
            DOCUMENT_VERSION
        );
    }
    let mut skipped = 0;
    let mut shapes = Vec::with_capacity(doc.shapes.len());
    for mut shape in doc.shapes {
        skipped += shape.sanitize();
        if !shape.is_persistent() || shape.as_group().is_some_and(|g| g.is_empty()) {
            log::warn!("Skipping {} entry in {}", shape.kind_name(), path.display());
            skipped += 1;
            continue;
        }
        shapes.push(shape);
    }
    Ok(ParsedDocument { shapes, skipped })
}

/// Save in the format implied by the path's extension.
pub fn save(path: &Path, shapes: &[Shape]) -> StorageResult<()> {
    match Format::from_path(path) {
        Format::Text => write_text(path, shapes),
        Format::Json => write_json(path, shapes),
    }
}

/// Load in the format implied by the path's extension.
pub fn load(path: &Path) -> StorageResult<ParsedDocument> {
    match Format::from_path(path) {
        Format::Text => read_text(path),
        Format::Json => read_json(path),
    }
}
