/*!
 * Batch manifest: one `(formula, image)` row per generated example.
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::file_utils::FileManager;

/// Serialized example and the image it is expected to render to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub formula: String,
    pub image: String,
}

impl ManifestRow {
    pub fn new(formula: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            image: image.into(),
        }
    }
}

/// Write rows as CSV with a `formula,image` header
pub fn write_manifest<P: AsRef<Path>>(path: P, rows: &[ManifestRow]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        FileManager::ensure_dir(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create manifest: {:?}", path))?;

    // serde only emits the header with the first record
    if rows.is_empty() {
        writer.write_record(["formula", "image"])?;
    }
    for row in rows {
        writer.serialize(row)
            .with_context(|| format!("Failed to write manifest row to {:?}", path))?;
    }

    writer.flush().with_context(|| format!("Failed to flush manifest: {:?}", path))?;
    Ok(())
}

/// Read all rows of a manifest
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestRow>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open manifest: {:?}", path))?;

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<ManifestRow>, _>>()
        .with_context(|| format!("Failed to parse manifest: {:?}", path))
}
