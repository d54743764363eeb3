/*!
 * Tests for the batch manifest
 */

use anyhow::Result;
use glosstex::manifest::{self, ManifestRow};
use crate::common;

/// Test that multi-line formulas with quotes and commas survive a write and read
#[test]
fn test_manifest_withMultilineFormula_shouldReadBackUnchanged() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out/im2expex.csv");
    let rows = vec![
        ManifestRow::new("\\ex\n\\begingl\n\\gla a, \"b\" //\n\\glb A B //\n\\endgl\n\\xe", "tex/paired-0.png"),
        ManifestRow::new("\\ex\n\\xe", "tex/paired-1.png"),
    ];

    manifest::write_manifest(&path, &rows)?;
    let loaded = manifest::read_manifest(&path)?;

    assert_eq!(loaded, rows);

    Ok(())
}

/// Test that the header names both columns
#[test]
fn test_writeManifest_shouldStartWithHeader() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("manifest.csv");

    manifest::write_manifest(&path, &[ManifestRow::new("x", "x.png")])?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("formula,image\n"));

    Ok(())
}

/// Test that an empty batch still produces a readable manifest
#[test]
fn test_writeManifest_withNoRows_shouldWriteHeaderOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("empty.csv");

    manifest::write_manifest(&path, &[])?;

    assert_eq!(std::fs::read_to_string(&path)?, "formula,image\n");
    assert!(manifest::read_manifest(&path)?.is_empty());

    Ok(())
}

/// Test that reading a missing manifest fails
#[test]
fn test_readManifest_withMissingFile_shouldFail() {
    assert!(manifest::read_manifest("no/such/manifest.csv").is_err());
}
