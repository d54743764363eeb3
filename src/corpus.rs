/*!
 * JSON corpus of extracted examples.
 */

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::gloss::GlossExample;
use crate::vocabulary::Vocabulary;

/// Parse a corpus from its JSON text
pub fn parse_examples(json: &str) -> Result<Vec<GlossExample>> {
    serde_json::from_str(json).context("Failed to parse example corpus")
}

/// Load a corpus file and derive its vocabulary
pub fn load_examples<P: AsRef<Path>>(path: P) -> Result<(Vec<GlossExample>, Vocabulary)> {
    let path = path.as_ref();
    let json = FileManager::read_to_string(path)?;
    let examples = parse_examples(&json)
        .with_context(|| format!("Invalid corpus file: {:?}", path))?;

    let vocabulary = Vocabulary::from_examples(&examples);
    info!(
        "Loaded {} example(s), {} distinct word(s) from {:?}",
        examples.len(),
        vocabulary.len(),
        path
    );

    Ok((examples, vocabulary))
}

/// Write a corpus as pretty-printed JSON
pub fn save_examples<P: AsRef<Path>>(path: P, examples: &[GlossExample]) -> Result<()> {
    let json = serde_json::to_string_pretty(examples)
        .context("Failed to serialize example corpus")?;
    FileManager::write_to_file(path, &json)
}
