/*!
 * Formula tokenizer and token vocabulary builder.
 *
 * Alternatives are tried in order at every position:
 * 1. `\name` commands
 * 2. math symbols, optionally preceded by escaped backslashes
 * 3. single word characters
 * 4. a lone backslash
 *
 * Everything else (whitespace in particular) is skipped.
 */

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::file_utils::FileManager;

/// Padding sentinel
pub const PAD_TOKEN: &str = "<p>";
/// Sequence start sentinel
pub const START_TOKEN: &str = "<s>";
/// Sequence end sentinel
pub const END_TOKEN: &str = "<e>";

static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(\\[a-zA-Z]+)|",
        r#"((\\)*[$-/:-?{-~!"^_`\[\]])|"#,
        r"(\w)|",
        r"(\\)",
    ))
    .expect("Invalid token regex")
});

/// Split a formula into atomic tokens
pub fn tokenize_formula(formula: &str) -> Vec<String> {
    TOKEN_REGEX
        .find_iter(formula)
        .map(|m| m.as_str())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sentinels followed by every distinct token, in order of first appearance
pub fn build_token_vocabulary<I, S>(formulas: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut vocabulary: Vec<String> = [PAD_TOKEN, START_TOKEN, END_TOKEN]
        .iter()
        .map(|t| t.to_string())
        .collect();
    let mut seen: HashSet<String> = HashSet::new();

    for formula in formulas {
        for token in tokenize_formula(formula.as_ref()) {
            if seen.insert(token.clone()) {
                vocabulary.push(token);
            }
        }
    }

    vocabulary
}

/// Write a token vocabulary as a JSON array
pub fn write_token_vocabulary<P: AsRef<Path>>(path: P, tokens: &[String]) -> Result<()> {
    let json = serde_json::to_string(tokens).context("Failed to serialize token vocabulary")?;
    FileManager::write_to_file(path, &json)
}
