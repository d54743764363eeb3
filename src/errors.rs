/*!
 * Error types for the glosstex application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Reasons an example-like span is rejected during extraction.
///
/// None of these ever reach the caller of `find_examples`; they are
/// logged and the offending part is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A part was found but lacks a words line or a glosses line
    #[error("Example part is missing its {0} line")]
    StructuralMismatch(&'static str),

    /// Token counts of the words and glosses lines differ
    #[error("Alignment mismatch: {words} word(s) vs {glosses} gloss(es)")]
    AlignmentMismatch {
        /// Number of word tokens after cleanup and filtering
        words: usize,
        /// Number of gloss tokens after cleanup and filtering
        glosses: usize,
    },
}

/// The same word was seen with two different glosses in a corpus.
///
/// Reported as a warning; the first gloss is retained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{word}' already mapped to '{existing}', ignoring '{rejected}'")]
pub struct VocabularyConflict {
    pub word: String,
    pub existing: String,
    pub rejected: String,
}

/// Errors that can occur when calling the external typesetting tools
#[derive(Error, Debug)]
pub enum RenderError {
    /// The source handed to the renderer does not exist
    #[error("Source file does not exist: {0:?}")]
    MissingSource(PathBuf),

    /// The external program could not be started at all
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program name, e.g. `xelatex`
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The output directory could not be created
    #[error("Failed to prepare output directory {path:?}: {message}")]
    OutputDir { path: PathBuf, message: String },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the render pipeline
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
