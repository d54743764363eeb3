/*!
 * # glosstex - interlinear gloss examples for image-to-markup training
 *
 * Finds expex interlinear gloss examples in LaTeX sources, regenerates
 * real and synthetic variants as standalone documents, renders them with
 * an external TeX toolchain and builds the token vocabulary of the
 * resulting formulas.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `extractor`: finds `\ex`/`\pex` examples and their aligned lines
 * - `gloss`: the extracted example type
 * - `vocabulary`: word → gloss mapping derived from a corpus
 * - `corpus`: JSON corpus files
 * - `latex`: document model that writes examples back out
 * - `synthesizer`: sampling and batch regeneration of examples
 * - `render`: xelatex and ghostscript collaborators
 * - `manifest`: CSV list of generated formulas and images
 * - `tokenizer`: formula tokenizer and token vocabulary
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod corpus;
pub mod errors;
pub mod extractor;
pub mod file_utils;
pub mod gloss;
pub mod latex;
pub mod manifest;
pub mod render;
pub mod synthesizer;
pub mod tokenizer;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use extractor::{ExampleExtractor, ExtractOptions, find_examples, parse_dir};
pub use gloss::{GlossExample, GlossItem};
pub use manifest::ManifestRow;
pub use tokenizer::{build_token_vocabulary, tokenize_formula};
pub use vocabulary::Vocabulary;
pub use errors::{AppError, ExtractionError, RenderError, VocabularyConflict};
