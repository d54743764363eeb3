/*!
 * Extraction of expex interlinear examples from LaTeX sources.
 *
 * Recognised shapes:
 *
 * ```text
 * \ex                      \pex
 * \begingl                 \a \begingl
 * \gla words... //            \gla ... //
 * \glb glosses... //          \glb ... //
 * \glft translation //        \endgl
 * \endgl                   \a ...
 * \xe                      \xe
 * ```
 *
 * Anything that does not fit is skipped silently; extraction never fails
 * on document content.
 */

use anyhow::Result;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::path::Path;

use crate::errors::ExtractionError;
use crate::file_utils::FileManager;
use crate::gloss::GlossExample;

/// Name of the multi-part start marker
const MULTIPART_MARKER: &str = "pex";

/// End of an example block
const END_MARKER: &str = r"\xe";

/// Tokens dropped from both lines when `demand_char_like_words` is set
const EXCLUDED_TOKENS: [&str; 8] = ["[", "]", "(", ")", "{", "}", "/", "|"];

/// Number of passes stripping bare `\name` escapes
const ESCAPE_STRIP_PASSES: usize = 3;

/// `\ex` or `\pex`, then everything up to the first `\xe`
static EXAMPLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\\(?P<start>p?ex).+?\\xe").expect("Invalid example regex")
});

static PART_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\a").expect("Invalid part marker regex")
});

static ORIG_WORDS_REGEX: Lazy<Regex> = Lazy::new(|| level_regex("gla"));
static GLOSSES_REGEX: Lazy<Regex> = Lazy::new(|| level_regex("glb"));
static TRANSLATION_REGEX: Lazy<Regex> = Lazy::new(|| level_regex("glft"));

/// `\name{}` gloss macros, reduced to `name`
static EMPTY_BRACES_COMMAND_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(\w+)\{\}").expect("Invalid command regex")
});

/// Bare `\name` not opening an argument, reduced to `name`
static BARE_ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(\w+\b(?:[^{]|$))").expect("Invalid escape regex")
});

fn level_regex(level: &str) -> Regex {
    Regex::new(&format!(r"(?m)^ *\\{}( .+)//$", level)).expect("Invalid gloss level regex")
}

/// Options controlling extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Drop bracket, slash and pipe tokens before the alignment check
    pub demand_char_like_words: bool,

    /// Extension of documents picked up by `parse_dir`
    pub document_extension: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            demand_char_like_words: true,
            document_extension: "tex".to_string(),
        }
    }
}

impl From<&crate::app_config::ExtractionConfig> for ExtractOptions {
    fn from(config: &crate::app_config::ExtractionConfig) -> Self {
        Self {
            demand_char_like_words: config.demand_char_like_words,
            document_extension: config.document_extension.clone(),
        }
    }
}

/// Counters collected while extracting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Outer `\ex`/`\pex` spans found
    pub spans: usize,
    /// Parts examined across all spans
    pub parts: usize,
    /// Examples emitted
    pub examples: usize,
    /// Parts lacking a words or glosses line
    pub structural_mismatches: usize,
    /// Parts whose token counts differ
    pub alignment_mismatches: usize,
}

impl ExtractionReport {
    fn record(&mut self, outcome: &Result<GlossExample, ExtractionError>) {
        self.parts += 1;
        match outcome {
            Ok(_) => self.examples += 1,
            Err(ExtractionError::StructuralMismatch(_)) => self.structural_mismatches += 1,
            Err(ExtractionError::AlignmentMismatch { .. }) => self.alignment_mismatches += 1,
        }
    }

    /// Add another report's counters to this one
    pub fn merge(&mut self, other: &ExtractionReport) {
        self.spans += other.spans;
        self.parts += other.parts;
        self.examples += other.examples;
        self.structural_mismatches += other.structural_mismatches;
        self.alignment_mismatches += other.alignment_mismatches;
    }
}

/// Extractor for expex gloss examples
#[derive(Debug, Clone, Default)]
pub struct ExampleExtractor {
    options: ExtractOptions,
}

impl ExampleExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Find every well-formed, aligned example in a document
    pub fn find_examples(&self, text: &str) -> Vec<GlossExample> {
        self.find_examples_with_report(text).0
    }

    /// Like `find_examples`, also returning what was skipped and why
    pub fn find_examples_with_report(&self, text: &str) -> (Vec<GlossExample>, ExtractionReport) {
        let mut examples = Vec::new();
        let mut report = ExtractionReport::default();
        let text = normalize_line_endings(text);

        for captures in EXAMPLE_REGEX.captures_iter(&text) {
            report.spans += 1;

            let span = captures.get(0).map_or("", |m| m.as_str());
            let is_multipart = captures.name("start").is_some_and(|m| m.as_str() == MULTIPART_MARKER);

            let parts = if is_multipart {
                split_parts(span)
            } else {
                vec![span]
            };

            for part in parts {
                let outcome = self.extract_part(part);
                report.record(&outcome);

                match outcome {
                    Ok(example) => examples.push(example),
                    Err(e) => debug!("Skipping example part: {}", e),
                }
            }
        }

        (examples, report)
    }

    /// Parse a single example part into an aligned example
    pub fn extract_part(&self, part: &str) -> Result<GlossExample, ExtractionError> {
        let words_line = capture_level(&ORIG_WORDS_REGEX, part)
            .ok_or(ExtractionError::StructuralMismatch("words"))?;
        let glosses_line = capture_level(&GLOSSES_REGEX, part)
            .ok_or(ExtractionError::StructuralMismatch("glosses"))?;
        let translation = capture_level(&TRANSLATION_REGEX, part)
            .map(|line| line.trim().to_string());

        let mut words = tokenize_line(&remove_extras(words_line));
        let mut glosses = tokenize_line(&remove_extras(glosses_line));

        if self.options.demand_char_like_words {
            words.retain(|token| !is_excluded_token(token));
            glosses.retain(|token| !is_excluded_token(token));
        }

        let (word_count, gloss_count) = (words.len(), glosses.len());
        GlossExample::from_aligned(words, glosses, translation).ok_or(ExtractionError::AlignmentMismatch {
            words: word_count,
            glosses: gloss_count,
        })
    }

    /// Extract from every document under `dir`, tagging each example with
    /// its document's parent directory
    pub fn parse_dir<P: AsRef<Path>>(&self, dir: P) -> Result<(Vec<GlossExample>, ExtractionReport)> {
        let files = FileManager::find_files(dir.as_ref(), &self.options.document_extension)?;
        info!("Scanning {} document(s) under {:?}", files.len(), dir.as_ref());

        let mut examples = Vec::new();
        let mut report = ExtractionReport::default();

        for file in files {
            let text = match FileManager::read_to_string(&file) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping unreadable document: {:#}", e);
                    continue;
                }
            };

            let (found, file_report) = self.find_examples_with_report(&text);
            report.merge(&file_report);

            if !found.is_empty() {
                debug!("{:?}: {} example(s)", file, found.len());
            }

            let source = FileManager::source_identifier(&file);
            examples.extend(found.into_iter().map(|example| example.with_source(source.clone())));
        }

        Ok((examples, report))
    }
}

/// Extract examples from text with the given punctuation policy
pub fn find_examples(text: &str, demand_char_like_words: bool) -> Vec<GlossExample> {
    ExampleExtractor::new(ExtractOptions {
        demand_char_like_words,
        ..ExtractOptions::default()
    })
    .find_examples(text)
}

/// Extract examples from every `.tex` document under `dir`
pub fn parse_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<GlossExample>> {
    Ok(ExampleExtractor::default().parse_dir(dir)?.0)
}

/// Convert `\r\n` and lone `\r` line ends to `\n`
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Split a `\pex` span into its `\a` parts.
///
/// Each part runs from its marker up to the next marker or the end marker.
fn split_parts(span: &str) -> Vec<&str> {
    let body = span.strip_suffix(END_MARKER).unwrap_or(span);
    let starts: Vec<usize> = PART_MARKER_REGEX.find_iter(body).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(body.len());
            &body[start..end]
        })
        .collect()
}

fn capture_level<'t>(regex: &Regex, part: &'t str) -> Option<&'t str> {
    regex.captures(part).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Strip markup noise so that only alignable tokens remain
pub fn remove_extras(line: &str) -> String {
    let mut cleaned = EMPTY_BRACES_COMMAND_REGEX.replace_all(line, "${1}").into_owned();

    // Adjacent escapes share a boundary character, hence several passes
    for _ in 0..ESCAPE_STRIP_PASSES {
        cleaned = BARE_ESCAPE_REGEX.replace_all(&cleaned, "${1}").into_owned();
    }

    cleaned
}

fn tokenize_line(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn is_excluded_token(token: &str) -> bool {
    EXCLUDED_TOKENS.contains(&token)
}
