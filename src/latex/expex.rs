/*!
 * expex example nodes: `\ex`/`\pex` blocks and `\begingl` gloss blocks.
 */

use std::fmt;

use super::model::write_lines;
use crate::gloss::GlossExample;

/// Line marker of the source words
pub const WORDS_LEVEL: &str = "gla";
/// Line marker of the glosses
pub const GLOSSES_LEVEL: &str = "glb";
/// Line marker of the free translation
pub const TRANSLATION_LEVEL: &str = "glft";
/// Terminator of every gloss line
pub const LINE_END: &str = "//";

/// `\begingl` ... `\endgl` with up to three aligned lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossedExampleBlock {
    pub words: Vec<String>,
    pub glosses: Vec<String>,
    pub translation: Option<String>,
}

impl GlossedExampleBlock {
    pub fn new(words: Vec<String>, glosses: Vec<String>, translation: Option<String>) -> Self {
        Self {
            words,
            glosses,
            translation,
        }
    }

    fn level_line(level: &str, content: &str) -> String {
        format!("\\{} {} {}", level, content, LINE_END)
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![r"\begingl".to_string()];

        if !self.words.is_empty() {
            lines.push(Self::level_line(WORDS_LEVEL, &self.words.join(" ")));
        }
        if !self.glosses.is_empty() {
            lines.push(Self::level_line(GLOSSES_LEVEL, &self.glosses.join(" ")));
        }
        if let Some(translation) = self.translation.as_deref().filter(|t| !t.is_empty()) {
            lines.push(Self::level_line(TRANSLATION_LEVEL, translation));
        }

        lines.push(r"\endgl".to_string());
        lines
    }
}

impl From<&GlossExample> for GlossedExampleBlock {
    fn from(example: &GlossExample) -> Self {
        Self {
            words: example.items.iter().map(|item| item.word.clone()).collect(),
            glosses: example.items.iter().map(|item| item.gloss.clone()).collect(),
            translation: example.translation.clone(),
        }
    }
}

impl fmt::Display for GlossedExampleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lines(f, &self.lines())
    }
}

/// One `\a` part of a multi-part example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamplePart {
    pub block: GlossedExampleBlock,
}

impl ExamplePart {
    pub fn new(block: GlossedExampleBlock) -> Self {
        Self { block }
    }
}

impl fmt::Display for ExamplePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\a\n{}", self.block)
    }
}

/// `\ex ... \xe` for one part, `\pex \a ... \a ... \xe` for several
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub parts: Vec<ExamplePart>,
}

impl Example {
    pub fn new(parts: Vec<ExamplePart>) -> Self {
        Self { parts }
    }

    pub fn single(block: GlossedExampleBlock) -> Self {
        Self::new(vec![ExamplePart::new(block)])
    }

    pub fn is_multipart(&self) -> bool {
        self.parts.len() > 1
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multipart() {
            writeln!(f, "\\pex")?;
            write_lines(f, &self.parts)?;
            writeln!(f)?;
        } else {
            writeln!(f, "\\ex")?;
            if let Some(part) = self.parts.first() {
                writeln!(f, "{}", part.block)?;
            }
        }
        write!(f, "\\xe")
    }
}
