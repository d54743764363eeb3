/*!
 * Interlinear gloss example types.
 *
 * A `GlossExample` is what the extractor produces and what the corpus
 * file stores: aligned word/gloss pairs, an optional free translation
 * and the provenance of the example.
 */

use serde::{Deserialize, Serialize};

/// A single aligned word and its gloss
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossItem {
    pub word: String,
    pub gloss: String,
}

impl GlossItem {
    pub fn new(word: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            gloss: gloss.into(),
        }
    }
}

/// One interlinear example.
///
/// Words and glosses are stored as pairs, so the two lines can never
/// drift out of alignment once an example exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossExample {
    /// Aligned word/gloss pairs in source order
    pub items: Vec<GlossItem>,

    /// Free translation line, if the example had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,

    /// Originating directory, attached after extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl GlossExample {
    /// Pair up two equally long token sequences.
    ///
    /// Returns `None` when the lengths differ.
    pub fn from_aligned(words: Vec<String>, glosses: Vec<String>, translation: Option<String>) -> Option<Self> {
        if words.len() != glosses.len() {
            return None;
        }

        let items = words
            .into_iter()
            .zip(glosses)
            .map(|(word, gloss)| GlossItem { word, gloss })
            .collect();

        Some(Self {
            items,
            translation,
            source: None,
        })
    }

    pub fn words(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.word.as_str()).collect()
    }

    pub fn glosses(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.gloss.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Attach a provenance identifier
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
