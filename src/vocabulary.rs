/*!
 * Word to gloss vocabulary derived from a corpus.
 *
 * Each word keeps the first gloss it was seen with. Later conflicting
 * glosses are reported as warnings and otherwise ignored.
 */

use log::warn;
use std::collections::HashMap;

use crate::errors::VocabularyConflict;
use crate::gloss::GlossExample;

/// Immutable word → canonical gloss mapping
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    glosses: HashMap<String, String>,
    conflicts: Vec<VocabularyConflict>,
}

impl Vocabulary {
    /// Build a vocabulary from a corpus, first-seen-wins
    pub fn from_examples(examples: &[GlossExample]) -> Self {
        let mut glosses: HashMap<String, String> = HashMap::new();
        let mut conflicts = Vec::new();

        for item in examples.iter().flat_map(|example| example.items.iter()) {
            match glosses.get(&item.word) {
                Some(existing) if existing != &item.gloss => {
                    let conflict = VocabularyConflict {
                        word: item.word.clone(),
                        existing: existing.clone(),
                        rejected: item.gloss.clone(),
                    };
                    warn!("{}", conflict);
                    conflicts.push(conflict);
                }
                Some(_) => {}
                None => {
                    glosses.insert(item.word.clone(), item.gloss.clone());
                }
            }
        }

        Self { glosses, conflicts }
    }

    /// Canonical gloss for a word
    pub fn gloss_for(&self, word: &str) -> Option<&str> {
        self.glosses.get(word).map(String::as_str)
    }

    pub fn contains_pair(&self, word: &str, gloss: &str) -> bool {
        self.gloss_for(word) == Some(gloss)
    }

    /// All words, sorted
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.glosses.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Multiset of canonical glosses, sorted
    pub fn glosses(&self) -> Vec<&str> {
        let mut glosses: Vec<&str> = self.glosses.values().map(String::as_str).collect();
        glosses.sort_unstable();
        glosses
    }

    /// Conflicts observed while building
    pub fn conflicts(&self) -> &[VocabularyConflict] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.glosses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glosses.is_empty()
    }
}
