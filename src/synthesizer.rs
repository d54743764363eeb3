/*!
 * Regeneration of gloss examples as standalone LaTeX documents.
 *
 * Sequences come from three places: real corpus examples, paired samples
 * (words with their own glosses) and various samples (words and glosses
 * drawn independently, so the pairing is nonsense but the layout is
 * valid). Each one is wrapped in a centered minipage inside a standalone
 * document, written to disk and handed to a `Renderer`.
 */

use anyhow::Result;
use indicatif::ProgressBar;
use log::{debug, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::ops::Range;
use std::path::Path;

use crate::file_utils::FileManager;
use crate::gloss::GlossExample;
use crate::latex::{Command, Declaration, Document, EnvironmentTree, Example, GlossedExampleBlock, LatexNode};
use crate::manifest::ManifestRow;
use crate::render::Renderer;
use crate::vocabulary::Vocabulary;

/// Default half-open range of sampled sequence lengths
pub const DEFAULT_LENGTH_RANGE: Range<usize> = 4..9;

/// Default number of sequences per sampled batch
pub const DEFAULT_BATCH_SIZE: usize = 300;

/// Width of the minipage holding the example
const EXAMPLE_WIDTH: &str = r".9\textwidth";

/// A sampled word sequence with one gloss per word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledSentence {
    pub words: Vec<String>,
    pub glosses: Vec<String>,
}

impl SampledSentence {
    pub fn into_block(self) -> GlossedExampleBlock {
        GlossedExampleBlock::new(self.words, self.glosses, None)
    }
}

/// Preamble of every generated document
pub fn default_preamble() -> Vec<LatexNode> {
    vec![
        Declaration::document_class("standalone").with_flag("preview").into(),
        Declaration::package("babel").with_flag("english").with_flag("russian").into(),
        Declaration::package("fontspec").into(),
        Declaration::package("noto").into(),
        Declaration::package("color").into(),
        Command::new("pagecolor", &["white"]).into(),
        Declaration::package("expex").into(),
    ]
}

/// Wrap one gloss block into a full document.
///
/// Returns the document and the example node, whose text is the formula
/// recorded in the manifest.
pub fn build_example_document(block: GlossedExampleBlock) -> (Document, Example) {
    let example = Example::single(block);

    let mut tree = EnvironmentTree::new();
    let minipage = tree.add_root("minipage", &[EXAMPLE_WIDTH]);
    let center = tree.add_environment(minipage, "center", &[]);
    tree.add_content(center, example.clone());

    let top = tree.top_ancestor(center);
    let layout = tree.build(top);
    let document = Document::new(default_preamble(), vec![layout.into()]);

    (document, example)
}

/// Full document text for one example
pub fn serialize_example(words: &[String], glosses: &[String], translation: Option<&str>) -> String {
    let block = GlossedExampleBlock::new(words.to_vec(), glosses.to_vec(), translation.map(str::to_string));
    build_example_document(block).0.to_string()
}

/// Write the document for `block` to `path` and render it.
///
/// Render failures are logged; only failure to write the source is an error.
pub fn generate_example<R: Renderer + ?Sized>(
    renderer: &R,
    block: GlossedExampleBlock,
    path: &Path,
) -> Result<(Document, Example)> {
    let (document, example) = build_example_document(block);
    FileManager::write_to_file(path, &document.to_string())?;

    match renderer.render(path) {
        Ok(status) if !status.success => warn!("Rendering {:?} failed with {:?}", path, status.code),
        Ok(_) => debug!("Rendered {:?}", path),
        Err(e) => warn!("Rendering {:?} failed: {}", path, e),
    }

    Ok((document, example))
}

fn sample_length<R: Rng>(rng: &mut R, lengths: &Range<usize>, pool: usize) -> usize {
    rng.random_range(lengths.clone()).min(pool)
}

/// Sample distinct words, each with its canonical gloss
pub fn sample_sentence_paired<R: Rng>(vocabulary: &Vocabulary, length: usize, rng: &mut R) -> SampledSentence {
    let words = vocabulary.words();

    let (words, glosses) = words
        .choose_multiple(rng, length)
        .filter_map(|word| vocabulary.gloss_for(word).map(|gloss| (word.to_string(), gloss.to_string())))
        .unzip();

    SampledSentence { words, glosses }
}

/// Sample `k` paired sentences with lengths drawn from `lengths`
pub fn sample_sentences_paired<R: Rng>(
    vocabulary: &Vocabulary,
    k: usize,
    lengths: Range<usize>,
    rng: &mut R,
) -> Vec<SampledSentence> {
    if lengths.is_empty() {
        warn!("Empty length range {:?}, nothing sampled", lengths);
        return Vec::new();
    }
    if vocabulary.is_empty() {
        warn!("Empty vocabulary, nothing sampled");
        return Vec::new();
    }

    (0..k)
        .map(|_| {
            let length = sample_length(rng, &lengths, vocabulary.len());
            sample_sentence_paired(vocabulary, length, rng)
        })
        .collect()
}

/// Sample words and glosses independently of each other
pub fn sample_sentence_various<R: Rng>(
    all_words: &[&str],
    all_glosses: &[&str],
    length: usize,
    rng: &mut R,
) -> SampledSentence {
    let length = length.min(all_words.len()).min(all_glosses.len());

    SampledSentence {
        words: all_words.choose_multiple(rng, length).map(|w| w.to_string()).collect(),
        glosses: all_glosses.choose_multiple(rng, length).map(|g| g.to_string()).collect(),
    }
}

/// Sample `k` sentences whose glosses do not belong to their words
pub fn sample_sentences_various<R: Rng>(
    vocabulary: &Vocabulary,
    k: usize,
    lengths: Range<usize>,
    rng: &mut R,
) -> Vec<SampledSentence> {
    if lengths.is_empty() {
        warn!("Empty length range {:?}, nothing sampled", lengths);
        return Vec::new();
    }
    if vocabulary.is_empty() {
        warn!("Empty vocabulary, nothing sampled");
        return Vec::new();
    }

    let all_words = vocabulary.words();
    let all_glosses = vocabulary.glosses();

    (0..k)
        .map(|_| {
            let length = sample_length(rng, &lengths, all_words.len());
            sample_sentence_various(&all_words, &all_glosses, length, rng)
        })
        .collect()
}

/// Writes and renders numbered examples, collecting manifest rows
pub struct BatchGenerator<'a, R: Renderer + ?Sized> {
    renderer: &'a R,
    progress: Option<ProgressBar>,
}

impl<'a, R: Renderer + ?Sized> BatchGenerator<'a, R> {
    pub fn new(renderer: &'a R) -> Self {
        Self {
            renderer,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Generate one document per `(index, block)`.
    ///
    /// `template` is a path containing `{i}`, replaced by the index.
    pub fn generate<I>(&self, blocks: I, template: &str) -> Result<Vec<ManifestRow>>
    where
        I: IntoIterator<Item = (usize, GlossedExampleBlock)>,
    {
        let mut rows = Vec::new();

        for (index, block) in blocks {
            let source = FileManager::expand_template(template, index);
            let (_, example) = generate_example(self.renderer, block, &source)?;

            let image = FileManager::image_path_for(&source);
            rows.push(ManifestRow::new(example.to_string(), image.to_string_lossy()));

            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
        }

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        Ok(rows)
    }

    /// Regenerate sampled sentences, numbered from zero
    pub fn generate_sampled(&self, sentences: Vec<SampledSentence>, template: &str) -> Result<Vec<ManifestRow>> {
        self.generate(
            sentences.into_iter().map(SampledSentence::into_block).enumerate(),
            template,
        )
    }

    /// Regenerate corpus examples, skipping indices below `start_index`
    pub fn generate_original(&self, examples: &[GlossExample], template: &str, start_index: usize) -> Result<Vec<ManifestRow>> {
        self.generate(
            examples
                .iter()
                .enumerate()
                .skip(start_index)
                .map(|(index, example)| (index, GlossedExampleBlock::from(example))),
            template,
        )
    }
}
