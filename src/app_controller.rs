use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::corpus;
use crate::errors::AppError;
use crate::extractor::{ExampleExtractor, ExtractOptions};
use crate::file_utils::FileManager;
use crate::manifest::{self, ManifestRow};
use crate::render::{self, GhostscriptRasterizer, RecordingRenderer, Renderer, XelatexRenderer};
use crate::synthesizer::{self, BatchGenerator};
use crate::tokenizer;

// @module: Application controller for extraction, generation and vocabulary building

/// Which examples a generation run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Sampled words with their own glosses
    Paired,
    /// Sampled words with unrelated glosses
    Various,
    /// Paired batch followed by a various batch
    Synthetic,
    /// The corpus examples themselves
    Original,
}

impl GenerationMode {
    /// Filename prefix of generated sources
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Paired => "paired",
            Self::Various => "var",
            Self::Synthetic => "synthetic",
            Self::Original => "orig",
        }
    }
}

/// Parameters of one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub corpus_file: PathBuf,
    pub mode: GenerationMode,
    pub tex_dir: PathBuf,
    pub manifest_file: PathBuf,
    /// Skip corpus examples below this index (original mode only)
    pub start_index: usize,
    /// Invoke the typesetting compiler for every written source
    pub render: bool,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn progress_bar(len: u64, unit: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(len);
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
            unit
        );
        let style = ProgressStyle::default_bar()
            .template(&template)
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    fn rng(&self) -> StdRng {
        match self.config.sampling.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Extract every example under `input_dir` and save the corpus
    pub fn run_extract(&self, input_dir: &Path, output_file: &Path, options: Option<ExtractOptions>) -> Result<usize> {
        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        let options = options.unwrap_or_else(|| ExtractOptions::from(&self.config.extraction));
        let extractor = ExampleExtractor::new(options);
        let (examples, report) = extractor.parse_dir(input_dir)?;

        info!(
            "Found {} example span(s), {} part(s): kept {}, {} missing lines, {} misaligned",
            report.spans, report.parts, report.examples, report.structural_mismatches, report.alignment_mismatches
        );

        corpus::save_examples(output_file, &examples)?;
        info!("Saved {} example(s) to {:?}", examples.len(), output_file);

        Ok(examples.len())
    }

    /// Regenerate examples as LaTeX sources, render them and write the manifest
    pub fn run_generate(&self, options: &GenerateOptions) -> Result<Vec<ManifestRow>> {
        let compiler = XelatexRenderer::from_config(&self.config.render);
        let dry_run = RecordingRenderer::new();
        let renderer: &dyn Renderer = if options.render { &compiler } else { &dry_run };

        let rows = self.generate_with(renderer, options)?;

        manifest::write_manifest(&options.manifest_file, &rows)?;
        info!("Wrote {} manifest row(s) to {:?}", rows.len(), options.manifest_file);

        Ok(rows)
    }

    /// Generation with an explicit renderer; does not write the manifest
    pub fn generate_with<R: Renderer + ?Sized>(&self, renderer: &R, options: &GenerateOptions) -> Result<Vec<ManifestRow>> {
        let (examples, vocabulary) = corpus::load_examples(&options.corpus_file)?;
        let sampling = &self.config.sampling;
        let mut rng = self.rng();

        let template = |prefix: &str| -> Result<String> {
            let path = options.tex_dir.join(format!("{}-{{i}}.tex", prefix));
            path.to_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Output directory is not valid UTF-8: {:?}", options.tex_dir))
        };

        let mut rows = Vec::new();
        let mut run_sampled = |mode: GenerationMode, rows: &mut Vec<ManifestRow>| -> Result<()> {
            let sentences = match mode {
                GenerationMode::Paired => {
                    synthesizer::sample_sentences_paired(&vocabulary, sampling.k, sampling.length_range(), &mut rng)
                }
                _ => synthesizer::sample_sentences_various(&vocabulary, sampling.k, sampling.length_range(), &mut rng),
            };
            info!("Generating {} {} example(s)", sentences.len(), mode.file_prefix());

            let generator = BatchGenerator::new(renderer)
                .with_progress(Self::progress_bar(sentences.len() as u64, "examples"));
            rows.extend(generator.generate_sampled(sentences, &template(mode.file_prefix())?)?);
            Ok(())
        };

        match options.mode {
            GenerationMode::Paired | GenerationMode::Various => run_sampled(options.mode, &mut rows)?,
            GenerationMode::Synthetic => {
                run_sampled(GenerationMode::Paired, &mut rows)?;
                run_sampled(GenerationMode::Various, &mut rows)?;
            }
            GenerationMode::Original => {
                if options.start_index >= examples.len() && !examples.is_empty() {
                    warn!("Start index {} is past the end of the corpus ({} examples)", options.start_index, examples.len());
                }
                let pending = examples.len().saturating_sub(options.start_index) as u64;
                let generator = BatchGenerator::new(renderer)
                    .with_progress(Self::progress_bar(pending, "examples"));
                rows.extend(generator.generate_original(
                    &examples,
                    &template(GenerationMode::Original.file_prefix())?,
                    options.start_index,
                )?);
            }
        }

        Ok(rows)
    }

    /// Rasterize every PDF in `pdf_dir` into `png_dir`
    pub fn run_rasterize(&self, pdf_dir: &Path, png_dir: Option<&Path>) -> Result<usize> {
        if !FileManager::dir_exists(pdf_dir) {
            return Err(AppError::File(format!("PDF directory does not exist: {:?}", pdf_dir)).into());
        }

        let png_dir = png_dir.unwrap_or(&self.config.render.image_dir);
        let rasterizer = GhostscriptRasterizer::from_config(&self.config.render);
        let statuses = render::rasterize_dir(&rasterizer, pdf_dir, png_dir)?;

        let failed = statuses.iter().filter(|(_, status)| !status.success).count();
        if failed > 0 {
            warn!("{} of {} page(s) failed to rasterize", failed, statuses.len());
        }
        info!("Rasterized {} page(s) into {:?}", statuses.len() - failed, png_dir);

        Ok(statuses.len() - failed)
    }

    /// Build the token vocabulary from a manifest's formulas
    pub fn run_vocab(&self, manifest_file: &Path, output_file: &Path) -> Result<usize> {
        let rows = manifest::read_manifest(manifest_file)?;
        let tokens = tokenizer::build_token_vocabulary(rows.iter().map(|row| row.formula.as_str()));

        tokenizer::write_token_vocabulary(output_file, &tokens)?;
        info!("Wrote {} token(s) from {} formula(s) to {:?}", tokens.len(), rows.len(), output_file);

        Ok(tokens.len())
    }
}
