use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

use crate::errors::AppError;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Synthetic sampling settings
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// External render pipeline settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Default output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings for scanning documents for gloss examples
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Drop bracket, slash and pipe tokens before checking alignment
    #[serde(default = "default_true")]
    pub demand_char_like_words: bool,

    /// Extension of documents to scan, without the dot
    #[serde(default = "default_document_extension")]
    pub document_extension: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            demand_char_like_words: true,
            document_extension: default_document_extension(),
        }
    }
}

/// Settings for synthetic example sampling
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SamplingConfig {
    /// Number of sequences per batch
    #[serde(default = "default_batch_size")]
    pub k: usize,

    /// Shortest sequence length (inclusive)
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Longest sequence length (exclusive)
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Seed for reproducible batches; OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            k: default_batch_size(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            seed: None,
        }
    }
}

impl SamplingConfig {
    /// Half-open range of sequence lengths
    pub fn length_range(&self) -> std::ops::Range<usize> {
        self.min_length..self.max_length
    }
}

/// Settings for the typesetting compiler and the rasterizer
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RenderConfig {
    /// Typesetting compiler executable
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Directory receiving the compiler's PDF output
    #[serde(default = "default_aux_dir")]
    pub aux_dir: PathBuf,

    /// Pass `-quiet` to the compiler
    #[serde(default)]
    pub quiet: bool,

    /// Rasterizer executable
    #[serde(default = "default_rasterizer")]
    pub rasterizer: String,

    /// Directory receiving rasterized images
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,

    /// Raster resolution in DPI
    #[serde(default = "default_resolution")]
    pub resolution: u32,

    /// Ghostscript output device
    #[serde(default = "default_device")]
    pub device: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            aux_dir: default_aux_dir(),
            quiet: false,
            rasterizer: default_rasterizer(),
            image_dir: default_image_dir(),
            resolution: default_resolution(),
            device: default_device(),
        }
    }
}

/// Default output paths used when the CLI does not override them
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Extracted corpus file
    #[serde(default = "default_corpus_file")]
    pub corpus_file: PathBuf,

    /// Directory receiving generated `.tex` sources
    #[serde(default = "default_tex_dir")]
    pub tex_dir: PathBuf,

    /// Batch manifest file
    #[serde(default = "default_manifest_file")]
    pub manifest_file: PathBuf,

    /// Token vocabulary file
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            corpus_file: default_corpus_file(),
            tex_dir: default_tex_dir(),
            manifest_file: default_manifest_file(),
            token_file: default_token_file(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_document_extension() -> String {
    "tex".to_string()
}

fn default_batch_size() -> usize {
    300
}

fn default_min_length() -> usize {
    4
}

fn default_max_length() -> usize {
    9
}

fn default_compiler() -> String {
    "xelatex".to_string()
}

fn default_aux_dir() -> PathBuf {
    PathBuf::from("./pdf")
}

fn default_rasterizer() -> String {
    "gs".to_string()
}

fn default_image_dir() -> PathBuf {
    PathBuf::from("./png")
}

fn default_resolution() -> u32 {
    144
}

fn default_device() -> String {
    "pngalpha".to_string()
}

fn default_corpus_file() -> PathBuf {
    PathBuf::from("examples.json")
}

fn default_tex_dir() -> PathBuf {
    PathBuf::from("./tex")
}

fn default_manifest_file() -> PathBuf {
    PathBuf::from("im2expex.csv")
}

fn default_token_file() -> PathBuf {
    PathBuf::from("latex_tokens.json")
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.sampling.min_length == 0 {
            return Err(AppError::Config("sampling.min_length must be at least 1".to_string()));
        }

        if self.sampling.min_length >= self.sampling.max_length {
            return Err(AppError::Config(format!(
                "sampling length range {}..{} is empty",
                self.sampling.min_length, self.sampling.max_length
            )));
        }

        if self.extraction.document_extension.trim().is_empty() {
            return Err(AppError::Config("extraction.document_extension must not be empty".to_string()));
        }

        if self.render.compiler.trim().is_empty() || self.render.rasterizer.trim().is_empty() {
            return Err(AppError::Config("render executables must not be empty".to_string()));
        }

        if self.render.resolution == 0 {
            return Err(AppError::Config("render.resolution must be positive".to_string()));
        }

        Ok(())
    }
}
