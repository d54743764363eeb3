// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use glosstex::app_config::{self, Config};
use glosstex::app_controller::{Controller, GenerateOptions, GenerationMode};
use glosstex::extractor::ExtractOptions;

/// CLI Wrapper for GenerationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationMode {
    Paired,
    Various,
    Synthetic,
    Original,
}

impl From<CliGenerationMode> for GenerationMode {
    fn from(cli_mode: CliGenerationMode) -> Self {
        match cli_mode {
            CliGenerationMode::Paired => GenerationMode::Paired,
            CliGenerationMode::Various => GenerationMode::Various,
            CliGenerationMode::Synthetic => GenerationMode::Synthetic,
            CliGenerationMode::Original => GenerationMode::Original,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract gloss examples from every LaTeX file under a directory
    Extract {
        /// Directory to scan recursively
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Corpus file to write (defaults to output.corpus_file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep bracket, slash and pipe tokens when checking alignment
        #[arg(long)]
        keep_punctuation: bool,
    },

    /// Regenerate examples from a corpus as LaTeX sources and render them
    Generate {
        /// Corpus file produced by `extract`
        #[arg(value_name = "CORPUS")]
        corpus: PathBuf,

        /// Which examples to produce
        #[arg(short, long, value_enum, default_value = "synthetic")]
        mode: CliGenerationMode,

        /// Number of sampled examples per batch
        #[arg(short, long)]
        k: Option<usize>,

        /// Directory receiving generated sources
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Manifest file to write
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// First corpus index to regenerate (original mode)
        #[arg(long, default_value_t = 0)]
        start_index: usize,

        /// Write sources without invoking the compiler
        #[arg(long)]
        no_render: bool,
    },

    /// Convert every PDF in a directory to PNG
    Rasterize {
        /// Directory containing PDF files
        #[arg(value_name = "PDF_DIR")]
        pdf_dir: PathBuf,

        /// Directory receiving PNG files (defaults to render.image_dir)
        #[arg(value_name = "PNG_DIR")]
        png_dir: Option<PathBuf>,
    },

    /// Build the token vocabulary from a manifest
    Vocab {
        /// Manifest file produced by `generate`
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Token file to write (defaults to output.token_file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions for glosstex
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// glosstex - interlinear gloss examples for image-to-markup training
#[derive(Parser, Debug)]
#[command(name = "glosstex")]
#[command(version = "1.0.0")]
#[command(about = "Extract, regenerate and tokenize expex gloss examples")]
#[command(long_about = "glosstex finds expex interlinear gloss examples in LaTeX sources, regenerates them
as standalone documents, renders them to images and builds a formula token vocabulary.

EXAMPLES:
    glosstex extract data-students -o examples.json    # Extract examples from a directory
    glosstex generate examples.json -m paired -k 100   # Render 100 paired samples
    glosstex generate examples.json --no-render        # Only write sources and manifest
    glosstex rasterize ./pdf ./png                     # Convert rendered PDFs to PNG
    glosstex vocab im2expex.csv -o latex_tokens.json   # Build the token vocabulary
    glosstex completions bash > glosstex.bash          # Generate bash completions

CONFIGURATION:
    Configuration is stored in glosstex.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "glosstex.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Records are filtered by the max level, which is lowered once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "glosstex", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;
    log::set_max_level(config.log_level.to_level_filter());

    run_command(cli.command, config)
}

/// Load the configuration file, creating a default one when missing
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Command line log level wins over the file
    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Extract { input_dir, output, keep_punctuation } => {
            let output = output.unwrap_or_else(|| config.output.corpus_file.clone());
            let mut options = ExtractOptions::from(&config.extraction);
            if keep_punctuation {
                options.demand_char_like_words = false;
            }

            let controller = Controller::with_config(config)?;
            controller.run_extract(&input_dir, &output, Some(options))?;
        }
        Commands::Generate { corpus, mode, k, out_dir, manifest, seed, start_index, no_render } => {
            if let Some(k) = k {
                config.sampling.k = k;
            }
            if seed.is_some() {
                config.sampling.seed = seed;
            }

            let options = GenerateOptions {
                corpus_file: corpus,
                mode: mode.into(),
                tex_dir: out_dir.unwrap_or_else(|| config.output.tex_dir.clone()),
                manifest_file: manifest.unwrap_or_else(|| config.output.manifest_file.clone()),
                start_index,
                render: !no_render,
            };

            let controller = Controller::with_config(config)?;
            let rows = controller.run_generate(&options)?;
            info!("Generated {} example(s)", rows.len());
        }
        Commands::Rasterize { pdf_dir, png_dir } => {
            let controller = Controller::with_config(config)?;
            controller.run_rasterize(&pdf_dir, png_dir.as_deref())?;
        }
        Commands::Vocab { manifest, output } => {
            let output = output.unwrap_or_else(|| config.output.token_file.clone());
            let controller = Controller::with_config(config)?;
            controller.run_vocab(&manifest, &output)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
