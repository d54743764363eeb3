/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use glosstex::app_config::Config;
use glosstex::app_controller::{Controller, GenerateOptions, GenerationMode};
use glosstex::manifest;
use std::path::Path;
use crate::common;

fn seeded_config(k: usize) -> Config {
    let mut config = Config::default();
    config.sampling.k = k;
    config.sampling.seed = Some(7);
    config
}

fn dry_run_options(dir: &Path, corpus_file: &Path, mode: GenerationMode) -> GenerateOptions {
    GenerateOptions {
        corpus_file: corpus_file.to_path_buf(),
        mode,
        tex_dir: dir.join("tex"),
        manifest_file: dir.join("im2expex.csv"),
        start_index: 0,
        render: false,
    }
}

/// Test that an invalid configuration is rejected
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.sampling.max_length = config.sampling.min_length;

    assert!(Controller::with_config(config).is_err());
}

/// Test that extraction of a missing directory fails before writing anything
#[test]
fn test_runExtract_withMissingDirectory_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;
    let output = temp_dir.path().join("examples.json");

    assert!(controller.run_extract(&temp_dir.path().join("missing"), &output, None).is_err());
    assert!(!output.exists());

    Ok(())
}

/// Test the extract → generate → vocab workflow without a TeX toolchain
#[test]
fn test_fullWorkflow_withDryRun_shouldProduceCorpusManifestAndTokens() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let work = temp_dir.path();
    common::create_test_document(work, "data/student one/hw.tex")?;
    let controller = Controller::with_config(seeded_config(4))?;

    let corpus_file = work.join("examples.json");
    let extracted = controller.run_extract(&work.join("data"), &corpus_file, None)?;
    assert_eq!(extracted, 3);

    let options = dry_run_options(work, &corpus_file, GenerationMode::Synthetic);
    let rows = controller.run_generate(&options)?;
    assert_eq!(rows.len(), 8);
    assert!(work.join("tex/paired-0.tex").exists());
    assert!(work.join("tex/var-3.tex").exists());
    assert_eq!(manifest::read_manifest(&options.manifest_file)?, rows);

    let token_file = work.join("latex_tokens.json");
    let token_count = controller.run_vocab(&options.manifest_file, &token_file)?;
    let tokens: Vec<String> = serde_json::from_str(&std::fs::read_to_string(&token_file)?)?;
    assert_eq!(tokens.len(), token_count);
    assert_eq!(tokens[0], "<p>");

    Ok(())
}

/// Test that original mode regenerates the corpus examples in order
#[test]
fn test_runGenerate_withOriginalMode_shouldWriteOneSourcePerExample() -> Result<()> {
    common::init_test_logger();
    let temp_dir = common::create_temp_dir()?;
    let corpus_file = temp_dir.path().join("examples.json");
    glosstex::corpus::save_examples(&corpus_file, &common::sample_corpus())?;
    let controller = Controller::with_config(Config::default())?;

    let mut options = dry_run_options(temp_dir.path(), &corpus_file, GenerationMode::Original);
    options.start_index = 1;
    let rows = controller.run_generate(&options)?;

    assert_eq!(rows.len(), 3);
    assert!(!temp_dir.path().join("tex/orig-0.tex").exists());
    assert!(temp_dir.path().join("tex/orig-3.tex").exists());

    Ok(())
}

/// Test that the same seed produces the same batch
#[test]
fn test_runGenerate_withSeed_shouldBeReproducible() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let corpus_file = temp_dir.path().join("examples.json");
    glosstex::corpus::save_examples(&corpus_file, &common::sample_corpus())?;

    let first = Controller::with_config(seeded_config(6))?
        .run_generate(&dry_run_options(temp_dir.path(), &corpus_file, GenerationMode::Various))?;
    let second = Controller::with_config(seeded_config(6))?
        .run_generate(&dry_run_options(temp_dir.path(), &corpus_file, GenerationMode::Various))?;

    assert_eq!(first, second);
    assert_eq!(first.len(), 6);

    Ok(())
}

/// Test that rasterizing a missing directory fails
#[test]
fn test_runRasterize_withMissingDirectory_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;

    assert!(controller.run_rasterize(Path::new("no/such/pdf/dir"), None).is_err());

    Ok(())
}
