/*!
 * Integration tests for batch generation with a recording renderer
 */

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use glosstex::extractor;
use glosstex::render::{self, RecordingRenderer};
use glosstex::synthesizer::{self, BatchGenerator};
use glosstex::tokenizer;
use glosstex::vocabulary::Vocabulary;
use crate::common;

/// Test that each sampled sentence is written, rendered and listed in order
#[test]
fn test_generateSampled_withRecordingRenderer_shouldWriteAndRenderEachSource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let vocab = Vocabulary::from_examples(&common::sample_corpus());
    let mut rng = StdRng::seed_from_u64(1);
    let sentences = synthesizer::sample_sentences_paired(&vocab, 5, 4..9, &mut rng);
    let template = temp_dir.path().join("tex/paired-{i}.tex");

    let renderer = RecordingRenderer::new();
    let rows = BatchGenerator::new(&renderer).generate_sampled(sentences, template.to_str().unwrap())?;

    assert_eq!(rows.len(), 5);
    let calls = renderer.calls();
    assert_eq!(calls.len(), 5);
    for (i, (row, source)) in rows.iter().zip(&calls).enumerate() {
        assert_eq!(source, &temp_dir.path().join(format!("tex/paired-{}.tex", i)));
        assert!(source.exists());
        assert_eq!(row.image, temp_dir.path().join(format!("tex/paired-{}.png", i)).to_string_lossy());
        assert!(row.formula.starts_with("\\ex\n") && row.formula.ends_with("\\xe"));
    }

    Ok(())
}

/// Test that paired samples read back from disk only contain vocabulary pairs
#[test]
fn test_generateSampled_paired_shouldWriteExtractableVocabularyPairs() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let vocab = Vocabulary::from_examples(&common::sample_corpus());
    let mut rng = StdRng::seed_from_u64(99);
    let sentences = synthesizer::sample_sentences_paired(&vocab, 10, 4..9, &mut rng);
    let template = temp_dir.path().join("paired-{i}.tex");

    let renderer = RecordingRenderer::new();
    BatchGenerator::new(&renderer).generate_sampled(sentences, template.to_str().unwrap())?;

    for source in renderer.calls() {
        let examples = extractor::find_examples(&std::fs::read_to_string(&source)?, true);
        assert_eq!(examples.len(), 1);
        for item in &examples[0].items {
            assert!(vocab.contains_pair(&item.word, &item.gloss), "{:?} is not a vocabulary pair", item);
        }
    }

    Ok(())
}

/// Test that original regeneration keeps corpus indices and skips earlier ones
#[test]
fn test_generateOriginal_withStartIndex_shouldSkipEarlierExamples() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let corpus = common::sample_corpus();
    let template = temp_dir.path().join("orig-{i}.tex");

    let renderer = RecordingRenderer::new();
    let rows = BatchGenerator::new(&renderer).generate_original(&corpus, template.to_str().unwrap(), 2)?;

    assert_eq!(rows.len(), 2);
    assert_eq!(
        renderer.calls(),
        vec![temp_dir.path().join("orig-2.tex"), temp_dir.path().join("orig-3.tex")]
    );
    assert!(rows[0].formula.contains("\\gla dom stoit tam //"));

    Ok(())
}

/// Test that manifest formulas tokenize into a vocabulary of example markup
#[test]
fn test_generatedFormulas_shouldBuildTokenVocabulary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let template = temp_dir.path().join("orig-{i}.tex");
    let renderer = RecordingRenderer::new();
    let rows = BatchGenerator::new(&renderer).generate_original(&common::sample_corpus(), template.to_str().unwrap(), 0)?;

    let tokens = tokenizer::build_token_vocabulary(rows.iter().map(|r| r.formula.as_str()));

    assert_eq!(&tokens[..3], &["<p>", "<s>", "<e>"]);
    assert_eq!(tokens[3], "\\ex");
    for command in ["\\begingl", "\\gla", "\\glb", "\\endgl", "\\xe"] {
        assert!(tokens.iter().any(|t| t == command), "missing {}", command);
    }

    Ok(())
}

/// Test that rasterize_dir visits every PDF and nothing else
#[test]
fn test_rasterizeDir_withRecordingRasterizer_shouldVisitPdfFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "pdf/a.pdf", "")?;
    common::create_test_file(temp_dir.path(), "pdf/b.pdf", "")?;
    common::create_test_file(temp_dir.path(), "pdf/a.log", "")?;

    let rasterizer = RecordingRenderer::new();
    let statuses = render::rasterize_dir(&rasterizer, &temp_dir.path().join("pdf"), &temp_dir.path().join("png"))?;

    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|(_, status)| status.success));
    assert_eq!(rasterizer.calls()[0], temp_dir.path().join("pdf/a.pdf"));

    Ok(())
}
