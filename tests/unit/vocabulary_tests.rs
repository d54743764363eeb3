/*!
 * Tests for the word vocabulary and corpus files
 */

use anyhow::Result;
use glosstex::corpus;
use glosstex::vocabulary::Vocabulary;
use crate::common;

/// Test that every corpus word appears once
#[test]
fn test_fromExamples_withSampleCorpus_shouldCollectDistinctWords() {
    let vocab = Vocabulary::from_examples(&common::sample_corpus());

    assert_eq!(vocab.len(), 10);
    assert_eq!(vocab.gloss_for("kot"), Some("cat"));
    assert!(vocab.gloss_for("missing").is_none());
    assert!(vocab.conflicts().is_empty());
}

/// Test that a word glossed two ways keeps its first gloss
#[test]
fn test_fromExamples_withConflictingGlosses_shouldKeepFirstAndReport() {
    let corpus = vec![
        common::example(&[("x", "A")]),
        common::example(&[("x", "B")]),
        common::example(&[("x", "C")]),
    ];

    let vocab = Vocabulary::from_examples(&corpus);

    assert_eq!(vocab.gloss_for("x"), Some("A"));
    assert!(vocab.contains_pair("x", "A"));
    assert!(!vocab.contains_pair("x", "B"));
    assert_eq!(vocab.conflicts().len(), 2);
    assert_eq!(vocab.conflicts()[1].to_string(), "'x' already mapped to 'A', ignoring 'C'");
}

/// Test that an empty corpus gives an empty vocabulary
#[test]
fn test_fromExamples_withEmptyCorpus_shouldBeEmpty() {
    let vocab = Vocabulary::from_examples(&[]);

    assert!(vocab.is_empty());
    assert!(vocab.words().is_empty());
}

/// Test that a saved corpus loads back with its vocabulary
#[test]
fn test_loadExamples_withSavedCorpus_shouldReturnExamplesAndVocabulary() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested/examples.json");
    let examples = common::sample_corpus();

    corpus::save_examples(&path, &examples)?;
    let (loaded, vocab) = corpus::load_examples(&path)?;

    assert_eq!(loaded, examples);
    assert_eq!(vocab.len(), 10);

    Ok(())
}

/// Test that a missing corpus file is an error
#[test]
fn test_loadExamples_withMissingFile_shouldFail() {
    assert!(corpus::load_examples("no/such/corpus.json").is_err());
}

/// Test that invalid JSON names the offending file
#[test]
fn test_loadExamples_withInvalidJson_shouldFailWithPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{not json")?;

    let error = corpus::load_examples(&path).unwrap_err();

    assert!(format!("{:#}", error).contains("broken.json"));

    Ok(())
}
