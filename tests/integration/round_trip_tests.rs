/*!
 * Integration tests: regenerated documents extract back to the same examples
 */

use anyhow::Result;
use glosstex::extractor::{self, ExampleExtractor};
use glosstex::latex::{Example, ExamplePart, GlossedExampleBlock};
use glosstex::synthesizer;
use crate::common;

/// Test that a serialized example extracts back to identical words and glosses
#[test]
fn test_roundTrip_withSerializedExample_shouldExtractSameExample() {
    let words = vec!["Kot".to_string(), "spit".to_string(), "doma".to_string()];
    let glosses = vec!["cat".to_string(), "sleep.3SG".to_string(), "home".to_string()];

    let document = synthesizer::serialize_example(&words, &glosses, Some("The cat sleeps at home"));
    let examples = extractor::find_examples(&document, true);

    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].words(), words.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(examples[0].glosses(), glosses.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(examples[0].translation.as_deref(), Some("The cat sleeps at home"));
}

/// Test that every corpus example survives regeneration
#[test]
fn test_roundTrip_withCorpusExamples_shouldPreserveEveryExample() {
    let extractor = ExampleExtractor::default();

    for example in common::sample_corpus() {
        let (document, _) = synthesizer::build_example_document(GlossedExampleBlock::from(&example));
        let found = extractor.find_examples(&document.to_string());

        assert_eq!(found, vec![example]);
    }
}

/// Test that a multi-part example regenerates into the same parts
#[test]
fn test_roundTrip_withMultipartExample_shouldExtractEachPart() {
    let original = extractor::find_examples(common::MULTIPART_EXAMPLE, true);
    let example = Example::new(
        original
            .iter()
            .map(|e| ExamplePart::new(GlossedExampleBlock::from(e)))
            .collect(),
    );

    let regenerated = extractor::find_examples(&example.to_string(), true);

    assert_eq!(regenerated, original);
}

/// Test that extracting, saving and regenerating a directory keeps its examples
#[test]
fn test_roundTrip_throughCorpusFile_shouldKeepExamples() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_document(temp_dir.path(), "docs/paper.tex")?;

    let (examples, _) = ExampleExtractor::default().parse_dir(temp_dir.path().join("docs"))?;
    let corpus_file = temp_dir.path().join("examples.json");
    glosstex::corpus::save_examples(&corpus_file, &examples)?;
    let (loaded, _) = glosstex::corpus::load_examples(&corpus_file)?;

    assert_eq!(loaded, examples);
    for example in &loaded {
        let regenerated = synthesizer::serialize_example(
            &example.words().iter().map(|w| w.to_string()).collect::<Vec<_>>(),
            &example.glosses().iter().map(|g| g.to_string()).collect::<Vec<_>>(),
            example.translation.as_deref(),
        );
        let found = extractor::find_examples(&regenerated, true);
        assert_eq!(found[0].items, example.items);
    }

    Ok(())
}
