use super::*;
use crate::foundation::random::page_rng;

#[test]
fn empty_corpus_reports_exhaustion() {
    let corpus = LineCorpus::from_lines(Vec::<String>::new(), 1, None);
    let err = corpus.sample(&mut page_rng(0, 0)).unwrap_err();
    assert!(matches!(err, DocsynthError::SamplingExhaustion(_)));
}

#[test]
fn lines_are_cleaned_and_filtered() {
    let corpus = LineCorpus::from_lines(
        ["  hello\tworld ", "", "   ", "ab", "a much longer line here"]
            .into_iter()
            .map(String::from),
        3,
        Some(12),
    );
    assert_eq!(corpus.len(), 1);
    let draw = corpus.sample(&mut page_rng(0, 0)).unwrap();
    assert_eq!(corpus.data(&draw), "hello world");
}

#[test]
fn draws_are_reproducible() {
    let corpus = LineCorpus::load(&CorpusConfig::default()).unwrap();
    let a: Vec<_> = {
        let mut rng = page_rng(9, 4);
        (0..10).map(|_| corpus.sample(&mut rng).unwrap()).collect()
    };
    let b: Vec<_> = {
        let mut rng = page_rng(9, 4);
        (0..10).map(|_| corpus.sample(&mut rng).unwrap()).collect()
    };
    assert_eq!(a, b);
}

#[test]
fn unreadable_file_is_a_configuration_error() {
    let config = CorpusConfig {
        paths: vec![PathBuf::from("target/docsynth-missing/corpus.txt")],
        ..CorpusConfig::default()
    };
    assert!(matches!(
        LineCorpus::load(&config),
        Err(DocsynthError::Configuration(_))
    ));
}

#[test]
fn length_bounds_are_validated() {
    let config = CorpusConfig {
        min_length: 5,
        max_length: Some(2),
        ..CorpusConfig::default()
    };
    assert!(config.validate().is_err());
}
