use super::*;
use crate::dataset::sink::InMemorySink;
use crate::sampling::interval::Interval;
use crate::template::config::TemplateConfig;
use crate::text::TextRendererKind;

fn template(lines: &[&str]) -> DocumentTemplate {
    let mut c = TemplateConfig {
        renderer: TextRendererKind::GlyphBox,
        ..TemplateConfig::default()
    };
    c.corpus.lines = lines.iter().map(|l| (*l).to_owned()).collect();
    c.font.size = Interval::new(10.0, 16.0);
    c.document.max_paragraphs = 2;
    DocumentTemplate::from_config(c).unwrap()
}

#[test]
fn parallel_run_matches_sequential_run() {
    let t = template(&["one two", "three", "four five six"]);
    let base = RunOpts {
        count: 9,
        start_index: 5,
        seed: 1234,
        chunk_size: 4,
        ..RunOpts::default()
    };

    let mut seq = InMemorySink::new();
    let s1 = generate_dataset(&t, &mut seq, &base).unwrap();

    let mut par = InMemorySink::new();
    let opts = RunOpts {
        parallel: true,
        threads: Some(3),
        ..base
    };
    let s2 = generate_dataset(&t, &mut par, &opts).unwrap();

    assert_eq!(s1, s2);
    assert_eq!(s1.pages_written, 9);
    assert_eq!(seq.pages(), par.pages());
    let indices: Vec<u64> = par.pages().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, (5..14).collect::<Vec<_>>());
}

#[test]
fn failed_pages_are_skipped_by_default() {
    let t = template(&[]);
    let mut sink = InMemorySink::new();
    let stats = generate_dataset(
        &t,
        &mut sink,
        &RunOpts {
            count: 3,
            ..RunOpts::default()
        },
    )
    .unwrap();
    assert_eq!(
        stats,
        RunStats {
            pages_total: 3,
            pages_written: 0,
            pages_failed: 3,
        }
    );
    assert!(sink.is_closed());
}

#[test]
fn halt_on_error_reports_the_page_and_closes_the_sink() {
    let t = template(&[]);
    let mut sink = InMemorySink::new();
    let err = generate_dataset(
        &t,
        &mut sink,
        &RunOpts {
            count: 3,
            start_index: 7,
            halt_on_error: true,
            ..RunOpts::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, DocsynthError::Page { index: 7, .. }));
    assert!(matches!(err.root(), DocsynthError::SamplingExhaustion(_)));
    assert!(sink.is_closed());
}

#[test]
fn zero_threads_is_rejected() {
    let t = template(&["x"]);
    let mut sink = InMemorySink::new();
    let opts = RunOpts {
        parallel: true,
        threads: Some(0),
        ..RunOpts::default()
    };
    assert!(matches!(
        generate_dataset(&t, &mut sink, &opts),
        Err(DocsynthError::Configuration(_))
    ));
}

#[test]
fn single_page_matches_run_output() {
    let t = template(&["alpha", "beta gamma"]);
    let mut sink = InMemorySink::new();
    generate_dataset(
        &t,
        &mut sink,
        &RunOpts {
            count: 2,
            seed: 77,
            ..RunOpts::default()
        },
    )
    .unwrap();
    let mut renderer = t.create_renderer();
    let page = generate_page(&t, 77, 1, renderer.as_mut()).unwrap();
    assert_eq!(sink.pages()[1].1, page);
}
