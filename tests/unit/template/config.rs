use super::*;

#[test]
fn default_needs_fonts_for_parley() {
    let config = TemplateConfig::default();
    assert!(matches!(
        config.validate(),
        Err(DocsynthError::Configuration(_))
    ));
    let glyph_box = TemplateConfig {
        renderer: TextRendererKind::GlyphBox,
        ..TemplateConfig::default()
    };
    glyph_box.validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = TemplateConfig::from_reader(
        r#"{
            "renderer": "glyph_box",
            "corpus": {"lines": ["alpha beta"]},
            "paragraph": {"max_fragments": 2},
            "transform": {"prob": 1.0, "options": [{"kind": "rotate", "angle": [-3, 3]}]}
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(config.renderer, TextRendererKind::GlyphBox);
    assert_eq!(config.corpus.lines, vec!["alpha beta".to_owned()]);
    assert_eq!(config.paragraph.max_fragments, 2);
    assert_eq!(config.paragraph.layout, ParagraphConfig::default().layout);
    assert_eq!(config.document, DocumentConfig::default());
    assert_eq!(config.transform.component.options.len(), 1);
    config.validate().unwrap();
}

#[test]
fn default_survives_json() {
    let config = TemplateConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let back = TemplateConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, config);
}

#[test]
fn counts_and_margins_are_checked() {
    let base = TemplateConfig {
        renderer: TextRendererKind::GlyphBox,
        ..TemplateConfig::default()
    };
    let mut c = base.clone();
    c.paragraph.max_fragments = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.document.max_paragraphs = 0;
    assert!(c.validate().is_err());

    let mut c = base.clone();
    c.document.margin = -1.0;
    assert!(c.validate().is_err());

    let mut c = base;
    c.style.component.options[0].weight = -2.0;
    assert!(c.validate().is_err());
}

#[test]
fn unknown_fields_and_missing_files_are_configuration_errors() {
    assert!(matches!(
        TemplateConfig::from_reader(r#"{"colour": {}}"#.as_bytes()),
        Err(DocsynthError::Configuration(_))
    ));
    assert!(matches!(
        TemplateConfig::from_path("target/docsynth-missing/config.json"),
        Err(DocsynthError::Configuration(_))
    ));
}
