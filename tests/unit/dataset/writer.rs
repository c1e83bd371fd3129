use super::*;
use crate::foundation::random::page_rng;
use crate::sampling::interval::Interval;
use crate::template::config::TemplateConfig;
use crate::template::document::DocumentTemplate;
use crate::text::TextRendererKind;
use crate::text::glyph_box::GlyphBoxRenderer;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("docsynth-unit").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_page() -> Page {
    let mut c = TemplateConfig {
        renderer: TextRendererKind::GlyphBox,
        ..TemplateConfig::default()
    };
    c.corpus.lines = vec!["abc def".into()];
    c.font.size = Interval::fixed(12.0);
    c.paragraph.max_fragments = 1;
    c.document.max_paragraphs = 1;
    DocumentTemplate::from_config(c)
        .unwrap()
        .generate(&mut page_rng(0, 0), &mut GlyphBoxRenderer)
        .unwrap()
}

#[test]
fn shard_paths_group_ten_thousand_pages() {
    assert_eq!(image_rel_path(0), "images/0/0.jpg");
    assert_eq!(image_rel_path(9_999), "images/0/9999.jpg");
    assert_eq!(image_rel_path(10_000), "images/1/10000.jpg");
    assert_eq!(image_rel_path(123_456), "images/12/123456.jpg");
}

#[test]
fn writes_image_then_label_line() {
    let root = scratch("writes_image_then_label_line");
    let page = sample_page();
    let mut w = DatasetWriter::new(&root);
    w.begin().unwrap();
    w.push_page(10_000, &page).unwrap();
    w.end().unwrap();

    let img = image::open(root.join("images/1/10000.jpg")).unwrap();
    assert_eq!((img.width(), img.height()), (page.image().width(), page.image().height()));
    let gt = std::fs::read_to_string(root.join(GT_FILE)).unwrap();
    assert_eq!(gt, format!("images/1/10000.jpg\t{}\n", page.label()));
}

#[test]
fn label_file_is_appended_across_runs() {
    let root = scratch("label_file_is_appended_across_runs");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join(GT_FILE), "earlier\tline\n").unwrap();
    let page = sample_page();
    let mut w = DatasetWriter::new(&root);
    w.begin().unwrap();
    w.push_page(1, &page).unwrap();
    w.end().unwrap();
    let gt = std::fs::read_to_string(root.join(GT_FILE)).unwrap();
    assert!(gt.starts_with("earlier\tline\nimages/0/1.jpg\t"));
    assert_eq!(gt.lines().count(), 2);
}

#[test]
fn pushing_before_begin_fails() {
    let root = scratch("pushing_before_begin_fails");
    let mut w = DatasetWriter::new(&root);
    assert!(w.push_page(0, &sample_page()).is_err());
    assert!(!root.join(GT_FILE).exists());
}
