use super::*;

fn spec(path: Option<&str>) -> FontSpec {
    FontSpec {
        path: path.map(PathBuf::from),
        size_px: 24.0,
        bold: false,
    }
}

#[test]
fn missing_font_path_is_a_configuration_error() {
    let mut r = ParleyTextRenderer::new();
    let err = r.render("abc", &spec(None), Rgba8::BLACK).unwrap_err();
    assert!(matches!(err, DocsynthError::Configuration(_)));
}

#[test]
fn unreadable_font_file_is_a_configuration_error() {
    let mut r = ParleyTextRenderer::new();
    let err = r
        .render(
            "abc",
            &spec(Some("target/docsynth-missing/font.ttf")),
            Rgba8::BLACK,
        )
        .unwrap_err();
    assert!(matches!(err, DocsynthError::Configuration(_)));
}

#[test]
fn invalid_size_is_rejected() {
    let mut r = ParleyTextRenderer::new();
    let mut s = spec(None);
    s.size_px = f32::NAN;
    assert!(matches!(
        r.render("abc", &s, Rgba8::BLACK),
        Err(DocsynthError::Render(_))
    ));
}

const DEJAVU: &str = "tests/data/DejaVuSans.ttf";

fn ink_extent(r: &Raster) -> (u32, u32) {
    let mut right = 0;
    let mut bottom = 0;
    for y in 0..r.height() {
        for x in 0..r.width() {
            if r.pixel(x, y)[3] != 0 {
                right = right.max(x);
                bottom = bottom.max(y);
            }
        }
    }
    (right, bottom)
}

#[test]
fn real_font_ink_spans_the_raster() {
    let mut r = ParleyTextRenderer::new();
    let mut s = spec(Some(DEJAVU));
    s.size_px = 32.0;
    let raster = r.render("Hello world", &s, Rgba8::BLACK).unwrap();

    assert!(raster.covered_pixels() > 500);
    let (right, bottom) = ink_extent(&raster);
    assert!(right * 10 > raster.width() * 8, "ink stops at column {right}");
    assert!(bottom * 2 > raster.height(), "ink stops at row {bottom}");
}

#[test]
fn glyph_color_reaches_the_pixels() {
    let mut r = ParleyTextRenderer::new();
    let raster = r
        .render("Ink", &spec(Some(DEJAVU)), Rgba8::new(200, 0, 0, 255))
        .unwrap();
    let solid = (0..raster.height())
        .flat_map(|y| (0..raster.width()).map(move |x| (x, y)))
        .map(|(x, y)| raster.pixel(x, y))
        .max_by_key(|px| px[3])
        .unwrap();
    assert!(solid[3] >= 250, "{solid:?}");
    assert!(solid[0] >= 190 && solid[1] <= 5 && solid[2] <= 5, "{solid:?}");
}

#[test]
fn cached_font_renders_identically() {
    let mut r = ParleyTextRenderer::new();
    let s = spec(Some(DEJAVU));
    let a = r.render("again", &s, Rgba8::BLACK).unwrap();
    let b = r.render("again", &s, Rgba8::BLACK).unwrap();
    assert_eq!(a, b);
    assert_eq!(r.fonts.len(), 1);
}
