use super::*;

fn spec(size_px: f32, bold: bool) -> FontSpec {
    FontSpec {
        path: None,
        size_px,
        bold,
    }
}

#[test]
fn raster_size_follows_advance_and_line_height() {
    let r = GlyphBoxRenderer
        .render("abcd", &spec(20.0, false), Rgba8::BLACK)
        .unwrap();
    assert_eq!((r.width(), r.height()), (48, 25));
    assert!(r.covered_pixels() > 0);

    let bold = GlyphBoxRenderer
        .render("abcd", &spec(20.0, true), Rgba8::BLACK)
        .unwrap();
    assert_eq!(bold.width(), 56);
}

#[test]
fn spaces_leave_gaps() {
    let r = GlyphBoxRenderer
        .render("a b", &spec(20.0, false), Rgba8::BLACK)
        .unwrap();
    for y in 0..r.height() {
        for x in 13..23 {
            assert_eq!(r.pixel(x, y)[3], 0, "pixel {x},{y} should be empty");
        }
    }
}

#[test]
fn output_is_deterministic_and_colored() {
    let c = Rgba8::new(200, 10, 10, 255);
    let a = GlyphBoxRenderer.render("Hi", &spec(16.0, false), c).unwrap();
    let b = GlyphBoxRenderer.render("Hi", &spec(16.0, false), c).unwrap();
    assert_eq!(a, b);
    let center = a.pixel(4, 9);
    assert_eq!(center, [200, 10, 10, 255]);
}

#[test]
fn non_positive_size_is_a_render_error() {
    assert!(matches!(
        GlyphBoxRenderer.render("a", &spec(0.0, false), Rgba8::BLACK),
        Err(DocsynthError::Render(_))
    ));
}
