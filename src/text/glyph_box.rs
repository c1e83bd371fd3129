use crate::foundation::core::Rgba8;
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::raster::surface::Raster;
use crate::sampling::font::FontSpec;
use crate::text::{TextRenderer, finish_context, paint_color, text_context};

const ADVANCE: f64 = 0.6;
const BOLD_ADVANCE: f64 = 0.7;
const LINE_HEIGHT: f64 = 1.25;
const BASELINE: f64 = 1.0;

/// Font-free rasterizer: every non-space character becomes a filled box on a fixed advance.
///
/// Output depends only on the text, size, weight and color, which makes it suitable for
/// reproducibility tests and for machines without fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlyphBoxRenderer;

impl TextRenderer for GlyphBoxRenderer {
    fn render(&mut self, text: &str, font: &FontSpec, color: Rgba8) -> DocsynthResult<Raster> {
        let size = f64::from(font.size_px);
        if !size.is_finite() || size <= 0.0 {
            return Err(DocsynthError::render("font size must be finite and > 0"));
        }
        let advance = size * if font.bold { BOLD_ADVANCE } else { ADVANCE };
        let inset = (size * 0.08).max(0.5);
        let chars = text.chars().count().max(1);
        let width = (advance * chars as f64).ceil() as u32;
        let height = (size * LINE_HEIGHT).ceil() as u32;

        let (mut ctx, w, h) = text_context(width.max(1), height.max(1))?;
        ctx.set_paint(paint_color(color));
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let x0 = advance * i as f64 + inset;
            let x1 = advance * (i + 1) as f64 - inset;
            let top = if c.is_lowercase() && !is_tall(c) {
                0.45
            } else {
                0.2
            };
            let bottom = if is_descender(c) { 1.2 } else { BASELINE };
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                x0,
                size * top,
                x1,
                size * bottom,
            ));
        }
        finish_context(ctx, w, h)
    }
}

fn is_tall(c: char) -> bool {
    matches!(c, 'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't')
}

fn is_descender(c: char) -> bool {
    matches!(c, 'g' | 'j' | 'p' | 'q' | 'y')
}

#[cfg(test)]
#[path = "../../tests/unit/text/glyph_box.rs"]
mod tests;
