use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::raster::surface::Raster;
use crate::sampling::font::FontSpec;
use crate::text::{TextRenderer, finish_context, paint_color, text_context};

/// Straight-alpha color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Rgba8> for TextBrush {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Shapes text with Parley and fills glyph outlines with vello_cpu.
///
/// Fonts are read from disk once per renderer and cached by path.
pub struct ParleyTextRenderer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    fonts: HashMap<PathBuf, LoadedFont>,
}

impl Default for ParleyTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyTextRenderer {
    /// Renderer with fresh Parley contexts and an empty font cache.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
        }
    }

    fn font(&mut self, path: &Path) -> DocsynthResult<&LoadedFont> {
        if !self.fonts.contains_key(path) {
            let bytes = std::fs::read(path).map_err(|e| {
                DocsynthError::configuration(format!("read font '{}': {e}", path.display()))
            })?;
            let families = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                DocsynthError::configuration(format!(
                    "no font families found in '{}'",
                    path.display()
                ))
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| DocsynthError::render("registered font family has no name"))?
                .to_string();
            let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
            self.fonts
                .insert(path.to_path_buf(), LoadedFont { family, data });
        }
        self.fonts
            .get(path)
            .ok_or_else(|| DocsynthError::render("font cache lookup failed"))
    }
}

impl TextRenderer for ParleyTextRenderer {
    fn render(&mut self, text: &str, font: &FontSpec, color: Rgba8) -> DocsynthResult<Raster> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(DocsynthError::render("font size must be finite and > 0"));
        }
        let path = font.path.as_deref().ok_or_else(|| {
            DocsynthError::configuration("the parley renderer needs at least one font path")
        })?;
        let (family, font_data) = {
            let loaded = self.font(path)?;
            (loaded.family.clone(), loaded.data.clone())
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush::from(color)));
        if font.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        let width = layout.width().ceil().max(1.0) as u32;
        let height = layout.height().ceil().max(1.0) as u32;
        let (mut ctx, w, h) = text_context(width, height)?;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(paint_color(Rgba8::new(brush.r, brush.g, brush.b, brush.a)));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        finish_context(ctx, w, h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/parley_cpu.rs"]
mod tests;
