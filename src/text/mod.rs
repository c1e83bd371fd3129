//! Text rasterizers turning a sampled string, font and color into a layer raster.

pub(crate) mod glyph_box;
pub(crate) mod parley_cpu;

use crate::foundation::core::Rgba8;
use crate::foundation::error::DocsynthResult;
use crate::raster::surface::Raster;
use crate::sampling::font::FontSpec;

/// Rasterizes one line of text into a tight premultiplied raster.
///
/// Implementations may cache fonts and shaping contexts, so each worker owns its own instance.
pub trait TextRenderer {
    /// Render `text` in `font` and `color`. The raster's alpha marks the glyph coverage.
    fn render(&mut self, text: &str, font: &FontSpec, color: Rgba8) -> DocsynthResult<Raster>;
}

/// Which [`TextRenderer`] a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRendererKind {
    /// Shape with Parley and rasterize glyph outlines with vello_cpu. Needs font files.
    #[default]
    Parley,
    /// Font-free rasterizer drawing one filled box per character.
    GlyphBox,
}

/// Build a fresh renderer of the given kind.
pub fn create_text_renderer(kind: TextRendererKind) -> Box<dyn TextRenderer> {
    match kind {
        TextRendererKind::Parley => Box::new(parley_cpu::ParleyTextRenderer::new()),
        TextRendererKind::GlyphBox => Box::new(glyph_box::GlyphBoxRenderer),
    }
}

/// Allocate a vello_cpu context for a `width`×`height` text raster.
pub(crate) fn text_context(
    width: u32,
    height: u32,
) -> DocsynthResult<(vello_cpu::RenderContext, u16, u16)> {
    let w: u16 = width.try_into().map_err(|_| {
        crate::DocsynthError::render(format!("text raster width {width} exceeds u16"))
    })?;
    let h: u16 = height.try_into().map_err(|_| {
        crate::DocsynthError::render(format!("text raster height {height} exceeds u16"))
    })?;
    Ok((vello_cpu::RenderContext::new(w, h), w, h))
}

/// Flush `ctx` into a new raster.
pub(crate) fn finish_context(
    mut ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
) -> DocsynthResult<Raster> {
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Raster::from_pixmap(&pixmap)
}

pub(crate) fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}
