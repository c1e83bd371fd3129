use crate::foundation::core::{Point, Quad, Rgba8, pixel_extent, validated_rect};
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;
use crate::layer::element::{Element, union_bbox};
use crate::layout::flow::FlowLayout;
use crate::raster::surface::Raster;
use crate::sampling::Sampler;
use crate::sampling::color::ColorSampler;
use crate::sampling::corpus::LineCorpus;
use crate::sampling::font::FontSampler;
use crate::sampling::interval::sample_count;
use crate::template::config::TemplateConfig;
use crate::template::paragraph::{ParagraphUnit, build_paragraph};
use crate::text::{TextRenderer, TextRendererKind, create_text_renderer, paint_color};

/// Validated configuration plus the samplers and layouts built from it.
///
/// A template is immutable and shared by all workers; per-page state lives in the random
/// stream and the text renderer passed to [`DocumentTemplate::generate`].
#[derive(Clone, Debug)]
pub struct DocumentTemplate {
    config: TemplateConfig,
    pub(crate) corpus: LineCorpus,
    pub(crate) fonts: FontSampler,
    pub(crate) colors: ColorSampler,
    pub(crate) paper: ColorSampler,
    pub(crate) paragraph_layout: FlowLayout,
    pub(crate) document_layout: FlowLayout,
}

impl DocumentTemplate {
    /// Validate `config`, load the corpus and build every sampler.
    pub fn from_config(config: TemplateConfig) -> DocsynthResult<Self> {
        config.validate()?;
        Ok(Self {
            corpus: LineCorpus::load(&config.corpus)?,
            fonts: FontSampler::new(config.font.clone())?,
            colors: ColorSampler::new(config.color.clone(), "color")?,
            paper: ColorSampler::new(config.paper.clone(), "paper")?,
            paragraph_layout: FlowLayout::new(config.paragraph.layout.clone(), "paragraph.layout")?,
            document_layout: FlowLayout::new(config.document.layout.clone(), "document.layout")?,
            config,
        })
    }

    /// Configuration this template was built from.
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }

    /// Rasterizer kind the configuration asks for.
    pub fn renderer_kind(&self) -> TextRendererKind {
        self.config.renderer
    }

    /// Fresh rasterizer of the configured kind.
    pub fn create_renderer(&self) -> Box<dyn TextRenderer> {
        create_text_renderer(self.config.renderer)
    }

    /// Generate one page. The result depends only on the template and the stream.
    ///
    /// Any sampling or geometry failure aborts the whole page; nothing partial is returned.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn generate(
        &self,
        rng: &mut PageRng,
        renderer: &mut dyn TextRenderer,
    ) -> DocsynthResult<Page> {
        let count = sample_count(rng, self.config.document.max_paragraphs);
        let mut paragraphs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            paragraphs.push(build_paragraph(self, rng, renderer)?);
        }

        self.document_layout.apply(rng, &mut paragraphs)?;

        let content = union_bbox(&paragraphs)
            .ok_or_else(|| DocsynthError::geometry("page has no paragraphs"))?;
        let content = validated_rect(content, "page content")?;
        let margin = self.config.document.margin.round();
        let shift = Point::new(margin, margin) - content.origin();
        for p in &mut paragraphs {
            p.translate(shift);
        }

        let paper = self.paper.sample(rng)?;
        let paper = self.paper.data(&paper).opaque();
        let mut image = Raster::filled(
            pixel_extent(content.width() + 2.0 * margin),
            pixel_extent(content.height() + 2.0 * margin),
            paper,
        )?;
        for p in &paragraphs {
            p.draw_onto(&mut image, Point::ORIGIN);
        }

        let label = paragraphs
            .iter()
            .flat_map(|p| p.fragments())
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Page {
            image,
            label,
            paragraphs,
        })
    }
}

/// A rendered page with its label and geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    image: Raster,
    label: String,
    paragraphs: Vec<ParagraphUnit>,
}

impl Page {
    /// Opaque page raster.
    pub fn image(&self) -> &Raster {
        &self.image
    }

    /// Fragment texts in reading order, joined with single spaces.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Paragraphs in page coordinates.
    pub fn paragraphs(&self) -> &[ParagraphUnit] {
        &self.paragraphs
    }

    /// Every fragment footprint in page coordinates, in reading order.
    pub fn fragment_quads(&self) -> Vec<Quad> {
        self.paragraphs
            .iter()
            .flat_map(ParagraphUnit::fragment_quads)
            .collect()
    }

    /// Page image as 8-bit RGB.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        self.image.to_rgb_image()
    }

    /// Serializable summary of the page geometry.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            width: self.image.width(),
            height: self.image.height(),
            label: self.label.clone(),
            paragraphs: self
                .paragraphs
                .iter()
                .map(|p| ParagraphGeometry {
                    quad: p.quad(),
                    fragments: p
                        .fragments()
                        .iter()
                        .zip(p.fragment_quads())
                        .map(|(f, quad)| FragmentGeometry {
                            text: f.text.clone(),
                            quad,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Copy of the page with paragraph and fragment outlines drawn on top.
    pub fn with_boxes(&self) -> DocsynthResult<Raster> {
        let w: u16 = self
            .image
            .width()
            .try_into()
            .map_err(|_| DocsynthError::render("page width exceeds u16"))?;
        let h: u16 = self
            .image
            .height()
            .try_into()
            .map_err(|_| DocsynthError::render("page height exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        ctx.set_paint(paint_color(Rgba8::new(220, 30, 30, 255)));
        for p in &self.paragraphs {
            ctx.stroke_path(&quad_path(&p.quad()));
        }
        ctx.set_paint(paint_color(Rgba8::new(20, 160, 60, 255)));
        for q in self.fragment_quads() {
            ctx.stroke_path(&quad_path(&q));
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let mut out = self.image.clone();
        out.draw_over(&Raster::from_pixmap(&pixmap)?, 0, 0);
        Ok(out)
    }
}

fn quad_path(q: &Quad) -> vello_cpu::kurbo::BezPath {
    let mut path = vello_cpu::kurbo::BezPath::new();
    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    path.move_to(pt(q.points[0]));
    for &p in &q.points[1..] {
        path.line_to(pt(p));
    }
    path.close_path();
    path
}

/// JSON-friendly page geometry, in page pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageGeometry {
    /// Image width.
    pub width: u32,
    /// Image height.
    pub height: u32,
    /// Page label.
    pub label: String,
    /// Paragraphs in reading order.
    pub paragraphs: Vec<ParagraphGeometry>,
}

/// Geometry of one paragraph.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParagraphGeometry {
    /// Footprint of the merged paragraph.
    pub quad: Quad,
    /// Fragments in reading order.
    pub fragments: Vec<FragmentGeometry>,
}

/// Geometry of one fragment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FragmentGeometry {
    /// Fragment text.
    pub text: String,
    /// Footprint in page pixels.
    pub quad: Quad,
}

#[cfg(test)]
#[path = "../../tests/unit/template/document.rs"]
mod tests;
