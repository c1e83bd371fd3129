use crate::effects::LayerEffect;
use crate::foundation::core::{Point, Quad, Rect, Vec2};
use crate::foundation::error::DocsynthResult;
use crate::foundation::random::PageRng;
use crate::layer::element::{Element, Transformable};
use crate::layer::group::Group;
use crate::layer::layer::Layer;
use crate::raster::surface::Raster;
use crate::sampling::Sampler;
use crate::sampling::interval::sample_count;
use crate::sampling::switch::Component;
use crate::template::document::DocumentTemplate;
use crate::text::TextRenderer;
use crate::transform::GeometricTransform;

/// One text fragment of a paragraph: its label and its footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    /// Label text.
    pub text: String,
    /// Geometry-only layer, relative to the paragraph's top-left.
    pub layer: Layer,
}

impl Fragment {
    /// Footprint in paragraph-local coordinates.
    pub fn local_quad(&self) -> Quad {
        self.layer.quad()
    }
}

/// A laid-out, merged and transformed paragraph.
///
/// The merged layer carries the pixels and the absolute position. Fragments keep exact
/// per-fragment geometry relative to that position, so moving the paragraph never touches them.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphUnit {
    layer: Layer,
    fragments: Vec<Fragment>,
}

impl ParagraphUnit {
    /// Merged, renderable layer.
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Fragments in reading order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Fragment footprints in the paragraph's current frame.
    pub fn fragment_quads(&self) -> Vec<Quad> {
        let origin = self.topleft().to_vec2();
        self.fragments
            .iter()
            .map(|f| f.local_quad().translate(origin))
            .collect()
    }
}

impl Element for ParagraphUnit {
    fn bbox(&self) -> Rect {
        self.layer.bbox()
    }

    fn quad(&self) -> Quad {
        self.layer.quad()
    }

    fn translate(&mut self, delta: Vec2) {
        self.layer.translate(delta);
    }

    fn draw_onto(&self, dst: &mut Raster, dst_origin: Point) {
        self.layer.draw_onto(dst, dst_origin);
    }
}

/// Assemble one paragraph from the page stream.
pub(crate) fn build_paragraph(
    template: &DocumentTemplate,
    rng: &mut PageRng,
    renderer: &mut dyn TextRenderer,
) -> DocsynthResult<ParagraphUnit> {
    let config = template.config();

    let count = sample_count(rng, config.paragraph.max_fragments);
    let font = template.fonts.sample(rng)?;
    let font = template.fonts.data(&font);
    let color = template.colors.sample(rng)?;
    let color = template.colors.data(&color);
    let mut texts = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let draw = template.corpus.sample(rng)?;
        texts.push(template.corpus.data(&draw));
    }

    let mut layers = texts
        .iter()
        .map(|text| renderer.render(text, &font, color).map(Layer::new))
        .collect::<DocsynthResult<Vec<_>>>()?;

    let style = config.style.sample(rng)?;
    config.style.apply(&style, &mut layers)?;
    let shape = config.shape.sample(rng)?;
    config.shape.apply(&shape, &mut layers)?;

    template.paragraph_layout.apply(rng, &mut layers)?;

    let group = Group::from_layers(layers);
    let mut merged = group.merge()?;
    let mut ghosts: Vec<Layer> = group
        .into_layers()
        .into_iter()
        .map(Layer::into_geometry)
        .collect();

    let transform = config.transform.sample(rng)?;
    {
        let mut targets: Vec<&mut dyn Transformable> = Vec::with_capacity(ghosts.len() + 1);
        targets.push(&mut merged);
        targets.extend(ghosts.iter_mut().map(|g| g as &mut dyn Transformable));
        config.transform.apply(&transform, &mut targets)?;
    }

    let origin = merged.topleft().to_vec2();
    for ghost in &mut ghosts {
        ghost.translate(-origin);
    }

    tracing::debug!(
        fragments = texts.len(),
        styled = style.is_some(),
        shaped = shape.is_some(),
        transformed = transform.is_some(),
        "built paragraph"
    );

    Ok(ParagraphUnit {
        layer: merged,
        fragments: texts
            .into_iter()
            .zip(ghosts)
            .map(|(text, layer)| Fragment { text, layer })
            .collect(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/template/paragraph.rs"]
mod tests;
