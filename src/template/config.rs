use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::effects::shape::ShapeEffect;
use crate::effects::style::StyleEffect;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::layout::flow::FlowLayoutConfig;
use crate::sampling::color::ColorConfig;
use crate::sampling::corpus::CorpusConfig;
use crate::sampling::font::FontConfig;
use crate::sampling::interval::Interval;
use crate::sampling::switch::{Component, Selector, Switch, Weighted};
use crate::text::TextRendererKind;
use crate::transform::kind::TransformKind;

/// Intra-paragraph settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParagraphConfig {
    /// Upper bound of the uniform fragment count `[1, max_fragments]`.
    pub max_fragments: u32,
    /// Flow layout of fragments inside a paragraph.
    pub layout: FlowLayoutConfig,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            max_fragments: 4,
            layout: FlowLayoutConfig {
                length: 600.0,
                ..FlowLayoutConfig::default()
            },
        }
    }
}

/// Document-level settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Upper bound of the uniform paragraph count `[1, max_paragraphs]`.
    pub max_paragraphs: u32,
    /// Blank border around the content, in pixels.
    pub margin: f64,
    /// Flow layout of paragraphs on the page.
    pub layout: FlowLayoutConfig,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            max_paragraphs: 3,
            margin: 16.0,
            layout: FlowLayoutConfig {
                length: 1200.0,
                space: Interval::new(16.0, 48.0),
                line_space: Interval::new(16.0, 48.0),
                ..FlowLayoutConfig::default()
            },
        }
    }
}

/// Complete description of how pages are generated.
///
/// Every section is optional in JSON and falls back to its default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateConfig {
    /// Text source.
    pub corpus: CorpusConfig,
    /// Font pool.
    pub font: FontConfig,
    /// Text color.
    pub color: ColorConfig,
    /// Background color; alpha is ignored.
    pub paper: ColorConfig,
    /// Decoration applied to all fragments of a paragraph.
    pub style: Switch<Selector<StyleEffect>>,
    /// Distortion applied to all fragments of a paragraph.
    pub shape: Switch<Selector<ShapeEffect>>,
    /// Geometric transform of each merged paragraph.
    pub transform: Switch<Selector<TransformKind>>,
    /// Paragraph assembly.
    pub paragraph: ParagraphConfig,
    /// Page assembly.
    pub document: DocumentConfig,
    /// Text rasterizer.
    pub renderer: TextRendererKind,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            font: FontConfig::default(),
            color: ColorConfig {
                rgb: [Interval::new(0.0, 96.0); 3],
                alpha: Interval::fixed(255.0),
                grayscale_prob: 0.5,
            },
            paper: ColorConfig {
                rgb: [Interval::new(224.0, 255.0); 3],
                alpha: Interval::fixed(255.0),
                grayscale_prob: 0.5,
            },
            style: Switch::new(
                0.25,
                Selector::new(vec![
                    Weighted::new(
                        1.0,
                        StyleEffect::Border {
                            size: Interval::new(1.0, 3.0),
                            color: ColorConfig::solid(Rgba8::WHITE),
                        },
                    ),
                    Weighted::new(
                        1.0,
                        StyleEffect::Shadow {
                            distance: Interval::new(1.0, 5.0),
                            angle: Interval::new(0.0, 360.0),
                            blur: Interval::new(0.0, 3.0),
                            opacity: Interval::new(0.3, 0.8),
                            color: ColorConfig::default(),
                        },
                    ),
                    Weighted::new(
                        1.0,
                        StyleEffect::Extrusion {
                            length: Interval::new(1.0, 4.0),
                            angle: Interval::new(0.0, 360.0),
                            color: ColorConfig::solid(Rgba8::new(96, 96, 96, 255)),
                        },
                    ),
                ]),
            ),
            shape: Switch::new(
                0.2,
                Selector::new(vec![Weighted::new(
                    1.0,
                    ShapeEffect::Elastic {
                        alpha: Interval::new(0.0, 2.0),
                        sigma: Interval::new(1.0, 3.0),
                    },
                )]),
            ),
            transform: Switch::new(
                0.5,
                Selector::new(vec![
                    Weighted::new(
                        1.0,
                        TransformKind::Perspective {
                            percent: Interval::new(0.0, 0.05),
                        },
                    ),
                    Weighted::new(
                        1.0,
                        TransformKind::Trapezoid {
                            percent: Interval::new(0.0, 0.1),
                        },
                    ),
                    Weighted::new(
                        1.0,
                        TransformKind::Skew {
                            angle: Interval::new(-10.0, 10.0),
                            vertical_prob: 0.25,
                        },
                    ),
                    Weighted::new(
                        1.0,
                        TransformKind::Rotate {
                            angle: Interval::new(-5.0, 5.0),
                        },
                    ),
                ]),
            ),
            paragraph: ParagraphConfig::default(),
            document: DocumentConfig::default(),
            renderer: TextRendererKind::default(),
        }
    }
}

impl TemplateConfig {
    /// Parse a template configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> DocsynthResult<Self> {
        serde_json::from_reader(r).map_err(|e| {
            DocsynthError::configuration(format!("parse template config JSON: {e}"))
        })
    }

    /// Parse a template configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> DocsynthResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            DocsynthError::configuration(format!(
                "open template config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every range, weight and count. All failures are configuration errors.
    pub fn validate(&self) -> DocsynthResult<()> {
        self.corpus.validate()?;
        self.font.validate()?;
        self.color.validate("color")?;
        self.paper.validate("paper")?;
        self.style.validate()?;
        self.shape.validate()?;
        self.transform.validate()?;

        if self.paragraph.max_fragments == 0 {
            return Err(DocsynthError::configuration(
                "paragraph.max_fragments must be >= 1",
            ));
        }
        self.paragraph.layout.validate("paragraph.layout")?;

        if self.document.max_paragraphs == 0 {
            return Err(DocsynthError::configuration(
                "document.max_paragraphs must be >= 1",
            ));
        }
        if !self.document.margin.is_finite() || self.document.margin < 0.0 {
            return Err(DocsynthError::configuration(format!(
                "document.margin must be finite and >= 0, got {}",
                self.document.margin
            )));
        }
        self.document.layout.validate("document.layout")?;

        if self.renderer == TextRendererKind::Parley && self.font.paths.is_empty() {
            return Err(DocsynthError::configuration(
                "renderer 'parley' needs at least one entry in font.paths",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/config.rs"]
mod tests;
