//! docsynth generates synthetic, labeled document images for training text-recognition models.
//!
//! A page is assembled from sampled text fragments in two nesting levels:
//!
//! - fragments are rasterized, styled, distorted and flowed into a paragraph, which is merged
//!   into one layer and transformed jointly with the geometry of its fragments
//! - paragraphs are flowed onto a page and rendered over a paper background
//!
//! Every page is a pure function of a [`DocumentTemplate`] and a seeded [`PageRng`]. Runs of
//! many pages stream into a [`PageSink`], such as the sharded JPEG [`DatasetWriter`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod dataset;
pub(crate) mod effects;
pub(crate) mod layer;
pub(crate) mod layout;
pub(crate) mod raster;
pub(crate) mod sampling;
pub(crate) mod template;
pub(crate) mod text;
pub(crate) mod transform;

pub use crate::foundation::core::{Affine, MIN_QUAD_AREA, Point, Quad, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{DocsynthError, DocsynthResult};
pub use crate::foundation::math::Homography;
pub use crate::foundation::random::{PageRng, page_rng};

pub use crate::dataset::run::{RunOpts, RunStats, generate_dataset, generate_page};
pub use crate::dataset::sink::{InMemorySink, PageSink};
pub use crate::dataset::writer::{
    DatasetWriter, GT_FILE, JPEG_QUALITY, SHARD_SIZE, image_rel_path,
};
pub use crate::effects::LayerEffect;
pub use crate::effects::shape::{ShapeEffect, ShapeParams};
pub use crate::effects::style::{StyleEffect, StyleParams};
pub use crate::layer::element::{Element, Transformable, union_bbox};
pub use crate::layer::group::{Group, Node};
pub use crate::layer::layer::Layer;
pub use crate::layout::flow::{Align, FlowLayout, FlowLayoutConfig};
pub use crate::raster::surface::{MAX_RASTER_DIM, Raster};
pub use crate::raster::warp::warp_homography;
pub use crate::sampling::Sampler;
pub use crate::sampling::color::{ColorConfig, ColorSampler};
pub use crate::sampling::corpus::{CorpusConfig, LineCorpus, LineDraw};
pub use crate::sampling::font::{FontConfig, FontDraw, FontSampler, FontSpec};
pub use crate::sampling::interval::Interval;
pub use crate::sampling::switch::{Component, Selected, Selector, Switch, Weighted};
pub use crate::template::config::{DocumentConfig, ParagraphConfig, TemplateConfig};
pub use crate::template::document::{
    DocumentTemplate, FragmentGeometry, Page, PageGeometry, ParagraphGeometry,
};
pub use crate::template::paragraph::{Fragment, ParagraphUnit};
pub use crate::text::glyph_box::GlyphBoxRenderer;
pub use crate::text::parley_cpu::ParleyTextRenderer;
pub use crate::text::{TextRenderer, TextRendererKind, create_text_renderer};
pub use crate::transform::GeometricTransform;
pub use crate::transform::kind::{Side, TransformKind, TransformParams};
