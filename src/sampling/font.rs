use std::path::PathBuf;

use rand::Rng;

use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;
use crate::sampling::Sampler;
use crate::sampling::interval::{Interval, validate_prob};

/// Font pool and size/weight ranges.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Font files (TTF/OTF). May be empty for rasterizers that need no font.
    pub paths: Vec<PathBuf>,
    /// Font size in pixels.
    pub size: Interval,
    /// Probability of bold text.
    pub bold_prob: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            size: Interval::new(24.0, 40.0),
            bold_prob: 0.0,
        }
    }
}

impl FontConfig {
    /// Check ranges.
    pub fn validate(&self) -> DocsynthResult<()> {
        self.size.validate("font.size")?;
        if self.size.min <= 0.0 {
            return Err(DocsynthError::configuration("font.size must be > 0"));
        }
        validate_prob("font.bold_prob", self.bold_prob)
    }
}

/// Resolved font attributes handed to a text rasterizer.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Font file, if any was configured.
    pub path: Option<PathBuf>,
    /// Size in pixels.
    pub size_px: f32,
    /// Bold weight requested.
    pub bold: bool,
}

/// Handle produced by [`FontSampler`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontDraw {
    index: Option<usize>,
    size_px: f32,
    bold: bool,
}

/// Samples a font file, a size and a weight.
#[derive(Clone, Debug)]
pub struct FontSampler {
    config: FontConfig,
}

impl FontSampler {
    /// Validated sampler over `config`.
    pub fn new(config: FontConfig) -> DocsynthResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl Sampler for FontSampler {
    type Draw = FontDraw;
    type Output = FontSpec;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<FontDraw> {
        let index = match self.config.paths.len() {
            0 => None,
            n => Some(rng.random_range(0..n)),
        };
        let size_px = self.config.size.sample(rng) as f32;
        let bold = rng.random_bool(self.config.bold_prob);
        Ok(FontDraw {
            index,
            size_px,
            bold,
        })
    }

    fn data(&self, draw: &FontDraw) -> FontSpec {
        FontSpec {
            path: draw.index.and_then(|i| self.config.paths.get(i).cloned()),
            size_px: draw.size_px,
            bold: draw.bold,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/font.rs"]
mod tests;
