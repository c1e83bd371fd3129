use rand::Rng;

use crate::foundation::core::Rgba8;
use crate::foundation::error::DocsynthResult;
use crate::foundation::random::PageRng;
use crate::sampling::Sampler;
use crate::sampling::interval::{Interval, validate_prob};

/// Per-channel color ranges (0..=255).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Red, green and blue ranges.
    pub rgb: [Interval; 3],
    /// Alpha range.
    pub alpha: Interval,
    /// Probability of copying the red draw into green and blue.
    pub grayscale_prob: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::solid(Rgba8::BLACK)
    }
}

impl ColorConfig {
    /// Ranges that always yield `color`.
    pub fn solid(color: Rgba8) -> Self {
        Self {
            rgb: [
                Interval::fixed(f64::from(color.r)),
                Interval::fixed(f64::from(color.g)),
                Interval::fixed(f64::from(color.b)),
            ],
            alpha: Interval::fixed(f64::from(color.a)),
            grayscale_prob: 0.0,
        }
    }

    /// Check that every range lies in `[0, 255]`.
    pub fn validate(&self, name: &str) -> DocsynthResult<()> {
        for (ch, range) in ["r", "g", "b"].iter().zip(&self.rgb) {
            range.validate_within(&format!("{name}.rgb.{ch}"), 0.0, 255.0)?;
        }
        self.alpha
            .validate_within(&format!("{name}.alpha"), 0.0, 255.0)?;
        validate_prob(&format!("{name}.grayscale_prob"), self.grayscale_prob)
    }

    /// Draw one color from already validated ranges.
    pub(crate) fn sample(&self, rng: &mut PageRng) -> DocsynthResult<Rgba8> {
        validate_prob("grayscale_prob", self.grayscale_prob)?;
        let channel = |rng: &mut PageRng, range: &Interval| {
            range.sample(rng).round().clamp(0.0, 255.0) as u8
        };
        let r = channel(rng, &self.rgb[0]);
        let g = channel(rng, &self.rgb[1]);
        let b = channel(rng, &self.rgb[2]);
        let a = channel(rng, &self.alpha);
        if rng.random_bool(self.grayscale_prob) {
            return Ok(Rgba8::new(r, r, r, a));
        }
        Ok(Rgba8::new(r, g, b, a))
    }
}

/// Samples straight-alpha colors.
#[derive(Clone, Debug)]
pub struct ColorSampler {
    config: ColorConfig,
}

impl ColorSampler {
    /// Validated sampler; `name` prefixes configuration errors.
    pub fn new(config: ColorConfig, name: &str) -> DocsynthResult<Self> {
        config.validate(name)?;
        Ok(Self { config })
    }
}

impl Sampler for ColorSampler {
    type Draw = Rgba8;
    type Output = Rgba8;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<Rgba8> {
        self.config.sample(rng)
    }

    fn data(&self, draw: &Rgba8) -> Rgba8 {
        *draw
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sampling/color.rs"]
mod tests;
