use rand::{Rng, RngCore, SeedableRng};

use crate::foundation::error::DocsynthResult;
use crate::foundation::random::{PageRng, derive_seed};
use crate::layer::layer::Layer;
use crate::raster::filter::smooth_field;
use crate::raster::surface::Raster;
use crate::raster::warp::displace;
use crate::sampling::interval::Interval;
use crate::sampling::switch::Component;

use super::LayerEffect;

/// Distortions that move pixels inside a layer without resizing it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeEffect {
    /// Smoothed random displacement field.
    Elastic {
        /// Displacement scale in pixels.
        alpha: Interval,
        /// Smoothing sigma in pixels; larger values give softer waves.
        sigma: Interval,
    },
}

/// Parameters drawn for one [`ShapeEffect`].
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeParams {
    /// See [`ShapeEffect::Elastic`].
    Elastic {
        /// Displacement scale.
        alpha: f64,
        /// Smoothing sigma.
        sigma: f64,
        /// Seed for the per-layer displacement fields.
        seed: u64,
    },
}

impl Component for ShapeEffect {
    type Params = ShapeParams;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<ShapeParams> {
        match self {
            Self::Elastic { alpha, sigma } => Ok(ShapeParams::Elastic {
                alpha: alpha.sample(rng),
                sigma: sigma.sample(rng),
                seed: rng.next_u64(),
            }),
        }
    }

    fn validate(&self) -> DocsynthResult<()> {
        match self {
            Self::Elastic { alpha, sigma } => {
                alpha.validate_within("shape.elastic.alpha", 0.0, 1024.0)?;
                sigma.validate_within("shape.elastic.sigma", 0.0, 256.0)
            }
        }
    }
}

impl LayerEffect for ShapeEffect {
    fn apply(&self, params: &ShapeParams, layers: &mut [Layer]) -> DocsynthResult<()> {
        let ShapeParams::Elastic { alpha, sigma, seed } = *params;
        for (i, layer) in layers.iter_mut().enumerate() {
            let mut rng = PageRng::seed_from_u64(derive_seed(seed, b"elastic", i as u64));
            layer.map_pixels(|src| elastic(src, alpha, sigma, &mut rng))?;
        }
        Ok(())
    }
}

fn elastic(src: &Raster, alpha: f64, sigma: f64, rng: &mut PageRng) -> DocsynthResult<Raster> {
    let (w, h) = (src.width(), src.height());
    let n = (w as usize) * (h as usize);
    let noise = |rng: &mut PageRng| -> Vec<f32> {
        (0..n).map(|_| rng.random_range(-1.0f32..=1.0)).collect()
    };
    let dx = smooth_field(&noise(rng), w, h, sigma);
    let dy = smooth_field(&noise(rng), w, h, sigma);
    let alpha = alpha as f32;
    displace(src, |x, y| {
        let i = (y as usize) * (w as usize) + (x as usize);
        (dx[i] * alpha, dy[i] * alpha)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shape.rs"]
mod tests;
