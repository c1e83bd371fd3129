use imageproc::distance_transform::Norm;

use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::raster::surface::Raster;

/// Kernel radius used for a given sigma (three standard deviations).
pub(crate) fn blur_radius(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil() as u32
}

/// Normalized Gaussian weights over `[-blur_radius(sigma), blur_radius(sigma)]`.
///
/// A non-positive or non-finite sigma yields the one-tap identity kernel.
fn gaussian_weights(sigma: f64) -> Vec<f64> {
    let r = blur_radius(sigma) as i32;
    if r == 0 {
        return vec![1.0];
    }
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

/// Weights in 16.16 fixed point, summing to exactly `1 << 16`.
fn q16_weights(sigma: f64) -> Vec<u32> {
    const ONE: i64 = 1 << 16;
    let mut q: Vec<i64> = gaussian_weights(sigma)
        .into_iter()
        .map(|w| ((w * ONE as f64).round() as i64).clamp(0, ONE))
        .collect();
    let drift = ONE - q.iter().sum::<i64>();
    let mid = q.len() / 2;
    q[mid] = (q[mid] + drift).clamp(0, ONE);
    q.into_iter().map(|w| w as u32).collect()
}

/// Separable Gaussian blur of premultiplied pixels. Edges clamp; pad first to let the blur
/// spread outside the original footprint.
pub(crate) fn gaussian_blur(src: &Raster, sigma: f64) -> DocsynthResult<Raster> {
    let kernel = q16_weights(sigma);
    if kernel.len() == 1 {
        return Ok(src.clone());
    }
    let (w, h) = (src.width(), src.height());
    let mut tmp = src.clone();
    let mut out = src.clone();
    convolve_q16(src.data(), tmp.data_mut(), w, h, &kernel, Axis::X);
    convolve_q16(tmp.data(), out.data_mut(), w, h, &kernel, Axis::Y);
    Ok(out)
}

/// Grow the alpha footprint by `radius` pixels with a square structuring element.
///
/// Only coverage survives: the result is black with the dilated alpha, ready for
/// [`Raster::silhouette`].
pub(crate) fn dilate(src: &Raster, radius: u32) -> DocsynthResult<Raster> {
    let k = u8::try_from(radius).map_err(|_| {
        DocsynthError::configuration(format!("dilation radius {radius} exceeds 255"))
    })?;
    let mask = imageproc::morphology::dilate(&src.alpha_mask(), Norm::LInf, k);
    Raster::from_alpha_mask(&mask)
}

/// Separable Gaussian smoothing of a scalar field stored row-major.
pub(crate) fn smooth_field(field: &[f32], width: u32, height: u32, sigma: f64) -> Vec<f32> {
    let kernel: Vec<f32> = gaussian_weights(sigma)
        .into_iter()
        .map(|w| w as f32)
        .collect();
    if kernel.len() == 1 {
        return field.to_vec();
    }
    let mut tmp = vec![0.0f32; field.len()];
    let mut out = vec![0.0f32; field.len()];
    convolve_f32(field, &mut tmp, width, height, &kernel, Axis::X);
    convolve_f32(&tmp, &mut out, width, height, &kernel, Axis::Y);
    out
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Clamped index of the `tap`-th kernel sample around `(x, y)`, in pixels.
fn tap_index(x: i64, y: i64, tap: usize, radius: i64, w: i64, h: i64, axis: Axis) -> usize {
    let d = tap as i64 - radius;
    let (sx, sy) = match axis {
        Axis::X => ((x + d).clamp(0, w - 1), y),
        Axis::Y => (x, (y + d).clamp(0, h - 1)),
    };
    (sy * w + sx) as usize
}

fn convolve_q16(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (tap, &kw) in k.iter().enumerate() {
                let i = tap_index(x, y, tap, radius, w, h, axis) * 4;
                for (a, &v) in acc.iter_mut().zip(&src[i..i + 4]) {
                    *a += u64::from(kw) * u64::from(v);
                }
            }
            let o = ((y * w + x) as usize) * 4;
            for (d, a) in dst[o..o + 4].iter_mut().zip(acc) {
                *d = ((a + (1 << 15)) >> 16).min(255) as u8;
            }
        }
    }
}

fn convolve_f32(src: &[f32], dst: &mut [f32], width: u32, height: u32, k: &[f32], axis: Axis) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(width), i64::from(height));
    for y in 0..h {
        for x in 0..w {
            dst[(y * w + x) as usize] = k
                .iter()
                .enumerate()
                .map(|(tap, kw)| kw * src[tap_index(x, y, tap, radius, w, h, axis)])
                .sum();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/filter.rs"]
mod tests;
