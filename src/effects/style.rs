use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::random::PageRng;
use crate::layer::layer::Layer;
use crate::raster::filter::{blur_radius, dilate, gaussian_blur};
use crate::raster::surface::Raster;
use crate::sampling::color::ColorConfig;
use crate::sampling::interval::Interval;
use crate::sampling::switch::Component;

use super::LayerEffect;

/// Text decoration drawn around or behind glyphs. Every variant grows the layer raster.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleEffect {
    /// Solid outline of `size` pixels.
    Border {
        /// Outline thickness in pixels.
        size: Interval,
        /// Outline color.
        #[serde(default)]
        color: ColorConfig,
    },
    /// Blurred drop shadow.
    Shadow {
        /// Offset length in pixels.
        distance: Interval,
        /// Offset direction in degrees (0 = +x, 90 = +y).
        angle: Interval,
        /// Blur sigma in pixels.
        blur: Interval,
        /// Shadow opacity in `[0, 1]`.
        opacity: Interval,
        /// Shadow color.
        #[serde(default)]
        color: ColorConfig,
    },
    /// Stacked copies trailing off in one direction.
    Extrusion {
        /// Trail length in pixels.
        length: Interval,
        /// Trail direction in degrees.
        angle: Interval,
        /// Trail color.
        #[serde(default)]
        color: ColorConfig,
    },
}

/// Parameters drawn for one [`StyleEffect`].
#[derive(Clone, Debug, PartialEq)]
pub enum StyleParams {
    /// See [`StyleEffect::Border`].
    Border {
        /// Thickness in whole pixels.
        size: u32,
        /// Outline color.
        color: Rgba8,
    },
    /// See [`StyleEffect::Shadow`].
    Shadow {
        /// Shadow offset in whole pixels.
        offset: (i64, i64),
        /// Blur sigma.
        blur: f64,
        /// Shadow color with opacity folded into alpha.
        color: Rgba8,
    },
    /// See [`StyleEffect::Extrusion`].
    Extrusion {
        /// Unit direction of the trail.
        direction: Vec2,
        /// Trail length in whole pixels.
        length: u32,
        /// Trail color.
        color: Rgba8,
    },
}

impl Component for StyleEffect {
    type Params = StyleParams;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<StyleParams> {
        Ok(match self {
            Self::Border { size, color } => StyleParams::Border {
                size: size.sample(rng).round() as u32,
                color: color.sample(rng)?,
            },
            Self::Shadow {
                distance,
                angle,
                blur,
                opacity,
                color,
            } => {
                let d = distance.sample(rng);
                let dir = unit(angle.sample(rng));
                let blur = blur.sample(rng);
                let opacity = opacity.sample(rng);
                let mut color = color.sample(rng)?;
                color.a = (f64::from(color.a) * opacity).round() as u8;
                StyleParams::Shadow {
                    offset: ((dir.x * d).round() as i64, (dir.y * d).round() as i64),
                    blur,
                    color,
                }
            }
            Self::Extrusion {
                length,
                angle,
                color,
            } => StyleParams::Extrusion {
                length: length.sample(rng).round() as u32,
                direction: unit(angle.sample(rng)),
                color: color.sample(rng)?,
            },
        })
    }

    fn validate(&self) -> DocsynthResult<()> {
        match self {
            Self::Border { size, color } => {
                size.validate_within("style.border.size", 0.0, 255.0)?;
                color.validate("style.border.color")
            }
            Self::Shadow {
                distance,
                angle,
                blur,
                opacity,
                color,
            } => {
                distance.validate_within("style.shadow.distance", 0.0, 1024.0)?;
                angle.validate("style.shadow.angle")?;
                blur.validate_within("style.shadow.blur", 0.0, 256.0)?;
                opacity.validate_within("style.shadow.opacity", 0.0, 1.0)?;
                color.validate("style.shadow.color")
            }
            Self::Extrusion {
                length,
                angle,
                color,
            } => {
                length.validate_within("style.extrusion.length", 0.0, 1024.0)?;
                angle.validate("style.extrusion.angle")?;
                color.validate("style.extrusion.color")
            }
        }
    }
}

impl LayerEffect for StyleEffect {
    fn apply(&self, params: &StyleParams, layers: &mut [Layer]) -> DocsynthResult<()> {
        for layer in layers {
            let Some(raster) = layer.raster() else {
                continue;
            };
            let (styled, offset) = match params {
                StyleParams::Border { size, color } => border(raster, *size, *color)?,
                StyleParams::Shadow {
                    offset,
                    blur,
                    color,
                } => shadow(raster, *offset, *blur, *color)?,
                StyleParams::Extrusion {
                    direction,
                    length,
                    color,
                } => extrusion(raster, *direction, *length, *color)?,
            };
            layer.replace_raster(styled, offset);
        }
        Ok(())
    }
}

fn unit(degrees: f64) -> Vec2 {
    Vec2::from_angle(degrees.to_radians())
}

/// Margins `(left, top, right, bottom)` that fit a copy shifted by `(dx, dy)` plus `extra`.
fn margins(dx: i64, dy: i64, extra: u32) -> DocsynthResult<(u32, u32, u32, u32)> {
    let side = |v: i64| -> DocsynthResult<u32> {
        u32::try_from(v.max(0))
            .ok()
            .and_then(|v| v.checked_add(extra))
            .ok_or_else(|| DocsynthError::render("style margin overflows"))
    };
    Ok((side(-dx)?, side(-dy)?, side(dx)?, side(dy)?))
}

fn border(src: &Raster, size: u32, color: Rgba8) -> DocsynthResult<(Raster, Vec2)> {
    let base = src.padded(size, size, size, size)?;
    let mut out = dilate(&base, size)?.silhouette(color);
    out.draw_over(&base, 0, 0);
    let s = f64::from(size);
    Ok((out, Vec2::new(-s, -s)))
}

fn shadow(
    src: &Raster,
    (dx, dy): (i64, i64),
    blur: f64,
    color: Rgba8,
) -> DocsynthResult<(Raster, Vec2)> {
    let (l, t, r, b) = margins(dx, dy, blur_radius(blur))?;
    let mut out = Raster::new(src.width() + l + r, src.height() + t + b)?;
    out.draw_over(&src.silhouette(color), i64::from(l) + dx, i64::from(t) + dy);
    let mut out = gaussian_blur(&out, blur)?;
    out.draw_over(src, i64::from(l), i64::from(t));
    Ok((out, Vec2::new(-f64::from(l), -f64::from(t))))
}

fn extrusion(
    src: &Raster,
    direction: Vec2,
    length: u32,
    color: Rgba8,
) -> DocsynthResult<(Raster, Vec2)> {
    let tip = direction * f64::from(length);
    let (l, t, r, b) = margins(tip.x.round() as i64, tip.y.round() as i64, 0)?;
    let mut out = Raster::new(src.width() + l + r, src.height() + t + b)?;
    let trail = src.silhouette(color);
    for k in (1..=length).rev() {
        let step = direction * f64::from(k);
        out.draw_over(
            &trail,
            i64::from(l) + step.x.round() as i64,
            i64::from(t) + step.y.round() as i64,
        );
    }
    out.draw_over(src, i64::from(l), i64::from(t));
    Ok((out, Vec2::new(-f64::from(l), -f64::from(t))))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/style.rs"]
mod tests;
