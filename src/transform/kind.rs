use rand::Rng;

use crate::foundation::core::{Affine, Point, Quad, Rect, Vec2};
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::math::Homography;
use crate::foundation::random::PageRng;
use crate::sampling::interval::{Interval, validate_prob};
use crate::sampling::switch::Component;

use super::GeometricTransform;

/// Geometric transform variants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformKind {
    /// Each corner moves inward independently.
    Perspective {
        /// Corner displacement as a fraction of the reference size, below 0.5.
        percent: Interval,
    },
    /// One side shrinks symmetrically about its midpoint.
    Trapezoid {
        /// Total shrink of the chosen side as a fraction of its length, below 0.5.
        percent: Interval,
    },
    /// Shear about the reference center.
    Skew {
        /// Shear angle in degrees, strictly between -90 and 90.
        angle: Interval,
        /// Probability of shearing along the vertical axis instead.
        #[serde(default)]
        vertical_prob: f64,
    },
    /// Rotation about the reference center.
    Rotate {
        /// Angle in degrees, clockwise on screen.
        angle: Interval,
    },
}

/// Side of the reference box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// `tl`–`tr`.
    Top,
    /// `tr`–`br`.
    Right,
    /// `br`–`bl`.
    Bottom,
    /// `bl`–`tl`.
    Left,
}

/// Parameters drawn for one [`TransformKind`].
#[derive(Clone, Debug, PartialEq)]
pub enum TransformParams {
    /// Inward offsets of `tl`, `tr`, `br`, `bl` as fractions of width and height.
    Perspective {
        /// Per-corner fractions.
        offsets: [Vec2; 4],
    },
    /// Shrink `side` by `fraction` of its length.
    Trapezoid {
        /// Shrunk side.
        side: Side,
        /// Shrink fraction.
        fraction: f64,
    },
    /// Shear by `angle` degrees.
    Skew {
        /// Angle in degrees.
        angle: f64,
        /// Shear along the vertical axis.
        vertical: bool,
    },
    /// Rotate by `angle` degrees.
    Rotate {
        /// Angle in degrees.
        angle: f64,
    },
}

impl Component for TransformKind {
    type Params = TransformParams;

    fn sample(&self, rng: &mut PageRng) -> DocsynthResult<TransformParams> {
        Ok(match self {
            Self::Perspective { percent } => {
                let mut offsets = [Vec2::ZERO; 4];
                for o in &mut offsets {
                    *o = Vec2::new(percent.sample(rng), percent.sample(rng));
                }
                TransformParams::Perspective { offsets }
            }
            Self::Trapezoid { percent } => {
                let side = match rng.random_range(0..4) {
                    0 => Side::Top,
                    1 => Side::Right,
                    2 => Side::Bottom,
                    _ => Side::Left,
                };
                TransformParams::Trapezoid {
                    side,
                    fraction: percent.sample(rng),
                }
            }
            Self::Skew {
                angle,
                vertical_prob,
            } => {
                validate_prob("transform.skew.vertical_prob", *vertical_prob)?;
                let angle = angle.sample(rng);
                TransformParams::Skew {
                    angle,
                    vertical: rng.random_bool(*vertical_prob),
                }
            }
            Self::Rotate { angle } => TransformParams::Rotate {
                angle: angle.sample(rng),
            },
        })
    }

    fn validate(&self) -> DocsynthResult<()> {
        match self {
            Self::Perspective { percent } | Self::Trapezoid { percent } => {
                percent.validate_within("transform percent", 0.0, 0.5)?;
                if percent.max >= 0.5 {
                    return Err(DocsynthError::configuration(
                        "transform percent must stay below 0.5",
                    ));
                }
                Ok(())
            }
            Self::Skew {
                angle,
                vertical_prob,
            } => {
                angle.validate_within("transform.skew.angle", -90.0, 90.0)?;
                if angle.min <= -90.0 || angle.max >= 90.0 {
                    return Err(DocsynthError::configuration(
                        "transform.skew.angle must lie strictly within (-90, 90)",
                    ));
                }
                validate_prob("transform.skew.vertical_prob", *vertical_prob)
            }
            Self::Rotate { angle } => angle.validate("transform.rotate.angle"),
        }
    }
}

impl GeometricTransform for TransformKind {
    fn homography(
        &self,
        params: &TransformParams,
        reference: Rect,
    ) -> DocsynthResult<Option<Homography>> {
        let center = reference.center();
        let h = match params {
            TransformParams::Perspective { offsets } => {
                let (w, h) = (reference.width(), reference.height());
                let src = Quad::from_rect(reference);
                let inward = [
                    Vec2::new(1.0, 1.0),
                    Vec2::new(-1.0, 1.0),
                    Vec2::new(-1.0, -1.0),
                    Vec2::new(1.0, -1.0),
                ];
                let mut dst = src;
                for ((p, o), dir) in dst.points.iter_mut().zip(offsets).zip(inward) {
                    *p += Vec2::new(dir.x * o.x * w, dir.y * o.y * h);
                }
                Homography::from_quads(&src, &dst)?
            }
            TransformParams::Trapezoid { side, fraction } => {
                let src = Quad::from_rect(reference);
                let mut dst = src;
                let dx = reference.width() * fraction * 0.5;
                let dy = reference.height() * fraction * 0.5;
                let [tl, tr, br, bl] = &mut dst.points;
                match side {
                    Side::Top => {
                        tl.x += dx;
                        tr.x -= dx;
                    }
                    Side::Bottom => {
                        bl.x += dx;
                        br.x -= dx;
                    }
                    Side::Left => {
                        tl.y += dy;
                        bl.y -= dy;
                    }
                    Side::Right => {
                        tr.y += dy;
                        br.y -= dy;
                    }
                }
                Homography::from_quads(&src, &dst)?
            }
            TransformParams::Skew { angle, vertical } => {
                let t = angle.to_radians().tan();
                let shear = if *vertical {
                    Affine::skew(0.0, t)
                } else {
                    Affine::skew(t, 0.0)
                };
                Homography::from_affine(about(center, shear))
            }
            TransformParams::Rotate { angle } => {
                Homography::from_affine(Affine::rotate_about(angle.to_radians(), center))
            }
        };
        Ok(Some(h))
    }
}

fn about(center: Point, a: Affine) -> Affine {
    Affine::translate(center.to_vec2()) * a * Affine::translate(-center.to_vec2())
}

#[cfg(test)]
#[path = "../../tests/unit/transform/kind.rs"]
mod tests;
