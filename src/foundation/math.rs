use crate::foundation::core::{Affine, Point, Quad};
use crate::foundation::error::{DocsynthError, DocsynthResult};

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Points closer than this to the projective horizon are rejected.
const HORIZON_EPS: f64 = 1e-9;

/// Projective 2D transform stored as a row-major 3×3 matrix.
///
/// Points map as `(x, y) -> ((m00 x + m01 y + m02) / w, (m10 x + m11 y + m12) / w)` with
/// `w = m20 x + m21 y + m22`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Homography {
    m: [[f64; 3]; 3],
}

impl Default for Homography {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Homography {
    /// The identity mapping.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Lift an affine map.
    pub fn from_affine(a: Affine) -> Self {
        let [a0, b0, c0, d0, e0, f0] = a.as_coeffs();
        Self {
            m: [[a0, c0, e0], [b0, d0, f0], [0.0, 0.0, 1.0]],
        }
    }

    /// Solve for the homography mapping each corner of `src` onto the matching corner of `dst`.
    pub fn from_quads(src: &Quad, dst: &Quad) -> DocsynthResult<Self> {
        // 8 unknowns (h22 fixed to 1), two equations per correspondence.
        let mut a = [[0.0f64; 9]; 8];
        for i in 0..4 {
            let (x, y) = (src.points[i].x, src.points[i].y);
            let (u, v) = (dst.points[i].x, dst.points[i].y);
            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -u * x, -u * y, u];
            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -v * x, -v * y, v];
        }
        let h = solve_8x8(a)?;
        let out = Self {
            m: [[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], 1.0]],
        };
        if !out.is_finite() {
            return Err(DocsynthError::geometry("quad-to-quad homography is not finite"));
        }
        Ok(out)
    }

    /// Return `true` when all coefficients are finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// Map a point, failing when it lands on or behind the projective horizon.
    pub fn map_point(&self, p: Point) -> DocsynthResult<Point> {
        let m = &self.m;
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if !w.is_finite() || w <= HORIZON_EPS {
            return Err(DocsynthError::geometry(format!(
                "point ({}, {}) maps beyond the projective horizon",
                p.x, p.y
            )));
        }
        let x = (m[0][0] * p.x + m[0][1] * p.y + m[0][2]) / w;
        let y = (m[1][0] * p.x + m[1][1] * p.y + m[1][2]) / w;
        if !x.is_finite() || !y.is_finite() {
            return Err(DocsynthError::geometry("mapped point is not finite"));
        }
        Ok(Point::new(x, y))
    }

    /// Inverse mapping.
    pub fn inverse(&self) -> DocsynthResult<Self> {
        let m = &self.m;
        let c00 = m[1][1] * m[2][2] - m[1][2] * m[2][1];
        let c01 = m[1][2] * m[2][0] - m[1][0] * m[2][2];
        let c02 = m[1][0] * m[2][1] - m[1][1] * m[2][0];
        let det = m[0][0] * c00 + m[0][1] * c01 + m[0][2] * c02;
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(DocsynthError::geometry("homography is singular"));
        }
        let inv = 1.0 / det;
        Ok(Self {
            m: [
                [
                    c00 * inv,
                    (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                    (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
                ],
                [
                    c01 * inv,
                    (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                    (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
                ],
                [
                    c02 * inv,
                    (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                    (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
                ],
            ],
        })
    }
}

/// Gaussian elimination with partial pivoting on an augmented 8×9 system.
fn solve_8x8(mut a: [[f64; 9]; 8]) -> DocsynthResult<[f64; 8]> {
    for col in 0..8 {
        let pivot = (col..8)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(DocsynthError::geometry(
                "quad correspondence is degenerate (singular system)",
            ));
        }
        a.swap(col, pivot);
        let p = a[col][col];
        for k in col..9 {
            a[col][k] /= p;
        }
        for row in 0..8 {
            if row == col {
                continue;
            }
            let f = a[row][col];
            if f == 0.0 {
                continue;
            }
            for k in col..9 {
                a[row][k] -= f * a[col][k];
            }
        }
    }
    let mut out = [0.0; 8];
    for (i, v) in out.iter_mut().enumerate() {
        *v = a[i][8];
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
