use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::math::Homography;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest absolute area a quad may have before it counts as degenerate.
pub const MIN_QUAD_AREA: f64 = 1e-6;

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha forced to 255.
    pub fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    /// Premultiplied byte quadruple, as stored in rasters.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Four-corner footprint of an element, in clockwise order starting top-left
/// (`tl`, `tr`, `br`, `bl` for an untransformed rectangle).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    /// Corner points.
    pub points: [Point; 4],
}

impl Quad {
    /// Quad covering the corners of `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            points: [
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x0, rect.y1),
            ],
        }
    }

    /// Copy of this quad moved by `delta`.
    pub fn translate(self, delta: Vec2) -> Self {
        Self {
            points: self.points.map(|p| p + delta),
        }
    }

    /// Axis-aligned box enclosing the four corners.
    pub fn bounding_box(&self) -> Rect {
        let mut rect = Rect::from_points(self.points[0], self.points[0]);
        for &p in &self.points[1..] {
            rect = rect.union_pt(p);
        }
        rect
    }

    /// Signed area via the shoelace formula (positive for clockwise order in y-down space).
    pub fn signed_area(&self) -> f64 {
        let mut acc = 0.0;
        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc * 0.5
    }

    /// Return `true` when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Reject non-finite or zero-area quads.
    pub fn validated(self) -> DocsynthResult<Self> {
        if !self.is_finite() {
            return Err(DocsynthError::geometry(format!(
                "quad has non-finite corners: {:?}",
                self.points
            )));
        }
        if self.signed_area().abs() <= MIN_QUAD_AREA {
            return Err(DocsynthError::geometry(format!(
                "quad has zero area: {:?}",
                self.points
            )));
        }
        Ok(self)
    }

    /// Map every corner through `h` and validate the result.
    pub fn map(&self, h: &Homography) -> DocsynthResult<Self> {
        let mut points = self.points;
        for p in &mut points {
            *p = h.map_point(*p)?;
        }
        Self { points }.validated()
    }
}

/// Return `Ok(rect)` when `rect` is finite and has a positive area.
pub fn validated_rect(rect: Rect, what: &str) -> DocsynthResult<Rect> {
    let finite = [rect.x0, rect.y0, rect.x1, rect.y1]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(DocsynthError::geometry(format!(
            "{what} has non-finite bounds"
        )));
    }
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Err(DocsynthError::geometry(format!(
            "{what} has zero area ({}x{})",
            rect.width(),
            rect.height()
        )));
    }
    Ok(rect)
}

/// Whole pixels needed to cover `len` units, ignoring float noise from transforms.
pub(crate) fn pixel_extent(len: f64) -> u32 {
    (len - 1e-6).ceil().max(1.0) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
