use crate::foundation::core::{Point, Quad, Rect, Vec2};
use crate::foundation::error::DocsynthResult;
use crate::foundation::math::Homography;
use crate::layer::element::{Element, Transformable, pixel_offset};
use crate::raster::surface::Raster;
use crate::raster::warp::warp_homography;

/// Atomic visual unit: optional pixels plus a quadrilateral footprint.
///
/// When pixels are present, raster pixel `(0, 0)` sits at the bounding-box origin of the quad.
/// A layer without pixels is geometry-only; it still follows translations and transforms.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    raster: Option<Raster>,
    quad: Quad,
}

impl Layer {
    /// Layer showing `raster` with its top-left at the origin.
    pub fn new(raster: Raster) -> Self {
        let quad = Quad::from_rect(Rect::from_origin_size(Point::ORIGIN, raster.size()));
        Self {
            raster: Some(raster),
            quad,
        }
    }

    /// Geometry-only layer with the given footprint.
    pub fn from_quad(quad: Quad) -> DocsynthResult<Self> {
        Ok(Self {
            raster: None,
            quad: quad.validated()?,
        })
    }

    /// Layer from pixels and a footprint whose bounding box starts at raster pixel `(0, 0)`.
    pub(crate) fn from_parts(raster: Raster, quad: Quad) -> Self {
        Self {
            raster: Some(raster),
            quad,
        }
    }

    /// Pixels, if this layer still owns any.
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Return `true` when this layer owns pixels.
    pub fn has_pixels(&self) -> bool {
        self.raster.is_some()
    }

    /// Drop the pixels and keep only geometry.
    pub fn into_geometry(self) -> Self {
        Self {
            raster: None,
            quad: self.quad,
        }
    }

    /// Swap in a new raster whose pixel `(0, 0)` lands at `topleft + offset`.
    ///
    /// The footprint becomes the axis-aligned rectangle of the new raster, so this is meant for
    /// passes that run before any transform (style effects growing the glyph box).
    pub fn replace_raster(&mut self, raster: Raster, offset: Vec2) {
        let origin = self.topleft() + offset;
        self.quad = Quad::from_rect(Rect::from_origin_size(origin, raster.size()));
        self.raster = Some(raster);
    }

    /// Rewrite the pixels in place without moving or resizing the layer.
    pub fn map_pixels(
        &mut self,
        f: impl FnOnce(&Raster) -> DocsynthResult<Raster>,
    ) -> DocsynthResult<()> {
        if let Some(raster) = &self.raster {
            let next = f(raster)?;
            debug_assert_eq!(
                (next.width(), next.height()),
                (raster.width(), raster.height())
            );
            self.raster = Some(next);
        }
        Ok(())
    }
}

impl Element for Layer {
    fn bbox(&self) -> Rect {
        self.quad.bounding_box()
    }

    fn quad(&self) -> Quad {
        self.quad
    }

    fn translate(&mut self, delta: Vec2) {
        self.quad = self.quad.translate(delta);
    }

    fn draw_onto(&self, dst: &mut Raster, dst_origin: Point) {
        if let Some(raster) = &self.raster {
            let (x, y) = pixel_offset(self.topleft(), dst_origin);
            dst.draw_over(raster, x, y);
        }
    }
}

impl Transformable for Layer {
    fn apply_homography(&mut self, h: &Homography) -> DocsynthResult<()> {
        let quad = self.quad.map(h)?;
        if let Some(raster) = &self.raster {
            let warped = warp_homography(raster, self.topleft(), h, quad.bounding_box())?;
            self.raster = Some(warped);
        }
        self.quad = quad;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layer/layer.rs"]
mod tests;
