use crate::foundation::core::{Point, Quad, Rect, Size, Vec2, pixel_extent, validated_rect};
use crate::foundation::error::DocsynthResult;
use crate::foundation::math::Homography;
use crate::raster::surface::Raster;

/// Positional and geometric contract shared by layers, groups and paragraph units.
pub trait Element {
    /// Axis-aligned bounding box in the current coordinate frame.
    fn bbox(&self) -> Rect;

    /// Four-corner footprint.
    fn quad(&self) -> Quad;

    /// Move by `delta`, preserving internal structure.
    fn translate(&mut self, delta: Vec2);

    /// Draw into `dst`, whose pixel `(0, 0)` sits at `dst_origin`.
    fn draw_onto(&self, dst: &mut Raster, dst_origin: Point);

    /// Minimum corner of the bounding box.
    fn topleft(&self) -> Point {
        self.bbox().origin()
    }

    /// Move so that the bounding box starts at `p`.
    fn set_topleft(&mut self, p: Point) {
        let delta = p - self.topleft();
        self.translate(delta);
    }

    /// Bounding box extents.
    fn size(&self) -> Size {
        self.bbox().size()
    }

    /// Rasterize into a fresh surface covering the bounding box.
    ///
    /// Returns the raster together with the point its pixel `(0, 0)` corresponds to.
    fn render(&self) -> DocsynthResult<(Raster, Point)> {
        let bbox = validated_rect(self.bbox(), "rendered element")?;
        let mut out = Raster::new(pixel_extent(bbox.width()), pixel_extent(bbox.height()))?;
        self.draw_onto(&mut out, bbox.origin());
        Ok((out, bbox.origin()))
    }
}

/// Elements that follow a projective transform.
pub trait Transformable: Element {
    /// Map this element's geometry through `h`; pixel-owning layers are re-rasterized.
    fn apply_homography(&mut self, h: &Homography) -> DocsynthResult<()>;
}

/// Union of bounding boxes, or `None` for an empty sequence.
pub fn union_bbox<'a, E: Element + ?Sized + 'a>(
    elements: impl IntoIterator<Item = &'a E>,
) -> Option<Rect> {
    elements.into_iter().map(|e| e.bbox()).reduce(|a, b| a.union(b))
}

/// Round a placement offset to whole pixels; rasters are only ever drawn on the pixel grid.
pub(crate) fn pixel_offset(at: Point, origin: Point) -> (i64, i64) {
    let d = at - origin;
    (d.x.round() as i64, d.y.round() as i64)
}
