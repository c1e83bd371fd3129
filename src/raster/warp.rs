use imageproc::geometric_transformations::{Interpolation, warp_into_with};

use crate::foundation::core::{Point, Rect, pixel_extent};
use crate::foundation::error::DocsynthResult;
use crate::foundation::math::Homography;
use crate::raster::surface::Raster;

/// Sample position that bilinear interpolation always reads as transparent.
const OUTSIDE: (f32, f32) = (-2.0, -2.0);

/// Resample `src` (whose pixel `(0, 0)` sits at `src_origin`) through `h` into a new raster
/// whose pixel `(0, 0)` sits at `dst_frame.origin()`.
pub fn warp_homography(
    src: &Raster,
    src_origin: Point,
    h: &Homography,
    dst_frame: Rect,
) -> DocsynthResult<Raster> {
    let inv = h.inverse()?;
    let width = pixel_extent(dst_frame.width());
    let height = pixel_extent(dst_frame.height());
    // Padded source pixel (1, 1) is centered at `src_origin + (0.5, 0.5)`.
    let ox = src_origin.x - 0.5;
    let oy = src_origin.y - 0.5;
    warp_with(src, width, height, |x, y| {
        let p = Point::new(
            dst_frame.x0 + f64::from(x) + 0.5,
            dst_frame.y0 + f64::from(y) + 0.5,
        );
        // Pixels whose preimage lies beyond the horizon stay transparent.
        match inv.map_point(p) {
            Ok(q) => ((q.x - ox) as f32, (q.y - oy) as f32),
            Err(_) => OUTSIDE,
        }
    })
}

/// Same-size bilinear resample where output pixel `(x, y)` reads `src` at `(x + dx, y + dy)`.
pub(crate) fn displace(
    src: &Raster,
    offset_of: impl Fn(u32, u32) -> (f32, f32) + Sync,
) -> DocsynthResult<Raster> {
    warp_with(src, src.width(), src.height(), |x, y| {
        let (dx, dy) = offset_of(x as u32, y as u32);
        (x + 1.0 + dx, y + 1.0 + dy)
    })
}

/// Build a `width`×`height` raster whose pixel `(x, y)` samples the source padded by one
/// transparent pixel at the position returned by `mapping`. Edge pixels blend into the padding.
fn warp_with(
    src: &Raster,
    width: u32,
    height: u32,
    mapping: impl Fn(f32, f32) -> (f32, f32) + Sync + Send,
) -> DocsynthResult<Raster> {
    let mut out = Raster::new(width, height)?.to_premul_image();
    let padded = src.padded(1, 1, 1, 1)?.to_premul_image();
    warp_into_with(
        &padded,
        mapping,
        Interpolation::Bilinear,
        image::Rgba([0; 4]),
        &mut out,
    );
    Raster::from_premul_image(out)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/warp.rs"]
mod tests;
