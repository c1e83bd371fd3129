use crate::foundation::core::{Rgba8, Size};
use crate::foundation::error::{DocsynthError, DocsynthResult};
use crate::foundation::math::mul_div255_u8;

/// Largest raster edge accepted anywhere in the pipeline (vello_cpu surfaces are `u16`-sized).
pub const MAX_RASTER_DIM: u32 = u16::MAX as u32;

/// Premultiplied RGBA8 pixel buffer, tightly packed and row-major.
///
/// Alpha is the visibility channel: fully transparent pixels are `[0, 0, 0, 0]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> DocsynthResult<Self> {
        check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        })
    }

    /// Raster filled with a straight-alpha color.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> DocsynthResult<Self> {
        let mut out = Self::new(width, height)?;
        let px = color.to_premul();
        for dst in out.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
        Ok(out)
    }

    /// Wrap premultiplied bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> DocsynthResult<Self> {
        check_dims(width, height)?;
        if data.len() != byte_len(width, height) {
            return Err(DocsynthError::render(format!(
                "raster byte len mismatch: expected {} for {width}x{height}, got {}",
                byte_len(width, height),
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> DocsynthResult<Self> {
        Self::from_premul(
            u32::from(pixmap.width()),
            u32::from(pixmap.height()),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size as floating-point extents.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`; out-of-bounds reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Composite `src` over `self` with its top-left at `(x, y)`; out-of-bounds parts are clipped.
    pub fn draw_over(&mut self, src: &Raster, x: i64, y: i64) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(src.width)).min(dst_w);
        let y1 = (y + i64::from(src.height)).min(dst_h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let span = ((x1 - x0) as usize) * 4;
        for dy in y0..y1 {
            let sy = (dy - y) as usize;
            let sx = (x0 - x) as usize;
            let s_off = (sy * (src.width as usize) + sx) * 4;
            let d_off = ((dy as usize) * (self.width as usize) + (x0 as usize)) * 4;
            premul_over_in_place(
                &mut self.data[d_off..d_off + span],
                &src.data[s_off..s_off + span],
            );
        }
    }

    /// Copy with transparent margins added on each side.
    pub fn padded(&self, left: u32, top: u32, right: u32, bottom: u32) -> DocsynthResult<Self> {
        let width = self
            .width
            .checked_add(left)
            .and_then(|w| w.checked_add(right))
            .ok_or_else(|| DocsynthError::render("padded raster width overflows"))?;
        let height = self
            .height
            .checked_add(top)
            .and_then(|h| h.checked_add(bottom))
            .ok_or_else(|| DocsynthError::render("padded raster height overflows"))?;
        let mut out = Self::new(width, height)?;
        let row = (self.width as usize) * 4;
        for y in 0..self.height as usize {
            let s = y * row;
            let d = ((y + top as usize) * (width as usize) + left as usize) * 4;
            out.data[d..d + row].copy_from_slice(&self.data[s..s + row]);
        }
        Ok(out)
    }

    /// Same alpha footprint painted with a single color.
    pub fn silhouette(&self, color: Rgba8) -> Self {
        let [r, g, b, a] = color.to_premul();
        let mut out = self.clone();
        for px in out.data.chunks_exact_mut(4) {
            let cov = u16::from(px[3]);
            px[0] = mul_div255_u8(u16::from(r), cov);
            px[1] = mul_div255_u8(u16::from(g), cov);
            px[2] = mul_div255_u8(u16::from(b), cov);
            px[3] = mul_div255_u8(u16::from(a), cov);
        }
        out
    }

    /// The premultiplied bytes as an `image` buffer, for filters that are linear per channel.
    pub(crate) fn to_premul_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    pub(crate) fn from_premul_image(img: image::RgbaImage) -> DocsynthResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_premul(width, height, img.into_raw())
    }

    /// Alpha channel as a grayscale mask.
    pub(crate) fn alpha_mask(&self) -> image::GrayImage {
        let alpha = self.data.chunks_exact(4).map(|px| px[3]).collect();
        image::GrayImage::from_raw(self.width, self.height, alpha)
            .unwrap_or_else(|| image::GrayImage::new(self.width, self.height))
    }

    /// Black coverage raster whose alpha is `mask`.
    pub(crate) fn from_alpha_mask(mask: &image::GrayImage) -> DocsynthResult<Self> {
        let (width, height) = mask.dimensions();
        let data = mask.as_raw().iter().flat_map(|&a| [0, 0, 0, a]).collect();
        Self::from_premul(width, height, data)
    }

    /// RGB image with the alpha channel dropped.
    ///
    /// Callers flatten onto an opaque background first; for opaque pixels the premultiplied
    /// channels equal the straight ones.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        let mut rgb = Vec::with_capacity((self.width as usize) * (self.height as usize) * 3);
        for px in self.data.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
        image::RgbImage::from_raw(self.width, self.height, rgb)
            .unwrap_or_else(|| image::RgbImage::new(self.width, self.height))
    }

    /// Straight-alpha RGBA image.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut rgba = self.data.clone();
        for px in rgba.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in px.iter_mut().take(3) {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, rgba)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }
}

fn check_dims(width: u32, height: u32) -> DocsynthResult<()> {
    if width == 0 || height == 0 {
        return Err(DocsynthError::geometry(format!(
            "raster must be non-empty, got {width}x{height}"
        )));
    }
    if width > MAX_RASTER_DIM || height > MAX_RASTER_DIM {
        return Err(DocsynthError::render(format!(
            "raster {width}x{height} exceeds the {MAX_RASTER_DIM}px edge limit"
        )));
    }
    Ok(())
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

fn premul_over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        for c in 0..4 {
            d[c] = s[c].saturating_add(mul_div255_u8(u16::from(d[c]), inv));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/surface.rs"]
mod tests;
