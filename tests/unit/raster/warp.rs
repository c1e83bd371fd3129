use super::*;
use crate::foundation::core::{Affine, Rgba8, Vec2};

#[test]
fn identity_warp_reproduces_pixels() {
    let mut src = Raster::new(4, 3).unwrap();
    src.draw_over(&Raster::filled(2, 1, Rgba8::BLACK).unwrap(), 1, 1);
    let origin = Point::new(10.0, 20.0);
    let out = warp_homography(
        &src,
        origin,
        &Homography::IDENTITY,
        Rect::new(10.0, 20.0, 14.0, 23.0),
    )
    .unwrap();
    assert_eq!(out, src);
}

#[test]
fn translation_moves_content() {
    let src = Raster::filled(2, 2, Rgba8::BLACK).unwrap();
    let h = Homography::from_affine(Affine::translate(Vec2::new(3.0, 0.0)));
    let out = warp_homography(&src, Point::ORIGIN, &h, Rect::new(0.0, 0.0, 6.0, 2.0)).unwrap();
    assert_eq!(out.pixel(0, 0)[3], 0);
    assert_eq!(out.pixel(3, 0), [0, 0, 0, 255]);
    assert_eq!(out.pixel(4, 1), [0, 0, 0, 255]);
    assert_eq!(out.pixel(5, 1)[3], 0);
}

#[test]
fn rotation_stays_premultiplied() {
    let src = Raster::filled(6, 4, Rgba8::new(255, 128, 0, 200)).unwrap();
    let h = Homography::from_affine(Affine::rotate_about(0.4, Point::new(3.0, 2.0)));
    let frame = Rect::new(-2.0, -2.0, 8.0, 6.0);
    let out = warp_homography(&src, Point::ORIGIN, &h, frame).unwrap();
    assert!(out.covered_pixels() > 0);
    for px in out.data().chunks_exact(4) {
        assert!(px[0] <= px[3] && px[1] <= px[3] && px[2] <= px[3], "{px:?}");
    }
}

#[test]
fn half_pixel_shift_keeps_edge_columns() {
    let src = Raster::filled(3, 1, Rgba8::BLACK).unwrap();
    let h = Homography::from_affine(Affine::translate(Vec2::new(0.5, 0.0)));
    let out = warp_homography(&src, Point::ORIGIN, &h, Rect::new(0.0, 0.0, 4.0, 1.0)).unwrap();
    let alpha: Vec<u8> = (0..4).map(|x| out.pixel(x, 0)[3]).collect();
    assert!((126..=129).contains(&alpha[0]), "{alpha:?}");
    assert_eq!(&alpha[1..3], &[255, 255]);
    assert!((126..=129).contains(&alpha[3]), "{alpha:?}");
}

#[test]
fn displace_by_zero_is_identity() {
    let mut src = Raster::new(5, 4).unwrap();
    src.draw_over(&Raster::filled(2, 2, Rgba8::new(10, 20, 30, 255)).unwrap(), 3, 2);
    assert_eq!(displace(&src, |_, _| (0.0, 0.0)).unwrap(), src);
}
