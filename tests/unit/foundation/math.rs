use super::*;
use crate::foundation::core::{Rect, Vec2};

fn assert_close(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
        "{a:?} != {b:?}"
    );
}

#[test]
fn fnv_hash_is_streaming() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"docsynth");
    let mut b = Fnv1a64::new_default();
    b.write_bytes(b"doc");
    b.write_bytes(b"synth");
    assert_eq!(a.finish(), b.finish());

    let mut c = Fnv1a64::new_default();
    c.write_u64(1);
    let mut d = Fnv1a64::new_default();
    d.write_u64(2);
    assert_ne!(c.finish(), d.finish());
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
    assert_eq!(mul_div255_u8(255, 255), 255);
}

#[test]
fn from_affine_matches_kurbo() {
    let a = Affine::rotate_about(0.3, Point::new(10.0, 5.0)) * Affine::translate((3.0, -2.0));
    let h = Homography::from_affine(a);
    assert_eq!(h.m[2], [0.0, 0.0, 1.0]);
    for p in [Point::new(0.0, 0.0), Point::new(12.5, -4.0), Point::new(100.0, 40.0)] {
        assert_close(h.map_point(p).unwrap(), a * p);
    }
}

#[test]
fn quad_to_quad_maps_corners() {
    let src = Quad::from_rect(Rect::new(0.0, 0.0, 100.0, 50.0));
    let dst = Quad {
        points: [
            Point::new(10.0, 5.0),
            Point::new(90.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(0.0, 45.0),
        ],
    };
    let h = Homography::from_quads(&src, &dst).unwrap();
    for i in 0..4 {
        assert_close(h.map_point(src.points[i]).unwrap(), dst.points[i]);
    }
}

#[test]
fn inverse_roundtrips_points() {
    let src = Quad::from_rect(Rect::new(0.0, 0.0, 80.0, 30.0));
    let dst = Quad {
        points: [
            Point::new(4.0, 2.0),
            Point::new(70.0, 6.0),
            Point::new(78.0, 30.0),
            Point::new(0.0, 28.0),
        ],
    };
    let h = Homography::from_quads(&src, &dst).unwrap();
    let inv = h.inverse().unwrap();
    let p = Point::new(33.0, 17.0);
    assert_close(inv.map_point(h.map_point(p).unwrap()).unwrap(), p);
}

#[test]
fn degenerate_correspondence_is_rejected() {
    let src = Quad::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    let collapsed = Quad {
        points: [Point::ORIGIN; 4],
    };
    assert!(matches!(
        Homography::from_quads(&src, &collapsed),
        Err(DocsynthError::Geometry(_))
    ));
}

#[test]
fn horizon_points_fail_loudly() {
    let h: Homography =
        serde_json::from_str(r#"{"m":[[1,0,0],[0,1,0],[-0.1,0,1]]}"#).unwrap();
    assert!(h.map_point(Point::new(5.0, 0.0)).is_ok());
    assert!(matches!(
        h.map_point(Point::new(10.0, 0.0)),
        Err(DocsynthError::Geometry(_))
    ));
    let moved = Homography::from_affine(Affine::translate(Vec2::new(1.0, 1.0)));
    assert!(moved.inverse().is_ok());
}
