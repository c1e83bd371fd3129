use super::*;
use crate::foundation::random::page_rng;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-6
}

#[test]
fn perspective_moves_corners_inward() {
    let reference = Rect::new(0.0, 0.0, 100.0, 50.0);
    let params = TransformParams::Perspective {
        offsets: [
            Vec2::new(0.1, 0.2),
            Vec2::ZERO,
            Vec2::new(0.1, 0.1),
            Vec2::ZERO,
        ],
    };
    let kind = TransformKind::Perspective {
        percent: Interval::new(0.0, 0.2),
    };
    let h = kind.homography(&params, reference).unwrap().unwrap();
    let q = Quad::from_rect(reference).map(&h).unwrap();
    assert!(close(q.points[0], Point::new(10.0, 10.0)));
    assert!(close(q.points[1], Point::new(100.0, 0.0)));
    assert!(close(q.points[2], Point::new(90.0, 45.0)));
    assert!(close(q.points[3], Point::new(0.0, 50.0)));
}

#[test]
fn trapezoid_shrinks_one_side() {
    let reference = Rect::new(10.0, 10.0, 110.0, 60.0);
    let kind = TransformKind::Trapezoid {
        percent: Interval::fixed(0.2),
    };
    let params = TransformParams::Trapezoid {
        side: Side::Top,
        fraction: 0.2,
    };
    let h = kind.homography(&params, reference).unwrap().unwrap();
    let q = Quad::from_rect(reference).map(&h).unwrap();
    assert!(close(q.points[0], Point::new(20.0, 10.0)));
    assert!(close(q.points[1], Point::new(100.0, 10.0)));
    assert!(close(q.points[2], Point::new(110.0, 60.0)));
    assert!(close(q.points[3], Point::new(10.0, 60.0)));
}

#[test]
fn rotate_turns_about_reference_center() {
    let reference = Rect::new(0.0, 0.0, 40.0, 20.0);
    let kind = TransformKind::Rotate {
        angle: Interval::fixed(90.0),
    };
    let params = kind.sample(&mut page_rng(0, 0)).unwrap();
    assert_eq!(params, TransformParams::Rotate { angle: 90.0 });
    let h = kind.homography(&params, reference).unwrap().unwrap();
    let q = Quad::from_rect(reference).map(&h).unwrap();
    let b = q.bounding_box();
    assert!(close(b.center(), Point::new(20.0, 10.0)));
    assert!((b.width() - 20.0).abs() < 1e-9);
    assert!((b.height() - 40.0).abs() < 1e-9);
}

#[test]
fn skew_keeps_center_and_horizontal_edges() {
    let reference = Rect::new(0.0, 0.0, 40.0, 20.0);
    let kind = TransformKind::Skew {
        angle: Interval::fixed(45.0),
        vertical_prob: 0.0,
    };
    let params = kind.sample(&mut page_rng(0, 0)).unwrap();
    let h = kind.homography(&params, reference).unwrap().unwrap();
    assert!(close(h.map_point(reference.center()).unwrap(), reference.center()));
    let q = Quad::from_rect(reference).map(&h).unwrap();
    // Shear keeps opposite edges parallel.
    assert!(close(q.points[0] + (q.points[2] - q.points[3]), q.points[1]));
    assert!(close(q.points[0], Point::new(-10.0, 0.0)));
    assert!(close(q.points[3], Point::new(10.0, 20.0)));
}

#[test]
fn sampled_perspective_offsets_stay_in_range() {
    let kind = TransformKind::Perspective {
        percent: Interval::new(0.05, 0.15),
    };
    let mut rng = page_rng(3, 3);
    for _ in 0..20 {
        let TransformParams::Perspective { offsets } = kind.sample(&mut rng).unwrap() else {
            panic!("expected perspective params");
        };
        for o in offsets {
            assert!((0.05..=0.15).contains(&o.x) && (0.05..=0.15).contains(&o.y));
        }
    }
}

#[test]
fn invalid_ranges_are_rejected() {
    assert!(
        TransformKind::Perspective {
            percent: Interval::new(0.0, 0.5)
        }
        .validate()
        .is_err()
    );
    assert!(
        TransformKind::Skew {
            angle: Interval::new(-90.0, 10.0),
            vertical_prob: 0.0
        }
        .validate()
        .is_err()
    );
    assert!(
        TransformKind::Skew {
            angle: Interval::new(-30.0, 30.0),
            vertical_prob: 0.5
        }
        .validate()
        .is_ok()
    );
    let parsed: TransformKind =
        serde_json::from_str(r#"{"kind": "rotate", "angle": [-5, 5]}"#).unwrap();
    assert_eq!(
        parsed,
        TransformKind::Rotate {
            angle: Interval::new(-5.0, 5.0)
        }
    );
}
