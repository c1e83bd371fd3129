use super::*;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::random::page_rng;
use crate::layer::element::Element;

fn striped() -> Raster {
    let mut r = Raster::new(24, 16).unwrap();
    for x in (0..24).step_by(4) {
        r.draw_over(&Raster::filled(2, 16, Rgba8::BLACK).unwrap(), x, 0);
    }
    r
}

#[test]
fn zero_alpha_is_identity() {
    let mut layers = vec![Layer::new(striped())];
    let params = ShapeParams::Elastic {
        alpha: 0.0,
        sigma: 2.0,
        seed: 7,
    };
    ShapeEffect::Elastic {
        alpha: Interval::fixed(0.0),
        sigma: Interval::fixed(2.0),
    }
    .apply(&params, &mut layers)
    .unwrap();
    assert_eq!(layers[0].raster().unwrap(), &striped());
}

#[test]
fn elastic_keeps_size_and_position() {
    let mut layer = Layer::new(striped());
    layer.set_topleft(Point::new(5.0, 6.0));
    let mut layers = vec![layer];
    let effect = ShapeEffect::Elastic {
        alpha: Interval::fixed(3.0),
        sigma: Interval::fixed(1.5),
    };
    let params = effect.sample(&mut page_rng(4, 1)).unwrap();
    effect.apply(&params, &mut layers).unwrap();
    let r = layers[0].raster().unwrap();
    assert_eq!((r.width(), r.height()), (24, 16));
    assert_eq!(layers[0].topleft(), Point::new(5.0, 6.0));
    assert_ne!(r, &striped());
}

#[test]
fn same_params_give_same_pixels() {
    let effect = ShapeEffect::Elastic {
        alpha: Interval::new(1.0, 4.0),
        sigma: Interval::new(1.0, 3.0),
    };
    let params = effect.sample(&mut page_rng(8, 0)).unwrap();
    let mut a = vec![Layer::new(striped())];
    let mut b = vec![Layer::new(striped())];
    effect.apply(&params, &mut a).unwrap();
    effect.apply(&params, &mut b).unwrap();
    assert_eq!(a, b);
}
