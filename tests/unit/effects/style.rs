use super::*;
use crate::foundation::core::{Point, Rect};
use crate::foundation::random::page_rng;
use crate::layer::element::Element;

fn glyph_layer() -> Layer {
    let mut l = Layer::new(Raster::filled(10, 6, Rgba8::BLACK).unwrap());
    l.set_topleft(Point::new(20.0, 30.0));
    l
}

fn red() -> Rgba8 {
    Rgba8::new(255, 0, 0, 255)
}

#[test]
fn border_grows_layer_evenly() {
    let mut layers = vec![glyph_layer()];
    let params = StyleParams::Border {
        size: 2,
        color: red(),
    };
    StyleEffect::Border {
        size: Interval::fixed(2.0),
        color: ColorConfig::solid(red()),
    }
    .apply(&params, &mut layers)
    .unwrap();
    assert_eq!(layers[0].bbox(), Rect::new(18.0, 28.0, 32.0, 38.0));
    let r = layers[0].raster().unwrap();
    assert_eq!(r.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(r.pixel(5, 5), [0, 0, 0, 255]);
}

#[test]
fn shadow_extends_towards_offset() {
    let mut layers = vec![glyph_layer()];
    let effect = StyleEffect::Shadow {
        distance: Interval::fixed(4.0),
        angle: Interval::fixed(0.0),
        blur: Interval::fixed(0.0),
        opacity: Interval::fixed(1.0),
        color: ColorConfig::solid(red()),
    };
    let params = effect.sample(&mut page_rng(0, 0)).unwrap();
    assert_eq!(
        params,
        StyleParams::Shadow {
            offset: (4, 0),
            blur: 0.0,
            color: red(),
        }
    );
    effect.apply(&params, &mut layers).unwrap();
    assert_eq!(layers[0].bbox(), Rect::new(20.0, 30.0, 34.0, 36.0));
    let r = layers[0].raster().unwrap();
    assert_eq!(r.pixel(12, 3), [255, 0, 0, 255]);
    assert_eq!(r.pixel(2, 3), [0, 0, 0, 255]);
}

#[test]
fn blurred_shadow_pads_for_kernel() {
    let mut layers = vec![glyph_layer()];
    let params = StyleParams::Shadow {
        offset: (0, 0),
        blur: 1.0,
        color: red(),
    };
    StyleEffect::Shadow {
        distance: Interval::fixed(0.0),
        angle: Interval::fixed(0.0),
        blur: Interval::fixed(1.0),
        opacity: Interval::fixed(1.0),
        color: ColorConfig::solid(red()),
    }
    .apply(&params, &mut layers)
    .unwrap();
    assert_eq!(layers[0].bbox(), Rect::new(17.0, 27.0, 33.0, 39.0));
}

#[test]
fn extrusion_trails_in_direction() {
    let mut layers = vec![glyph_layer()];
    let params = StyleParams::Extrusion {
        direction: Vec2::new(0.0, 1.0),
        length: 3,
        color: red(),
    };
    StyleEffect::Extrusion {
        length: Interval::fixed(3.0),
        angle: Interval::fixed(90.0),
        color: ColorConfig::solid(red()),
    }
    .apply(&params, &mut layers)
    .unwrap();
    assert_eq!(layers[0].bbox(), Rect::new(20.0, 30.0, 30.0, 39.0));
    let r = layers[0].raster().unwrap();
    assert_eq!(r.pixel(3, 8), [255, 0, 0, 255]);
    assert_eq!(r.pixel(3, 2), [0, 0, 0, 255]);
}

#[test]
fn geometry_only_layers_are_skipped() {
    let mut layers = vec![glyph_layer().into_geometry()];
    let before = layers[0].bbox();
    StyleEffect::Border {
        size: Interval::fixed(2.0),
        color: ColorConfig::default(),
    }
    .apply(
        &StyleParams::Border {
            size: 2,
            color: Rgba8::BLACK,
        },
        &mut layers,
    )
    .unwrap();
    assert_eq!(layers[0].bbox(), before);
}

#[test]
fn config_json_uses_kind_tag() {
    let effect: StyleEffect =
        serde_json::from_str(r#"{"kind": "border", "size": [1, 3]}"#).unwrap();
    assert_eq!(
        effect,
        StyleEffect::Border {
            size: Interval::new(1.0, 3.0),
            color: ColorConfig::default(),
        }
    );
    let bad = StyleEffect::Shadow {
        distance: Interval::fixed(1.0),
        angle: Interval::fixed(0.0),
        blur: Interval::fixed(1.0),
        opacity: Interval::new(0.0, 2.0),
        color: ColorConfig::default(),
    };
    assert!(bad.validate().is_err());
}
