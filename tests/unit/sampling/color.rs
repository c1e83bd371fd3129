use super::*;
use crate::foundation::random::page_rng;

#[test]
fn solid_config_always_yields_its_color() {
    let c = Rgba8::new(10, 20, 30, 200);
    let sampler = ColorSampler::new(ColorConfig::solid(c), "color").unwrap();
    let mut rng = page_rng(0, 0);
    for _ in 0..5 {
        assert_eq!(sampler.sample(&mut rng).unwrap(), c);
    }
}

#[test]
fn grayscale_copies_red_channel() {
    let config = ColorConfig {
        rgb: [Interval::new(0.0, 255.0); 3],
        alpha: Interval::fixed(255.0),
        grayscale_prob: 1.0,
    };
    let sampler = ColorSampler::new(config, "color").unwrap();
    let mut rng = page_rng(5, 5);
    for _ in 0..20 {
        let c = sampler.sample(&mut rng).unwrap();
        assert_eq!((c.r, c.r), (c.g, c.b));
        assert_eq!(c.a, 255);
    }
}

#[test]
fn out_of_range_channels_are_rejected() {
    let mut config = ColorConfig::default();
    config.rgb[1] = Interval::new(0.0, 256.0);
    assert!(ColorSampler::new(config, "paper").is_err());
}
