use image::{Rgba, RgbaImage};

use super::*;

fn solid(px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(3, 2, Rgba(px))
}

fn apply(src: &RgbaImage, f: impl Fn(&RgbaImage, &mut RgbaImage)) -> RgbaImage {
    let mut dst = RgbaImage::new(src.width(), src.height());
    f(src, &mut dst);
    dst
}

fn first(img: &RgbaImage) -> [u8; 4] {
    img.get_pixel(0, 0).0
}

#[test]
fn brightness_shifts_and_clamps() {
    let src = solid([100, 200, 250, 77]);
    let out = apply(&src, |s, d| brightness(s, d, 20.0));
    assert_eq!(first(&out), [151, 251, 255, 77]);
    let out = apply(&src, |s, d| brightness(s, d, -100.0));
    assert_eq!(first(&out), [0, 0, 0, 77]);
}

#[test]
fn invert_keeps_alpha() {
    let out = apply(&solid([0, 100, 255, 10]), |s, d| invert(s, d));
    assert_eq!(first(&out), [255, 155, 0, 10]);
}

#[test]
fn grayscale_equalizes_channels() {
    let [r, g, b, a] = first(&apply(&solid([200, 40, 90, 255]), |s, d| grayscale(s, d)));
    assert_eq!(r, g);
    assert_eq!(g, b);
    assert_eq!(a, 255);
}

#[test]
fn zero_contrast_is_identity_and_full_contrast_binarizes() {
    let src = solid([30, 128, 220, 255]);
    assert_eq!(apply(&src, |s, d| contrast(s, d, 0.0)), src);
    assert_eq!(
        first(&apply(&src, |s, d| contrast(s, d, 100.0))),
        [0, 255, 255, 255]
    );
    assert_eq!(
        first(&apply(&src, |s, d| contrast(s, d, -100.0))),
        [128, 128, 128, 255]
    );
}

#[test]
fn threshold_splits_on_luminance() {
    let dark = first(&apply(&solid([20, 20, 20, 200]), |s, d| threshold(s, d, 50.0)));
    let light = first(&apply(&solid([230, 230, 230, 200]), |s, d| threshold(s, d, 50.0)));
    assert_eq!(dark, [0, 0, 0, 200]);
    assert_eq!(light, [255, 255, 255, 200]);
}

#[test]
fn opacity_sets_alpha() {
    let out = apply(&solid([1, 2, 3, 255]), |s, d| opacity(s, d, 50.0));
    assert_eq!(first(&out), [1, 2, 3, 128]);
}

#[test]
fn gamma_one_is_identity() {
    let src = solid([13, 99, 201, 255]);
    assert_eq!(apply(&src, |s, d| gamma(s, d, 1.0)), src);
    let lighter = first(&apply(&src, |s, d| gamma(s, d, 2.0)));
    assert!(lighter[0] > 13);
}

#[test]
fn sepia_zero_is_identity() {
    let src = solid([13, 99, 201, 255]);
    assert_eq!(apply(&src, |s, d| sepia(s, d, 0.0)), src);
}

#[test]
fn colorspace_round_trip_is_close() {
    let src = solid([40, 128, 250, 255]);
    let lin = apply(&src, |s, d| colorspace(s, d, ColorspaceConversion::SrgbToLinear));
    let back = apply(&lin, |s, d| colorspace(s, d, ColorspaceConversion::LinearToSrgb));
    let (a, b) = (first(&src), first(&back));
    for c in 0..3 {
        assert!((i16::from(a[c]) - i16::from(b[c])).abs() <= 2, "{a:?} vs {b:?}");
    }
}

#[test]
fn sigmoid_zero_factor_is_identity() {
    let src = solid([13, 99, 201, 255]);
    assert_eq!(apply(&src, |s, d| sigmoid(s, d, 0.5, 0.0)), src);
    let out = first(&apply(&src, |s, d| sigmoid(s, d, 0.5, 8.0)));
    assert!(out[0] < 13 && out[2] > 201);
}

#[test]
fn hue_half_turn_swaps_complementary_colors() {
    let out = first(&apply(&solid([255, 0, 0, 255]), |s, d| hue(s, d, 180.0)));
    assert_eq!(out, [0, 255, 255, 255]);
}

#[test]
fn saturation_minus_hundred_desaturates() {
    let [r, g, b, _] = first(&apply(&solid([200, 40, 90, 255]), |s, d| {
        saturation(s, d, -100.0)
    }));
    assert_eq!(r, g);
    assert_eq!(g, b);
}

#[test]
fn colorize_full_strength_takes_target_hue() {
    let out = first(&apply(&solid([128, 128, 128, 255]), |s, d| {
        colorize(s, d, 240.0, 100.0, 100.0)
    }));
    assert!(out[2] > out[0] && out[2] > out[1], "{out:?}");
}

#[test]
fn color_balance_scales_channels() {
    let out = first(&apply(&solid([100, 100, 100, 255]), |s, d| {
        color_balance(s, d, 100.0, 0.0, -100.0)
    }));
    assert_eq!(out, [200, 100, 0, 255]);
}

#[test]
fn hsl_round_trip() {
    for &(r, g, b) in &[(0.2f32, 0.4f32, 0.6f32), (0.9, 0.1, 0.1), (0.5, 0.5, 0.5)] {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (r2, g2, b2) = hsl_to_rgb(h, s, l);
        assert!((r - r2).abs() < 1e-4 && (g - g2).abs() < 1e-4 && (b - b2).abs() < 1e-4);
    }
}

#[test]
fn empty_images_are_left_alone() {
    let src = RgbaImage::new(0, 0);
    let out = apply(&src, |s, d| brightness(s, d, 50.0));
    assert_eq!(out.dimensions(), (0, 0));
}
