//! Per-pixel color adjustments on straight-alpha RGBA8.
//!
//! Each filter maps one pixel (as unit floats) to one pixel; geometry never
//! changes. Rows are processed in parallel but every pixel is independent,
//! so output is deterministic.

use image::RgbaImage;
use rayon::prelude::*;

use crate::pipeline::operation::ColorspaceConversion;

type Px = [f32; 4];

pub(crate) fn map_pixels<F>(src: &RgbaImage, dst: &mut RgbaImage, f: F)
where
    F: Fn(Px) -> Px + Sync,
{
    let row = src.width() as usize * 4;
    if row == 0 || src.height() == 0 {
        return;
    }
    dst.par_chunks_mut(row)
        .zip(src.par_chunks(row))
        .for_each(|(d, s)| {
            for (dp, sp) in d.chunks_exact_mut(4).zip(s.chunks_exact(4)) {
                let out = f([unit(sp[0]), unit(sp[1]), unit(sp[2]), unit(sp[3])]);
                for c in 0..4 {
                    dp[c] = to_u8(out[c]);
                }
            }
        });
}

pub(crate) fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

pub(crate) fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn rgb(px: Px, f: impl Fn(f32) -> f32) -> Px {
    [f(px[0]), f(px[1]), f(px[2]), px[3]]
}

fn luminance(px: Px) -> f32 {
    0.299 * px[0] + 0.587 * px[1] + 0.114 * px[2]
}

pub fn brightness(src: &RgbaImage, dst: &mut RgbaImage, percent: f32) {
    let shift = percent.clamp(-100.0, 100.0) / 100.0;
    map_pixels(src, dst, |px| rgb(px, |c| c + shift));
}

pub fn contrast(src: &RgbaImage, dst: &mut RgbaImage, percent: f32) {
    let p = percent.clamp(-100.0, 100.0);
    if p >= 100.0 {
        map_pixels(src, dst, |px| {
            rgb(px, |c| match c.partial_cmp(&0.5) {
                Some(std::cmp::Ordering::Less) => 0.0,
                Some(std::cmp::Ordering::Greater) => 1.0,
                _ => 0.5,
            })
        });
        return;
    }
    let alpha = if p <= 0.0 {
        1.0 + p / 100.0
    } else {
        1.0 / (1.0 - p / 100.0)
    };
    map_pixels(src, dst, |px| rgb(px, |c| (c - 0.5) * alpha + 0.5));
}

pub fn gamma(src: &RgbaImage, dst: &mut RgbaImage, gamma: f32) {
    let exp = 1.0 / gamma.max(1.0e-5);
    map_pixels(src, dst, |px| rgb(px, |c| c.powf(exp)));
}

pub fn invert(src: &RgbaImage, dst: &mut RgbaImage) {
    map_pixels(src, dst, |px| rgb(px, |c| 1.0 - c));
}

pub fn grayscale(src: &RgbaImage, dst: &mut RgbaImage) {
    map_pixels(src, dst, |px| {
        let y = luminance(px);
        [y, y, y, px[3]]
    });
}

pub fn sepia(src: &RgbaImage, dst: &mut RgbaImage, percent: f32) {
    let t = percent.clamp(0.0, 100.0) / 100.0;
    map_pixels(src, dst, |[r, g, b, a]| {
        let sr = 0.393 * r + 0.769 * g + 0.189 * b;
        let sg = 0.349 * r + 0.686 * g + 0.168 * b;
        let sb = 0.272 * r + 0.534 * g + 0.131 * b;
        [r + (sr - r) * t, g + (sg - g) * t, b + (sb - b) * t, a]
    });
}

pub fn threshold(src: &RgbaImage, dst: &mut RgbaImage, percent: f32) {
    let level = percent.clamp(0.0, 100.0) / 100.0;
    map_pixels(src, dst, |px| {
        let v = if luminance(px) >= level { 1.0 } else { 0.0 };
        [v, v, v, px[3]]
    });
}

pub fn opacity(src: &RgbaImage, dst: &mut RgbaImage, percent: f32) {
    let a = percent.clamp(0.0, 100.0) / 100.0;
    map_pixels(src, dst, |[r, g, b, _]| [r, g, b, a]);
}

pub fn color_balance(src: &RgbaImage, dst: &mut RgbaImage, red: f32, green: f32, blue: f32) {
    let m = |p: f32| 1.0 + p.clamp(-100.0, 500.0) / 100.0;
    let (mr, mg, mb) = (m(red), m(green), m(blue));
    map_pixels(src, dst, |[r, g, b, a]| [r * mr, g * mg, b * mb, a]);
}

pub fn colorspace(src: &RgbaImage, dst: &mut RgbaImage, conversion: ColorspaceConversion) {
    match conversion {
        ColorspaceConversion::SrgbToLinear => map_pixels(src, dst, |px| rgb(px, srgb_to_linear)),
        ColorspaceConversion::LinearToSrgb => map_pixels(src, dst, |px| rgb(px, linear_to_srgb)),
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Sigmoidal contrast around `midpoint`; a negative factor applies the
/// inverse curve. A zero factor is the identity.
pub fn sigmoid(src: &RgbaImage, dst: &mut RgbaImage, midpoint: f32, factor: f32) {
    let mid = midpoint.clamp(0.0, 1.0);
    let a = factor.clamp(-10.0, 10.0);
    if a == 0.0 {
        dst.copy_from_slice(src);
        return;
    }
    let k = a.abs();
    let sig = |x: f32| 1.0 / (1.0 + (k * (mid - x)).exp());
    let (s0, s1) = (sig(0.0), sig(1.0));
    let lut: Vec<u8> = (0..=255u8)
        .map(|v| {
            let x = unit(v);
            let y = if a > 0.0 {
                (sig(x) - s0) / (s1 - s0)
            } else {
                let t = (s0 + x * (s1 - s0)).clamp(1.0e-6, 1.0 - 1.0e-6);
                mid - (1.0 / t - 1.0).ln() / k
            };
            to_u8(y)
        })
        .collect();
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        d[0] = lut[usize::from(s[0])];
        d[1] = lut[usize::from(s[1])];
        d[2] = lut[usize::from(s[2])];
        d[3] = s[3];
    }
}

pub fn hue(src: &RgbaImage, dst: &mut RgbaImage, shift: f32) {
    let turn = shift.clamp(-180.0, 180.0) / 360.0;
    map_pixels(src, dst, |[r, g, b, a]| {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (r, g, b) = hsl_to_rgb((h + turn).rem_euclid(1.0), s, l);
        [r, g, b, a]
    });
}

pub fn saturation(src: &RgbaImage, dst: &mut RgbaImage, percent: f32) {
    let m = 1.0 + percent.clamp(-100.0, 500.0) / 100.0;
    map_pixels(src, dst, |[r, g, b, a]| {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let (r, g, b) = hsl_to_rgb(h, (s * m).clamp(0.0, 1.0), l);
        [r, g, b, a]
    });
}

pub fn colorize(src: &RgbaImage, dst: &mut RgbaImage, hue: f32, saturation: f32, percent: f32) {
    let th = hue.clamp(0.0, 360.0) / 360.0;
    let ts = saturation.clamp(0.0, 100.0) / 100.0;
    let p = percent.clamp(0.0, 100.0) / 100.0;
    map_pixels(src, dst, |[r, g, b, a]| {
        let (h, s, l) = rgb_to_hsl(r, g, b);
        let h = h + (th - h) * p;
        let s = s + (ts - s) * p;
        let (r, g, b) = hsl_to_rgb(h, s, l);
        [r, g, b, a]
    });
}

pub(crate) fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d <= f32::EPSILON {
        return (0.0, 0.0, l);
    }
    let s = if l < 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h / 6.0, s, l)
}

pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s <= 0.0 {
        return (l, l, l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/color.rs"]
mod tests;
