use image::{GenericImageView, Rgba, RgbaImage, imageops};
use kurbo::{Affine, Rect};
use rayon::prelude::*;

use crate::foundation::{
    core::{Bounds, PixelRect},
    error::{ImgshError, ImgshResult},
};

const BACKGROUND: [u8; 4] = [255, 255, 255, 255];

fn image_err(e: image::ImageError) -> ImgshError {
    ImgshError::render(e.to_string())
}

fn copy_region(src: &RgbaImage, dst: &mut RgbaImage, rect: Option<PixelRect>) {
    let Some(r) = rect else {
        return;
    };
    let b = r.bounds();
    let view = imageops::crop_imm(src, r.x0 as u32, r.y0 as u32, b.width, b.height);
    for (x, y, px) in view.pixels() {
        dst.put_pixel(x, y, px);
    }
}

/// Rectangle spanned by `(x1, y1)` and `(x2, y2)`, clipped to the image.
pub fn crop_rect(src: Bounds, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<PixelRect> {
    PixelRect::from_corners(x1.into(), y1.into(), x2.into(), y2.into())
        .intersect(PixelRect::of_bounds(src))
}

/// Centred `min(w, W)` by `min(h, H)` region; `None` for non-positive sizes.
pub fn crop_to_size_rect(src: Bounds, width: i32, height: i32) -> Option<PixelRect> {
    if width <= 0 || height <= 0 || src.is_empty() {
        return None;
    }
    let (sw, sh) = (i64::from(src.width), i64::from(src.height));
    let cw = i64::from(width).min(sw);
    let ch = i64::from(height).min(sh);
    let x0 = (sw - cw) / 2;
    let y0 = (sh - ch) / 2;
    Some(PixelRect {
        x0,
        y0,
        x1: x0 + cw,
        y1: y0 + ch,
    })
}

pub fn crop(src: &RgbaImage, dst: &mut RgbaImage, rect: Option<PixelRect>) {
    copy_region(src, dst, rect);
}

pub fn flip_horizontal(src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
    imageops::flip_horizontal_in(src, dst).map_err(image_err)
}

pub fn flip_vertical(src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
    imageops::flip_vertical_in(src, dst).map_err(image_err)
}

/// Counter-clockwise quarter turn.
pub fn rotate90(src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
    // imageops turns clockwise.
    imageops::rotate270_in(src, dst).map_err(image_err)
}

pub fn rotate180(src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
    imageops::rotate180_in(src, dst).map_err(image_err)
}

/// Counter-clockwise three-quarter turn.
pub fn rotate270(src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
    imageops::rotate90_in(src, dst).map_err(image_err)
}

/// Mirror across the main diagonal.
pub fn transpose(src: &RgbaImage, dst: &mut RgbaImage) {
    remap(src, dst, |x, y, _, _| (y, x));
}

/// Mirror across the anti-diagonal.
pub fn transverse(src: &RgbaImage, dst: &mut RgbaImage) {
    remap(src, dst, |x, y, w, h| (w - 1 - y, h - 1 - x));
}

/// `dst(x, y) = src(f(x, y, W, H))` for whole-pixel permutations.
fn remap<F>(src: &RgbaImage, dst: &mut RgbaImage, f: F)
where
    F: Fn(u32, u32, u32, u32) -> (u32, u32) + Sync,
{
    let (sw, sh) = src.dimensions();
    let dw = dst.width();
    if dw == 0 {
        return;
    }
    dst.par_chunks_mut(dw as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..dw {
                let (sx, sy) = f(x, y as u32, sw, sh);
                let o = x as usize * 4;
                row[o..o + 4].copy_from_slice(&src.get_pixel(sx, sy).0);
            }
        });
}

/// Number of counter-clockwise quarter turns when `degrees` is a multiple of 90.
pub(crate) fn quarter_turns(degrees: f32) -> Option<u8> {
    let r = degrees.rem_euclid(360.0);
    (0..=4u8)
        .find(|&k| (r - f32::from(k) * 90.0).abs() < 1e-4)
        .map(|k| k % 4)
}

/// Size of the image after an arbitrary rotation, measured on pixel centres.
pub fn rotated_bounds(src: Bounds, degrees: f32) -> Bounds {
    if src.is_empty() {
        return Bounds::EMPTY;
    }
    let xoff = f64::from(src.width) / 2.0 - 0.5;
    let yoff = f64::from(src.height) / 2.0 - 0.5;
    let bbox = Affine::rotate(f64::from(degrees).to_radians())
        .transform_rect_bbox(Rect::new(-xoff, -yoff, xoff, yoff));
    let side = |v: f64| {
        let n = v + 1.0;
        // Keep a partly covered column instead of dropping it.
        if n - n.floor() > 0.1 { n.floor() + 1.0 } else { n.floor() }
    };
    Bounds::from_signed(side(bbox.width()) as i64, side(bbox.height()) as i64)
}

/// Counter-clockwise rotation about the centre with bilinear sampling.
/// Uncovered area is filled with white.
pub fn rotate(src: &RgbaImage, dst: &mut RgbaImage, degrees: f32) {
    let (sw, sh) = src.dimensions();
    let (dw, dh) = dst.dimensions();
    if dw == 0 || dh == 0 {
        return;
    }
    let (sin, cos) = f64::from(degrees).to_radians().sin_cos();
    let scx = f64::from(sw) / 2.0 - 0.5;
    let scy = f64::from(sh) / 2.0 - 0.5;
    let dcx = f64::from(dw) / 2.0 - 0.5;
    let dcy = f64::from(dh) / 2.0 - 0.5;

    dst.par_chunks_mut(dw as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let dy = y as f64 - dcy;
            for x in 0..dw {
                let dx = f64::from(x) - dcx;
                let sx = cos * dx - sin * dy + scx;
                let sy = sin * dx + cos * dy + scy;
                let o = x as usize * 4;
                row[o..o + 4].copy_from_slice(&bilinear(src, sx, sy));
            }
        });
}

fn bilinear(src: &RgbaImage, sx: f64, sy: f64) -> [u8; 4] {
    let (w, h) = (i64::from(src.width()), i64::from(src.height()));
    let (x0, y0) = (sx.floor(), sy.floor());
    let (fx, fy) = (sx - x0, sy - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);
    let sample = |x: i64, y: i64| -> [f64; 4] {
        let px = if x < 0 || y < 0 || x >= w || y >= h {
            BACKGROUND
        } else {
            src.get_pixel(x as u32, y as u32).0
        };
        px.map(f64::from)
    };
    let taps = [
        (sample(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (sample(x0 + 1, y0), fx * (1.0 - fy)),
        (sample(x0, y0 + 1), (1.0 - fx) * fy),
        (sample(x0 + 1, y0 + 1), fx * fy),
    ];
    let mut out = [0u8; 4];
    for (c, o) in out.iter_mut().enumerate() {
        let v: f64 = taps.iter().map(|(px, wgt)| px[c] * wgt).sum();
        *o = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Target size for `resize`; a zero side follows the source aspect ratio.
pub fn resize_bounds(src: Bounds, width: i32, height: i32) -> Bounds {
    if width < 0 || height < 0 || (width == 0 && height == 0) || src.is_empty() {
        return Bounds::EMPTY;
    }
    let (sw, sh) = (f64::from(src.width), f64::from(src.height));
    let (w, h) = match (width, height) {
        (0, h) => ((sw * f64::from(h) / sh + 0.5) as i64, i64::from(h)),
        (w, 0) => (i64::from(w), (sh * f64::from(w) / sw + 0.5) as i64),
        (w, h) => (i64::from(w), i64::from(h)),
    };
    let b = Bounds::from_signed(w, h);
    if b.is_empty() { Bounds::EMPTY } else { b }
}

/// Target size for `resizefit`; never larger than the source.
pub fn resize_fit_bounds(src: Bounds, width: i32, height: i32) -> Bounds {
    if width <= 0 || height <= 0 || src.is_empty() {
        return Bounds::EMPTY;
    }
    let (w, h) = (i64::from(width), i64::from(height));
    if i64::from(src.width) <= w && i64::from(src.height) <= h {
        return src;
    }
    let src_aspect = f64::from(src.width) / f64::from(src.height);
    let dst_aspect = w as f64 / h as f64;
    let b = if src_aspect > dst_aspect {
        Bounds::from_signed(w, (w as f64 / src_aspect + 0.5) as i64)
    } else {
        Bounds::from_signed((h as f64 * src_aspect + 0.5) as i64, h)
    };
    if b.is_empty() { Bounds::EMPTY } else { b }
}

/// Target size for `resizefill`: exactly the requested size.
pub fn resize_fill_bounds(src: Bounds, width: i32, height: i32) -> Bounds {
    if width <= 0 || height <= 0 || src.is_empty() {
        return Bounds::EMPTY;
    }
    Bounds::from_signed(width.into(), height.into())
}

/// Lanczos3 resample of the whole image into `dst`'s size.
pub fn resize(src: &RgbaImage, dst: &mut RgbaImage) {
    let (w, h) = dst.dimensions();
    if w == 0 || h == 0 || src.width() == 0 || src.height() == 0 {
        return;
    }
    if src.dimensions() == (w, h) {
        dst.copy_from_slice(src);
        return;
    }
    let out = imageops::resize(src, w, h, imageops::FilterType::Lanczos3);
    dst.copy_from_slice(&out);
}

/// Scale to cover `dst`'s size, then keep the centre.
pub fn resize_fill(src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
    let (w, h) = dst.dimensions();
    let (sw, sh) = src.dimensions();
    if w == 0 || h == 0 || sw == 0 || sh == 0 {
        return Ok(());
    }
    let src_aspect = f64::from(sw) / f64::from(sh);
    let dst_aspect = f64::from(w) / f64::from(h);
    let cover = if src_aspect < dst_aspect {
        Bounds::new(w, ((f64::from(w) / src_aspect + 0.5) as u32).max(h))
    } else {
        Bounds::new(((f64::from(h) * src_aspect + 0.5) as u32).max(w), h)
    };
    if !cover.is_allocatable() {
        return Err(ImgshError::render(format!("resizefill: cover {cover} is too large")));
    }
    let mut scaled = RgbaImage::new(cover.width, cover.height);
    resize(src, &mut scaled);
    let rect = crop_to_size_rect(cover, w as i32, h as i32);
    copy_region(&scaled, dst, rect);
    Ok(())
}

/// Replace each `size`x`size` block with its average; `size <= 1` copies.
pub fn pixelate(src: &RgbaImage, dst: &mut RgbaImage, size: i32) {
    if size <= 1 {
        dst.copy_from_slice(src);
        return;
    }
    let (w, h) = src.dimensions();
    let size = size as u32;
    for by in (0..h).step_by(size as usize) {
        for bx in (0..w).step_by(size as usize) {
            let (bw, bh) = (size.min(w - bx), size.min(h - by));
            let mut acc = [0u64; 4];
            for y in by..by + bh {
                for x in bx..bx + bw {
                    let px = src.get_pixel(x, y);
                    for c in 0..4 {
                        acc[c] += u64::from(px[c]);
                    }
                }
            }
            let n = u64::from(bw) * u64::from(bh);
            let avg = Rgba(acc.map(|v| ((v + n / 2) / n) as u8));
            for y in by..by + bh {
                for x in bx..bx + bw {
                    dst.put_pixel(x, y, avg);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/geometry.rs"]
mod tests;
