use image::RgbaImage;
use rayon::prelude::*;

pub const EDGE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];
pub const EMBOSS_KERNEL: [f32; 9] = [-1.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 1.0];

const SOBEL_X: [f32; 9] = [-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0];
const SOBEL_Y: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];

/// Row-major 3x3 kernel over the color channels with clamped edges.
/// Results are clamped to `0..=255`; alpha passes through.
pub fn convolve3x3(src: &RgbaImage, dst: &mut RgbaImage, kernel: &[f32; 9]) {
    per_pixel(src, dst, |window| {
        let mut out = [0f32; 3];
        for (i, &kw) in kernel.iter().enumerate() {
            for (c, o) in out.iter_mut().enumerate() {
                *o += kw * window[i][c];
            }
        }
        out
    });
}

/// Gradient magnitude per color channel.
pub fn sobel(src: &RgbaImage, dst: &mut RgbaImage) {
    per_pixel(src, dst, |window| {
        let mut out = [0f32; 3];
        for (c, o) in out.iter_mut().enumerate() {
            let (mut gx, mut gy) = (0f32, 0f32);
            for i in 0..9 {
                gx += SOBEL_X[i] * window[i][c];
                gy += SOBEL_Y[i] * window[i][c];
            }
            *o = (gx * gx + gy * gy).sqrt();
        }
        out
    });
}

/// Feed each pixel's clamped 3x3 neighbourhood (as 0..=255 floats) to `f`.
fn per_pixel<F>(src: &RgbaImage, dst: &mut RgbaImage, f: F)
where
    F: Fn(&[[f32; 3]; 9]) -> [f32; 3] + Sync,
{
    let (w, h) = src.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let (wi, hi) = (i64::from(w), i64::from(h));
    dst.par_chunks_mut(w as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            for x in 0..wi {
                let mut window = [[0f32; 3]; 9];
                for (i, slot) in window.iter_mut().enumerate() {
                    let sx = (x + (i % 3) as i64 - 1).clamp(0, wi - 1) as u32;
                    let sy = (y + (i / 3) as i64 - 1).clamp(0, hi - 1) as u32;
                    let px = src.get_pixel(sx, sy);
                    *slot = [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])];
                }
                let out = f(&window);
                let o = x as usize * 4;
                for c in 0..3 {
                    row[o + c] = out[c].round().clamp(0.0, 255.0) as u8;
                }
                row[o + 3] = src.get_pixel(x as u32, y as u32)[3];
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/filter/convolve.rs"]
mod tests;
