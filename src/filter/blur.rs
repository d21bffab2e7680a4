use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::{
    core::Bounds,
    error::{ImgshError, ImgshResult},
};

/// Separable Gaussian blur with clamped edges; `sigma <= 0` is the identity.
pub fn gaussian_blur(src: &RgbaImage, dst: &mut RgbaImage, sigma: f32) -> ImgshResult<()> {
    let out = blur_rgba8(src, Bounds::of(src), sigma)?;
    dst.copy_from_slice(&out);
    Ok(())
}

/// Sharpen by adding back `amount` times the difference to a blurred copy,
/// wherever that difference reaches `threshold` (unit scale).
pub fn unsharp_mask(
    src: &RgbaImage,
    dst: &mut RgbaImage,
    sigma: f32,
    amount: f32,
    threshold: f32,
) -> ImgshResult<()> {
    let blurred = blur_rgba8(src, Bounds::of(src), sigma)?;
    let threshold = threshold.max(0.0) * 255.0;
    for ((d, s), b) in dst
        .chunks_exact_mut(4)
        .zip(src.chunks_exact(4))
        .zip(blurred.chunks_exact(4))
    {
        for c in 0..3 {
            let orig = f32::from(s[c]);
            let diff = orig - f32::from(b[c]);
            d[c] = if diff.abs() >= threshold {
                (orig + diff * amount).round().clamp(0.0, 255.0) as u8
            } else {
                s[c]
            };
        }
        d[3] = s[3];
    }
    Ok(())
}

pub(crate) fn blur_rgba8(src: &[u8], bounds: Bounds, sigma: f32) -> ImgshResult<Vec<u8>> {
    let expected_len = bounds
        .rgba_len()
        .ok_or_else(|| ImgshError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ImgshError::render(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if !sigma.is_finite() || sigma <= 0.0 || bounds.is_empty() {
        return Ok(src.to_vec());
    }

    let radius = (sigma * 3.0).ceil().min(512.0) as u32;
    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, bounds, &kernel);
    vertical_pass(&tmp, &mut out, bounds, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ImgshResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ImgshError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], bounds: Bounds, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(bounds.width);
    let row_len = bounds.width as usize * 4;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(drow, srow)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i64 - radius).clamp(0, w - 1);
                    let idx = sx as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(srow[idx + c]);
                    }
                }
                let out_idx = x as usize * 4;
                for c in 0..4 {
                    drow[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], bounds: Bounds, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = bounds.width as usize;
    let h = i64::from(bounds.height);
    dst.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, drow)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i64 + ki as i64 - radius).clamp(0, h - 1) as usize;
                    let idx = (sy * w + x) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    drow[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/filter/blur.rs"]
mod tests;
