use image::RgbaImage;
use rayon::prelude::*;

use crate::pipeline::operation::LocalStat;

/// Effective kernel diameter: even sizes shrink to the odd size below.
pub(crate) fn effective_size(size: i32) -> i32 {
    if size % 2 == 0 { size - 1 } else { size }
}

/// Offsets inside the disk inscribed in a `size`x`size` square, limited to
/// those that can land inside a `w`x`h` image.
fn disk_offsets(size: i32, w: u32, h: u32) -> Vec<(i64, i64)> {
    let r = i64::from(size / 2);
    let rx = r.min(i64::from(w) - 1);
    let ry = r.min(i64::from(h) - 1);
    let mut offsets = Vec::new();
    for dy in -ry..=ry {
        for dx in -rx..=rx {
            if dx * dx + dy * dy <= r * r {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Replace every channel with a statistic over the neighbourhood.
/// Neighbours outside the image are skipped; sizes below 3 copy the source.
pub fn local_filter(src: &RgbaImage, dst: &mut RgbaImage, stat: LocalStat, size: i32) {
    let size = effective_size(size);
    let (w, h) = src.dimensions();
    if size < 3 || w == 0 || h == 0 {
        dst.copy_from_slice(src);
        return;
    }
    let offsets = disk_offsets(size, w, h);
    let (wi, hi) = (i64::from(w), i64::from(h));

    dst.par_chunks_mut(w as usize * 4)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i64;
            let mut samples: [Vec<u8>; 4] = Default::default();
            for x in 0..wi {
                for s in samples.iter_mut() {
                    s.clear();
                }
                for &(dx, dy) in &offsets {
                    let (sx, sy) = (x + dx, y + dy);
                    if sx < 0 || sy < 0 || sx >= wi || sy >= hi {
                        continue;
                    }
                    let px = src.get_pixel(sx as u32, sy as u32);
                    for c in 0..4 {
                        samples[c].push(px[c]);
                    }
                }
                let o = x as usize * 4;
                for c in 0..4 {
                    row[o + c] = reduce(&mut samples[c], stat);
                }
            }
        });
}

fn reduce(values: &mut [u8], stat: LocalStat) -> u8 {
    match stat {
        LocalStat::Minimum => values.iter().copied().min().unwrap_or(0),
        LocalStat::Maximum => values.iter().copied().max().unwrap_or(0),
        LocalStat::Mean => {
            if values.is_empty() {
                return 0;
            }
            let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
            let n = values.len() as u32;
            ((sum + n / 2) / n) as u8
        }
        LocalStat::Median => {
            if values.is_empty() {
                return 0;
            }
            values.sort_unstable();
            values[values.len() / 2]
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/local.rs"]
mod tests;
