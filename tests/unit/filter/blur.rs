use image::{Rgba, RgbaImage};

use super::*;

#[test]
fn non_positive_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8(&src, Bounds::new(1, 2), 0.0).unwrap();
    assert_eq!(out, src);
    let out = blur_rgba8(&src, Bounds::new(1, 2), -3.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn constant_image_is_unchanged() {
    let img = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 40]));
    let mut dst = RgbaImage::new(4, 3);
    gaussian_blur(&img, &mut dst, 2.0).unwrap();
    assert_eq!(dst, img);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut src = RgbaImage::new(7, 7);
    src.put_pixel(3, 3, Rgba([255, 255, 255, 255]));

    let mut out = RgbaImage::new(7, 7);
    gaussian_blur(&src, &mut out, 0.8).unwrap();

    let nonzero = out.pixels().filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.pixels().map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8, "{sum_a}");
}

#[test]
fn mismatched_buffer_is_rejected() {
    let err = blur_rgba8(&[0u8; 7], Bounds::new(1, 2), 1.0).unwrap_err();
    assert!(err.to_string().contains("render error"));
}

#[test]
fn kernel_is_normalized_to_q16() {
    let k = gaussian_kernel_q16(6, 2.0).unwrap();
    assert_eq!(k.len(), 13);
    assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 65536);
}

#[test]
fn unsharp_with_huge_threshold_is_identity() {
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([50, 50, 50, 255]));
    src.put_pixel(2, 2, Rgba([200, 200, 200, 255]));
    let mut dst = RgbaImage::new(5, 5);
    unsharp_mask(&src, &mut dst, 1.0, 1.0, 2.0).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn unsharp_boosts_local_contrast() {
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([100, 100, 100, 255]));
    src.put_pixel(2, 2, Rgba([160, 160, 160, 255]));
    let mut dst = RgbaImage::new(5, 5);
    unsharp_mask(&src, &mut dst, 1.0, 1.0, 0.0).unwrap();
    assert!(dst.get_pixel(2, 2)[0] > 160);
    assert!(dst.get_pixel(1, 2)[0] < 100);
}
