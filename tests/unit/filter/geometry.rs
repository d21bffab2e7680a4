use image::{Rgba, RgbaImage};

use super::*;

/// 3x2 image whose red channel encodes the pixel index.
fn indexed() -> RgbaImage {
    RgbaImage::from_fn(3, 2, |x, y| Rgba([(y * 3 + x) as u8, 0, 0, 255]))
}

fn reds(img: &RgbaImage) -> Vec<u8> {
    img.pixels().map(|p| p[0]).collect()
}

#[test]
fn crop_rect_normalizes_and_clips() {
    let b = Bounds::new(20, 20);
    assert_eq!(crop_rect(b, 10, 10, 0, 0).map(PixelRect::bounds), Some(Bounds::new(10, 10)));
    assert_eq!(crop_rect(b, -5, 15, 5, 40).map(PixelRect::bounds), Some(Bounds::new(5, 5)));
    assert_eq!(crop_rect(b, 30, 30, 40, 40), None);
    assert_eq!(crop_rect(b, 3, 3, 3, 9), None);
}

#[test]
fn crop_copies_the_region() {
    let src = indexed();
    let rect = crop_rect(Bounds::of(&src), 1, 0, 3, 2);
    let mut dst = RgbaImage::new(2, 2);
    crop(&src, &mut dst, rect);
    assert_eq!(reds(&dst), vec![1, 2, 4, 5]);
}

#[test]
fn crop_to_size_keeps_the_centre() {
    let r = crop_to_size_rect(Bounds::new(10, 6), 4, 100).unwrap();
    assert_eq!((r.x0, r.y0, r.x1, r.y1), (3, 0, 7, 6));
    assert_eq!(crop_to_size_rect(Bounds::new(10, 6), 0, 3), None);
}

#[test]
fn quarter_turns_follow_counter_clockwise_orientation() {
    let src = indexed();

    let mut r90 = RgbaImage::new(2, 3);
    rotate90(&src, &mut r90).unwrap();
    // dst(x, y) = src(W-1-y, x)
    assert_eq!(reds(&r90), vec![2, 5, 1, 4, 0, 3]);

    let mut r180 = RgbaImage::new(3, 2);
    rotate180(&src, &mut r180).unwrap();
    assert_eq!(reds(&r180), vec![5, 4, 3, 2, 1, 0]);

    let mut r270 = RgbaImage::new(2, 3);
    rotate270(&src, &mut r270).unwrap();
    // dst(x, y) = src(y, H-1-x)
    assert_eq!(reds(&r270), vec![3, 0, 4, 1, 5, 2]);
}

#[test]
fn transpose_and_transverse_mirror_diagonals() {
    let src = indexed();

    let mut t = RgbaImage::new(2, 3);
    transpose(&src, &mut t);
    assert_eq!(reds(&t), vec![0, 3, 1, 4, 2, 5]);

    let mut tv = RgbaImage::new(2, 3);
    transverse(&src, &mut tv);
    assert_eq!(reds(&tv), vec![5, 2, 4, 1, 3, 0]);
}

#[test]
fn flips_mirror_rows_and_columns() {
    let src = indexed();
    let mut h = RgbaImage::new(3, 2);
    flip_horizontal(&src, &mut h).unwrap();
    assert_eq!(reds(&h), vec![2, 1, 0, 5, 4, 3]);

    let mut v = RgbaImage::new(3, 2);
    flip_vertical(&src, &mut v).unwrap();
    assert_eq!(reds(&v), vec![3, 4, 5, 0, 1, 2]);
}

#[test]
fn flip_rejects_wrong_destination() {
    let src = indexed();
    let mut dst = RgbaImage::new(2, 2);
    assert!(flip_horizontal(&src, &mut dst).is_err());
}

#[test]
fn quarter_turn_detection() {
    assert_eq!(quarter_turns(90.0), Some(1));
    assert_eq!(quarter_turns(360.0), Some(0));
    assert_eq!(quarter_turns(-90.0), Some(3));
    assert_eq!(quarter_turns(45.0), None);
}

#[test]
fn rotated_bounds_grow_for_diagonal_angles() {
    assert_eq!(rotated_bounds(Bounds::new(10, 10), 45.0), Bounds::new(14, 14));
    assert_eq!(rotated_bounds(Bounds::new(8, 4), 180.0), Bounds::new(8, 4));
    assert_eq!(rotated_bounds(Bounds::EMPTY, 30.0), Bounds::EMPTY);
}

#[test]
fn generic_rotation_fills_corners_with_white() {
    let src = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    let b = rotated_bounds(Bounds::of(&src), 45.0);
    let mut dst = RgbaImage::new(b.width, b.height);
    rotate(&src, &mut dst, 45.0);
    assert_eq!(dst.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(dst.get_pixel(7, 7).0, [0, 0, 0, 255]);
}

#[test]
fn resize_bounds_handle_zero_and_negative_sides() {
    let src = Bounds::new(40, 20);
    assert_eq!(resize_bounds(src, 20, 0), Bounds::new(20, 10));
    assert_eq!(resize_bounds(src, 0, 5), Bounds::new(10, 5));
    assert_eq!(resize_bounds(src, 0, 0), Bounds::EMPTY);
    assert_eq!(resize_bounds(src, -1, 10), Bounds::EMPTY);
    assert_eq!(resize_bounds(src, 7, 3), Bounds::new(7, 3));
}

#[test]
fn resize_fit_never_enlarges() {
    let src = Bounds::new(40, 20);
    assert_eq!(resize_fit_bounds(src, 100, 100), src);
    assert_eq!(resize_fit_bounds(src, 10, 10), Bounds::new(10, 5));
    assert_eq!(resize_fit_bounds(src, 40, 5), Bounds::new(10, 5));
    assert_eq!(resize_fit_bounds(src, 0, 5), Bounds::EMPTY);
}

#[test]
fn resize_fill_produces_requested_size() {
    let src = RgbaImage::from_pixel(40, 20, Rgba([9, 8, 7, 255]));
    let b = resize_fill_bounds(Bounds::of(&src), 10, 10);
    assert_eq!(b, Bounds::new(10, 10));
    let mut dst = RgbaImage::new(b.width, b.height);
    resize_fill(&src, &mut dst).unwrap();
    assert!(dst.pixels().all(|p| p.0 == [9, 8, 7, 255]));
}

#[test]
fn resize_of_flat_image_stays_flat() {
    let src = RgbaImage::from_pixel(8, 8, Rgba([120, 60, 30, 255]));
    let mut dst = RgbaImage::new(4, 2);
    resize(&src, &mut dst);
    assert!(dst.pixels().all(|p| p.0 == [120, 60, 30, 255]));
}

#[test]
fn pixelate_averages_blocks() {
    let src = RgbaImage::from_fn(4, 2, |x, _| Rgba([(x * 10) as u8, 0, 0, 255]));
    let mut dst = RgbaImage::new(4, 2);
    pixelate(&src, &mut dst, 2);
    assert_eq!(reds(&dst), vec![5, 5, 25, 25, 5, 5, 25, 25]);

    pixelate(&src, &mut dst, 1);
    assert_eq!(dst, src);
}

#[test]
fn resize_fill_refuses_an_oversized_cover() {
    let src = RgbaImage::from_pixel(10, 10, Rgba([1, 1, 1, 255]));
    let b = resize_fill_bounds(Bounds::of(&src), 1, 100_000);
    let mut dst = RgbaImage::new(b.width, b.height);
    let err = resize_fill(&src, &mut dst).unwrap_err();
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("too large"));
}
