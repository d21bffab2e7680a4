use image::{Rgba, RgbaImage};

use super::*;

fn speck() -> RgbaImage {
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([10, 10, 10, 255]));
    src.put_pixel(2, 2, Rgba([250, 250, 250, 255]));
    src
}

fn run(src: &RgbaImage, stat: LocalStat, size: i32) -> RgbaImage {
    let mut dst = RgbaImage::new(src.width(), src.height());
    local_filter(src, &mut dst, stat, size);
    dst
}

#[test]
fn even_sizes_round_down_to_odd() {
    assert_eq!(effective_size(4), 3);
    assert_eq!(effective_size(5), 5);
    assert_eq!(effective_size(2), 1);
}

#[test]
fn median_removes_isolated_speck() {
    let out = run(&speck(), LocalStat::Median, 3);
    assert!(out.pixels().all(|p| p[0] == 10));
}

#[test]
fn minimum_erodes_and_maximum_dilates() {
    let min = run(&speck(), LocalStat::Minimum, 3);
    assert_eq!(min.get_pixel(2, 2)[0], 10);

    let max = run(&speck(), LocalStat::Maximum, 3);
    assert_eq!(max.get_pixel(2, 1)[0], 250);
    assert_eq!(max.get_pixel(1, 2)[0], 250);
    // Disk kernel: diagonal neighbours are outside radius 1.
    assert_eq!(max.get_pixel(1, 1)[0], 10);
}

#[test]
fn mean_averages_the_disk() {
    let out = run(&speck(), LocalStat::Mean, 3);
    // Centre plus four neighbours: (250 + 4 * 10) / 5 = 58.
    assert_eq!(out.get_pixel(2, 2)[0], 58);
}

#[test]
fn size_one_is_identity() {
    let src = speck();
    assert_eq!(run(&src, LocalStat::Maximum, 1), src);
    assert_eq!(run(&src, LocalStat::Maximum, 2), src);
}

#[test]
fn huge_size_reaches_the_far_corner() {
    let mut src = RgbaImage::from_pixel(5, 5, Rgba([10, 10, 10, 255]));
    src.put_pixel(0, 0, Rgba([250, 10, 10, 255]));
    let out = run(&src, LocalStat::Maximum, i32::MAX);
    assert!(out.pixels().all(|p| p[0] == 250));
    assert_eq!(disk_offsets(i32::MAX, 5, 5).len(), 81);
}
