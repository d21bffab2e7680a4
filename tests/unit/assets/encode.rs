use image::{Rgba, RgbaImage};

use super::*;
use crate::assets::decode::decode_bytes;

fn sample() -> RgbaImage {
    RgbaImage::from_fn(6, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 90, 255]))
}

#[test]
fn png_output_decodes_back_identically() {
    let img = sample();
    let bytes = encode(&img, &ContainerFormat::Png).unwrap().unwrap();
    let (decoded, format) = decode_bytes(&bytes).unwrap();
    assert_eq!(format, ContainerFormat::Png);
    assert_eq!(decoded, img);
}

#[test]
fn jpeg_and_gif_keep_their_container() {
    for format in [ContainerFormat::Jpeg, ContainerFormat::Gif] {
        let bytes = encode(&sample(), &format).unwrap().unwrap();
        let (decoded, sniffed) = decode_bytes(&bytes).unwrap();
        assert_eq!(sniffed, format);
        assert_eq!(decoded.dimensions(), (6, 4));
    }
}

#[test]
fn unsupported_container_writes_nothing() {
    let out = encode(&sample(), &ContainerFormat::Other("webp".to_owned())).unwrap();
    assert!(out.is_none());
}

#[test]
fn empty_image_is_an_encode_error() {
    let err = encode(&RgbaImage::new(0, 3), &ContainerFormat::Png).unwrap_err();
    assert!(matches!(err, ImgshError::Encode(_)));
    assert!(err.is_recoverable());
}
