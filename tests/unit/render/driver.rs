use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use super::*;
use crate::{
    assets::decode::{ContainerFormat, decode_bytes},
    filter::engine::CpuFilterEngine,
    pipeline::operation::Operation,
};

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 12) as u8, (y * 12) as u8, 128, 255]))
}

fn binding(img: RgbaImage) -> SourceBinding {
    SourceBinding {
        image: img,
        format: ContainerFormat::Png,
        path: PathBuf::from("in.png"),
    }
}

#[test]
fn blur_rotate_crop_ends_at_ten_by_ten() {
    let ops: Pipeline = [
        Operation::Blur { sigma: 2.0 },
        Operation::Rotate90,
        Operation::Crop {
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 10,
        },
    ]
    .into_iter()
    .collect();
    let engine = CpuFilterEngine::new();
    let src = gradient(20, 20);

    assert_eq!(output_bounds(&engine, Bounds::of(&src), &ops), Bounds::new(10, 10));
    let out = render_image(&engine, &src, &ops).unwrap();
    assert_eq!(out.dimensions(), (10, 10));
}

#[test]
fn empty_pipeline_encodes_the_source() {
    let engine = CpuFilterEngine::new();
    let src = gradient(5, 3);
    let bytes = render(&engine, &binding(src.clone()), &Pipeline::new())
        .unwrap()
        .unwrap();
    let (decoded, _) = decode_bytes(&bytes).unwrap();
    assert_eq!(decoded, src);
}

#[test]
fn rendering_is_deterministic_and_leaves_source_alone() {
    let engine = CpuFilterEngine::new();
    let b = binding(gradient(9, 7));
    let ops: Pipeline = [
        Operation::Sepia { percent: 60.0 },
        Operation::Rotate { degrees: 30.0 },
        Operation::Blur { sigma: 1.5 },
    ]
    .into_iter()
    .collect();

    let first = render(&engine, &b, &ops).unwrap();
    let second = render(&engine, &b, &ops).unwrap();
    assert_eq!(first, second);
    assert_eq!(b.image, gradient(9, 7));
}

#[test]
fn empty_result_fails_to_encode() {
    let engine = CpuFilterEngine::new();
    let ops: Pipeline = std::iter::once(Operation::Resize {
        width: 0,
        height: 0,
    })
    .collect();
    let err = render(&engine, &binding(gradient(4, 4)), &ops).unwrap_err();
    assert!(err.is_recoverable());
}

#[test]
fn unsupported_container_yields_no_bytes() {
    let engine = CpuFilterEngine::new();
    let mut b = binding(gradient(4, 4));
    b.format = ContainerFormat::Other("webp".to_owned());
    assert!(render(&engine, &b, &Pipeline::new()).unwrap().is_none());
}

#[test]
fn oversized_step_is_a_render_error() {
    let ops: Pipeline = std::iter::once(Operation::Resize {
        width: 100_000,
        height: 100_000,
    })
    .collect();
    let err = render_image(&CpuFilterEngine::new(), &gradient(2, 2), &ops).unwrap_err();
    assert!(err.is_recoverable());
    assert!(err.to_string().contains("step 0 (resize 100000 100000)"));
}
