use image::RgbaImage;

use crate::{
    filter::{blur, color, convolve, geometry, local},
    foundation::{
        core::{Bounds, PixelRect},
        error::{ImgshError, ImgshResult},
    },
    pipeline::operation::Operation,
};

/// Executes individual pipeline operations on RGBA8 images.
///
/// `apply` writes into a destination that the caller has already sized to
/// `bounds(op, src)`; engines must not resize it.
pub trait FilterEngine {
    fn bounds(&self, op: &Operation, src: Bounds) -> Bounds;

    fn apply(&self, op: &Operation, src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()>;
}

/// CPU engine: straight (non-premultiplied) RGBA8, rows in parallel.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuFilterEngine;

impl CpuFilterEngine {
    pub fn new() -> Self {
        Self
    }
}

impl FilterEngine for CpuFilterEngine {
    fn bounds(&self, op: &Operation, src: Bounds) -> Bounds {
        match *op {
            Operation::Crop { x1, y1, x2, y2 } => {
                rect_bounds(geometry::crop_rect(src, x1, y1, x2, y2))
            }
            Operation::CropToSize { width, height } => {
                rect_bounds(geometry::crop_to_size_rect(src, width, height))
            }
            Operation::Resize { width, height } => geometry::resize_bounds(src, width, height),
            Operation::ResizeToFill { width, height } => {
                geometry::resize_fill_bounds(src, width, height)
            }
            Operation::ResizeToFit { width, height } => {
                geometry::resize_fit_bounds(src, width, height)
            }
            Operation::Rotate90
            | Operation::Rotate270
            | Operation::Transpose
            | Operation::Transverse => src.swapped(),
            Operation::Rotate { degrees } => match geometry::quarter_turns(degrees) {
                Some(1 | 3) => src.swapped(),
                Some(_) => src,
                None => geometry::rotated_bounds(src, degrees),
            },
            _ => src,
        }
    }

    fn apply(&self, op: &Operation, src: &RgbaImage, dst: &mut RgbaImage) -> ImgshResult<()> {
        let expected = self.bounds(op, Bounds::of(src));
        if Bounds::of(dst) != expected {
            return Err(ImgshError::render(format!(
                "{}: destination is {}, expected {expected}",
                op.kind().command(),
                Bounds::of(dst)
            )));
        }
        if expected.is_empty() {
            return Ok(());
        }

        match *op {
            Operation::Blur { sigma } => blur::gaussian_blur(src, dst, sigma)?,
            Operation::Brightness { percent } => color::brightness(src, dst, percent),
            Operation::ColorBalance { red, green, blue } => {
                color::color_balance(src, dst, red, green, blue)
            }
            Operation::Colorize {
                hue,
                saturation,
                percent,
            } => color::colorize(src, dst, hue, saturation, percent),
            Operation::Colorspace { conversion } => color::colorspace(src, dst, conversion),
            Operation::Contrast { percent } => color::contrast(src, dst, percent),
            Operation::Crop { x1, y1, x2, y2 } => {
                geometry::crop(src, dst, geometry::crop_rect(Bounds::of(src), x1, y1, x2, y2))
            }
            Operation::CropToSize { width, height } => geometry::crop(
                src,
                dst,
                geometry::crop_to_size_rect(Bounds::of(src), width, height),
            ),
            Operation::Edge => convolve::convolve3x3(src, dst, &convolve::EDGE_KERNEL),
            Operation::Emboss => convolve::convolve3x3(src, dst, &convolve::EMBOSS_KERNEL),
            Operation::FlipHorizontal => geometry::flip_horizontal(src, dst)?,
            Operation::FlipVertical => geometry::flip_vertical(src, dst)?,
            Operation::Gamma { gamma } => color::gamma(src, dst, gamma),
            Operation::Grayscale => color::grayscale(src, dst),
            Operation::Hue { shift } => color::hue(src, dst, shift),
            Operation::Invert => color::invert(src, dst),
            Operation::Local { stat, size } => local::local_filter(src, dst, stat, size),
            Operation::Opacity { percent } => color::opacity(src, dst, percent),
            Operation::Pixelate { size } => geometry::pixelate(src, dst, size),
            Operation::Resize { .. } | Operation::ResizeToFit { .. } => geometry::resize(src, dst),
            Operation::ResizeToFill { .. } => geometry::resize_fill(src, dst)?,
            Operation::Rotate90 => geometry::rotate90(src, dst)?,
            Operation::Rotate180 => geometry::rotate180(src, dst)?,
            Operation::Rotate270 => geometry::rotate270(src, dst)?,
            Operation::Rotate { degrees } => match geometry::quarter_turns(degrees) {
                Some(0) => dst.copy_from_slice(src),
                Some(1) => geometry::rotate90(src, dst)?,
                Some(2) => geometry::rotate180(src, dst)?,
                Some(_) => geometry::rotate270(src, dst)?,
                None => geometry::rotate(src, dst, degrees),
            },
            Operation::Saturation { percent } => color::saturation(src, dst, percent),
            Operation::Sepia { percent } => color::sepia(src, dst, percent),
            Operation::Sigmoid { midpoint, factor } => color::sigmoid(src, dst, midpoint, factor),
            Operation::Sobel => convolve::sobel(src, dst),
            Operation::Threshold { percent } => color::threshold(src, dst, percent),
            Operation::Transpose => geometry::transpose(src, dst),
            Operation::Transverse => geometry::transverse(src, dst),
            Operation::UnsharpMask {
                sigma,
                amount,
                threshold,
            } => blur::unsharp_mask(src, dst, sigma, amount, threshold)?,
        }
        Ok(())
    }
}

fn rect_bounds(rect: Option<PixelRect>) -> Bounds {
    rect.map_or(Bounds::EMPTY, PixelRect::bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/filter/engine.rs"]
mod tests;
