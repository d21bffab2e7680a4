use std::io::Cursor;

use image::{
    Frame, ImageEncoder, RgbaImage,
    codecs::{gif::GifEncoder, jpeg::JpegEncoder, png::PngEncoder},
};

use crate::{
    assets::decode::ContainerFormat,
    foundation::error::{ImgshError, ImgshResult},
};

const JPEG_QUALITY: u8 = 75;

/// Encode `img` in `format`.
///
/// Returns `Ok(None)` for containers that can be read but not written, in
/// which case nothing should be emitted.
pub fn encode(img: &RgbaImage, format: &ContainerFormat) -> ImgshResult<Option<Vec<u8>>> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(ImgshError::encode(format!("{format}: image is empty ({w}x{h})")));
    }

    let mut out = Vec::new();
    match format {
        ContainerFormat::Png => PngEncoder::new(&mut out)
            .write_image(img.as_raw(), w, h, image::ExtendedColorType::Rgba8)
            .map_err(|e| ImgshError::encode(format!("png: {e}")))?,
        ContainerFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(rgb.as_raw(), w, h, image::ExtendedColorType::Rgb8)
                .map_err(|e| ImgshError::encode(format!("jpeg: {e}")))?
        }
        ContainerFormat::Gif => {
            let mut enc = GifEncoder::new(Cursor::new(&mut out));
            enc.encode_frame(Frame::new(img.clone()))
                .map_err(|e| ImgshError::encode(format!("gif: {e}")))?;
        }
        ContainerFormat::Other(name) => {
            tracing::debug!(format = %name, "no encoder for container; skipping output");
            return Ok(None);
        }
    }
    Ok(Some(out))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
