use std::{
    fmt,
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::{ImageFormat, ImageReader, RgbaImage};

use crate::foundation::{
    core::Bounds,
    error::{ImgshError, ImgshResult},
};

/// Container format detected when a source is bound; renders re-encode
/// into the same format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerFormat {
    Png,
    Jpeg,
    Gif,
    /// Decodable but not re-encodable (webp, bmp).
    Other(String),
}

impl ContainerFormat {
    pub fn from_image_format(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => Self::Png,
            ImageFormat::Jpeg => Self::Jpeg,
            ImageFormat::Gif => Self::Gif,
            other => Self::Other(
                other
                    .extensions_str()
                    .first()
                    .copied()
                    .unwrap_or("unknown")
                    .to_owned(),
            ),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The decoded source image together with where it came from.
#[derive(Clone, Debug)]
pub struct SourceBinding {
    pub image: RgbaImage,
    pub format: ContainerFormat,
    pub path: PathBuf,
}

impl SourceBinding {
    pub fn bounds(&self) -> Bounds {
        Bounds::of(&self.image)
    }
}

/// Read and decode `path`. Any failure is an [`ImgshError::Bind`].
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn bind(path: &Path) -> ImgshResult<SourceBinding> {
    let bytes = std::fs::read(path).map_err(|e| ImgshError::bind(path, e))?;
    let (image, format) = decode_bytes(&bytes).map_err(|e| ImgshError::bind(path, e))?;
    tracing::debug!(
        format = %format,
        bounds = %Bounds::of(&image),
        "bound source image"
    );
    Ok(SourceBinding {
        image,
        format,
        path: path.to_path_buf(),
    })
}

/// Sniff the container from the leading bytes and decode to straight RGBA8.
pub fn decode_bytes(bytes: &[u8]) -> anyhow::Result<(RgbaImage, ContainerFormat)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .context("sniff image container")?;
    let format = reader
        .format()
        .map(ContainerFormat::from_image_format)
        .context("unrecognized image container")?;
    let image = reader.decode().context("decode image")?.to_rgba8();
    Ok((image, format))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
