use std::fmt;

/// Direction of a transfer-curve conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorspaceConversion {
    SrgbToLinear,
    LinearToSrgb,
}

/// Statistic gathered over a local (disk-shaped) neighbourhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalStat {
    Minimum,
    Maximum,
    Mean,
    Median,
}

/// One validated pipeline step.
///
/// Operations are plain values: they are built once by the validator, never
/// mutated afterwards, and compare by value. Numeric parameters keep the
/// exact value that was parsed from the script; clamping to a filter's
/// working range happens in the filter engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Blur { sigma: f32 },
    Brightness { percent: f32 },
    ColorBalance { red: f32, green: f32, blue: f32 },
    Colorize { hue: f32, saturation: f32, percent: f32 },
    Colorspace { conversion: ColorspaceConversion },
    Contrast { percent: f32 },
    Crop { x1: i32, y1: i32, x2: i32, y2: i32 },
    CropToSize { width: i32, height: i32 },
    Edge,
    Emboss,
    FlipHorizontal,
    FlipVertical,
    Gamma { gamma: f32 },
    Grayscale,
    Hue { shift: f32 },
    Invert,
    Local { stat: LocalStat, size: i32 },
    Opacity { percent: f32 },
    Pixelate { size: i32 },
    Resize { width: i32, height: i32 },
    ResizeToFill { width: i32, height: i32 },
    ResizeToFit { width: i32, height: i32 },
    /// Counter-clockwise quarter turn.
    Rotate90,
    Rotate180,
    Rotate270,
    /// Counter-clockwise rotation by an arbitrary angle.
    Rotate { degrees: f32 },
    Saturation { percent: f32 },
    Sepia { percent: f32 },
    Sigmoid { midpoint: f32, factor: f32 },
    Sobel,
    Threshold { percent: f32 },
    Transpose,
    Transverse,
    UnsharpMask { sigma: f32, amount: f32, threshold: f32 },
}

/// The enumerated kind of an [`Operation`], without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Blur,
    Brightness,
    ColorBalance,
    Colorize,
    Colorspace,
    Contrast,
    Crop,
    CropToSize,
    Edge,
    Emboss,
    FlipHorizontal,
    FlipVertical,
    Gamma,
    Grayscale,
    Hue,
    Invert,
    LocalMinimum,
    LocalMaximum,
    LocalMean,
    LocalMedian,
    Opacity,
    Pixelate,
    Resize,
    ResizeToFill,
    ResizeToFit,
    Rotate,
    Saturation,
    Sepia,
    Sigmoid,
    Sobel,
    Threshold,
    Transpose,
    Transverse,
    UnsharpMask,
}

impl OperationKind {
    /// Script command that produces this kind.
    pub fn command(self) -> &'static str {
        match self {
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::ColorBalance => "colorbalance",
            Self::Colorize => "colorize",
            Self::Colorspace => "colorspace",
            Self::Contrast => "contrast",
            Self::Crop => "crop",
            Self::CropToSize => "cropsize",
            Self::Edge => "edge",
            Self::Emboss => "emboss",
            Self::FlipHorizontal => "fliph",
            Self::FlipVertical => "flipv",
            Self::Gamma => "gamma",
            Self::Grayscale => "gray",
            Self::Hue => "hue",
            Self::Invert => "invert",
            Self::LocalMinimum => "min",
            Self::LocalMaximum => "max",
            Self::LocalMean => "mean",
            Self::LocalMedian => "median",
            Self::Opacity => "opacity",
            Self::Pixelate => "pixelate",
            Self::Resize => "resize",
            Self::ResizeToFill => "resizefill",
            Self::ResizeToFit => "resizefit",
            Self::Rotate => "rotate",
            Self::Saturation => "saturation",
            Self::Sepia => "sepia",
            Self::Sigmoid => "sigmoid",
            Self::Sobel => "sobel",
            Self::Threshold => "threshold",
            Self::Transpose => "transpose",
            Self::Transverse => "transverse",
            Self::UnsharpMask => "unsharp",
        }
    }
}

/// A single parameter value, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Number(f32),
    Integer(i32),
    Text(&'static str),
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Blur { .. } => OperationKind::Blur,
            Self::Brightness { .. } => OperationKind::Brightness,
            Self::ColorBalance { .. } => OperationKind::ColorBalance,
            Self::Colorize { .. } => OperationKind::Colorize,
            Self::Colorspace { .. } => OperationKind::Colorspace,
            Self::Contrast { .. } => OperationKind::Contrast,
            Self::Crop { .. } => OperationKind::Crop,
            Self::CropToSize { .. } => OperationKind::CropToSize,
            Self::Edge => OperationKind::Edge,
            Self::Emboss => OperationKind::Emboss,
            Self::FlipHorizontal => OperationKind::FlipHorizontal,
            Self::FlipVertical => OperationKind::FlipVertical,
            Self::Gamma { .. } => OperationKind::Gamma,
            Self::Grayscale => OperationKind::Grayscale,
            Self::Hue { .. } => OperationKind::Hue,
            Self::Invert => OperationKind::Invert,
            Self::Local { stat, .. } => match stat {
                LocalStat::Minimum => OperationKind::LocalMinimum,
                LocalStat::Maximum => OperationKind::LocalMaximum,
                LocalStat::Mean => OperationKind::LocalMean,
                LocalStat::Median => OperationKind::LocalMedian,
            },
            Self::Opacity { .. } => OperationKind::Opacity,
            Self::Pixelate { .. } => OperationKind::Pixelate,
            Self::Resize { .. } => OperationKind::Resize,
            Self::ResizeToFill { .. } => OperationKind::ResizeToFill,
            Self::ResizeToFit { .. } => OperationKind::ResizeToFit,
            Self::Rotate90 | Self::Rotate180 | Self::Rotate270 | Self::Rotate { .. } => {
                OperationKind::Rotate
            }
            Self::Saturation { .. } => OperationKind::Saturation,
            Self::Sepia { .. } => OperationKind::Sepia,
            Self::Sigmoid { .. } => OperationKind::Sigmoid,
            Self::Sobel => OperationKind::Sobel,
            Self::Threshold { .. } => OperationKind::Threshold,
            Self::Transpose => OperationKind::Transpose,
            Self::Transverse => OperationKind::Transverse,
            Self::UnsharpMask { .. } => OperationKind::UnsharpMask,
        }
    }

    /// Parameters in the order the script command takes them.
    pub fn params(&self) -> Vec<Param> {
        use Param::{Integer, Number, Text};
        match *self {
            Self::Blur { sigma } => vec![Number(sigma)],
            Self::Brightness { percent }
            | Self::Contrast { percent }
            | Self::Opacity { percent }
            | Self::Saturation { percent }
            | Self::Sepia { percent }
            | Self::Threshold { percent } => vec![Number(percent)],
            Self::ColorBalance { red, green, blue } => {
                vec![Number(red), Number(green), Number(blue)]
            }
            Self::Colorize {
                hue,
                saturation,
                percent,
            } => vec![Number(hue), Number(saturation), Number(percent)],
            Self::Colorspace { conversion } => vec![Text(match conversion {
                ColorspaceConversion::SrgbToLinear => "linear",
                ColorspaceConversion::LinearToSrgb => "sRGB",
            })],
            Self::Crop { x1, y1, x2, y2 } => {
                vec![Integer(x1), Integer(y1), Integer(x2), Integer(y2)]
            }
            Self::CropToSize { width, height }
            | Self::Resize { width, height }
            | Self::ResizeToFill { width, height }
            | Self::ResizeToFit { width, height } => vec![Integer(width), Integer(height)],
            Self::Gamma { gamma } => vec![Number(gamma)],
            Self::Hue { shift } => vec![Number(shift)],
            Self::Local { size, .. } | Self::Pixelate { size } => vec![Integer(size)],
            Self::Rotate90 => vec![Number(90.0)],
            Self::Rotate180 => vec![Number(180.0)],
            Self::Rotate270 => vec![Number(270.0)],
            Self::Rotate { degrees } => vec![Number(degrees)],
            Self::Sigmoid { midpoint, factor } => vec![Number(midpoint), Number(factor)],
            Self::UnsharpMask {
                sigma,
                amount,
                threshold,
            } => vec![Number(sigma), Number(amount), Number(threshold)],
            Self::Edge
            | Self::Emboss
            | Self::FlipHorizontal
            | Self::FlipVertical
            | Self::Grayscale
            | Self::Invert
            | Self::Sobel
            | Self::Transpose
            | Self::Transverse => Vec::new(),
        }
    }
}

/// Renders the operation back into script syntax, e.g. `rotate 90`.
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().command())?;
        for p in self.params() {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/operation.rs"]
mod tests;
