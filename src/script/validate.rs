//! Per-command parameter validation.
//!
//! Every validator receives the argument fields (the command name already
//! stripped, arity already checked by [`validate`]) and either builds a
//! complete [`Operation`] or reports the first problem found. Validators
//! never touch session state.
//!
//! Numeric fields parse leniently: a field that is not a float reads as `0`.
//! Fields that feed integer sizes or coordinates must parse as integers.

use crate::{
    pipeline::operation::{ColorspaceConversion, LocalStat, Operation},
    script::{
        diagnostic::{ValidationError, ValidationErrorKind},
        registry::{CommandAction, CommandSpec},
    },
};

/// Result of a single validator: `Ok(None)` means the line is accepted but
/// contributes no operation (an out-of-range rotation, for instance).
pub type Validated = Result<Option<Operation>, ValidationErrorKind>;

/// Check arity, then run the command's validator over `args`.
///
/// `args` excludes the command name; `command` is the name as written,
/// which may be an alias. Directives only get the arity check.
pub fn validate(
    spec: &CommandSpec,
    command: &str,
    args: &[&str],
    line: usize,
) -> Result<Option<Operation>, ValidationError> {
    let checked = check_arity(spec, args).and_then(|()| match spec.action {
        CommandAction::Transform(validator) => validator(args),
        CommandAction::Directive(_) => Ok(None),
    });
    checked.map_err(|kind| ValidationError {
        line,
        command: command.to_string(),
        usage: spec.usage,
        kind,
    })
}

fn check_arity(spec: &CommandSpec, args: &[&str]) -> Result<(), ValidationErrorKind> {
    if args.len() < spec.min_args {
        return Err(ValidationErrorKind::Arity {
            min: spec.min_args,
            got: args.len(),
        });
    }
    Ok(())
}

/// Lenient float parse: anything unparsable reads as zero.
pub fn atof(field: &str) -> f32 {
    field.parse::<f32>().unwrap_or(0.0)
}

fn atoi(args: &[&str], index: usize) -> Result<i32, ValidationErrorKind> {
    args[index]
        .parse::<i32>()
        .map_err(|_| ValidationErrorKind::NotInteger {
            index,
            field: args[index].to_string(),
        })
}

/// Lenient float at `index`, rejected unless it lies in `lo..=hi`.
/// `NaN` never lies in range.
fn ranged(args: &[&str], index: usize, lo: f32, hi: f32) -> Result<f32, ValidationErrorKind> {
    let v = atof(args[index]);
    if (lo..=hi).contains(&v) {
        Ok(v)
    } else {
        Err(ValidationErrorKind::Range {
            index,
            value: f64::from(v),
        })
    }
}

fn size_pair(args: &[&str]) -> Result<(i32, i32), ValidationErrorKind> {
    Ok((atoi(args, 0)?, atoi(args, 1)?))
}

fn local(args: &[&str], stat: LocalStat) -> Validated {
    let size = atoi(args, 0)?;
    if size <= 0 {
        return Err(ValidationErrorKind::Range {
            index: 0,
            value: f64::from(size),
        });
    }
    // Odd sizes are documented but not enforced here.
    Ok(Some(Operation::Local { stat, size }))
}

pub(crate) fn blur(args: &[&str]) -> Validated {
    Ok(Some(Operation::Blur {
        sigma: atof(args[0]),
    }))
}

pub(crate) fn brightness(args: &[&str]) -> Validated {
    let percent = ranged(args, 0, -100.0, 100.0)?;
    Ok(Some(Operation::Brightness { percent }))
}

pub(crate) fn color_balance(args: &[&str]) -> Validated {
    Ok(Some(Operation::ColorBalance {
        red: atof(args[0]),
        green: atof(args[1]),
        blue: atof(args[2]),
    }))
}

pub(crate) fn colorize(args: &[&str]) -> Validated {
    Ok(Some(Operation::Colorize {
        hue: atof(args[0]),
        saturation: atof(args[1]),
        percent: atof(args[2]),
    }))
}

pub(crate) fn colorspace(args: &[&str]) -> Validated {
    let conversion = match args[0] {
        "linear" | "l" => ColorspaceConversion::SrgbToLinear,
        "sRGB" | "s" => ColorspaceConversion::LinearToSrgb,
        other => {
            return Err(ValidationErrorKind::InvalidChoice {
                index: 0,
                field: other.to_string(),
            });
        }
    };
    Ok(Some(Operation::Colorspace { conversion }))
}

pub(crate) fn contrast(args: &[&str]) -> Validated {
    let percent = ranged(args, 0, -100.0, 100.0)?;
    Ok(Some(Operation::Contrast { percent }))
}

pub(crate) fn crop(args: &[&str]) -> Validated {
    Ok(Some(Operation::Crop {
        x1: atoi(args, 0)?,
        y1: atoi(args, 1)?,
        x2: atoi(args, 2)?,
        y2: atoi(args, 3)?,
    }))
}

pub(crate) fn crop_to_size(args: &[&str]) -> Validated {
    let (width, height) = size_pair(args)?;
    Ok(Some(Operation::CropToSize { width, height }))
}

pub(crate) fn edge(_: &[&str]) -> Validated {
    Ok(Some(Operation::Edge))
}

pub(crate) fn emboss(_: &[&str]) -> Validated {
    Ok(Some(Operation::Emboss))
}

pub(crate) fn flip_horizontal(_: &[&str]) -> Validated {
    Ok(Some(Operation::FlipHorizontal))
}

pub(crate) fn flip_vertical(_: &[&str]) -> Validated {
    Ok(Some(Operation::FlipVertical))
}

pub(crate) fn gamma(args: &[&str]) -> Validated {
    Ok(Some(Operation::Gamma {
        gamma: atof(args[0]),
    }))
}

pub(crate) fn grayscale(_: &[&str]) -> Validated {
    Ok(Some(Operation::Grayscale))
}

pub(crate) fn hue(args: &[&str]) -> Validated {
    let shift = ranged(args, 0, -180.0, 180.0)?;
    Ok(Some(Operation::Hue { shift }))
}

pub(crate) fn invert(_: &[&str]) -> Validated {
    Ok(Some(Operation::Invert))
}

pub(crate) fn local_minimum(args: &[&str]) -> Validated {
    local(args, LocalStat::Minimum)
}

pub(crate) fn local_maximum(args: &[&str]) -> Validated {
    local(args, LocalStat::Maximum)
}

pub(crate) fn local_mean(args: &[&str]) -> Validated {
    local(args, LocalStat::Mean)
}

pub(crate) fn local_median(args: &[&str]) -> Validated {
    local(args, LocalStat::Median)
}

pub(crate) fn opacity(args: &[&str]) -> Validated {
    let percent = ranged(args, 0, 0.0, 100.0)?;
    Ok(Some(Operation::Opacity { percent }))
}

pub(crate) fn pixelate(args: &[&str]) -> Validated {
    Ok(Some(Operation::Pixelate {
        size: atoi(args, 0)?,
    }))
}

pub(crate) fn resize(args: &[&str]) -> Validated {
    let (width, height) = size_pair(args)?;
    Ok(Some(Operation::Resize { width, height }))
}

pub(crate) fn resize_to_fill(args: &[&str]) -> Validated {
    let (width, height) = size_pair(args)?;
    Ok(Some(Operation::ResizeToFill { width, height }))
}

pub(crate) fn resize_to_fit(args: &[&str]) -> Validated {
    let (width, height) = size_pair(args)?;
    Ok(Some(Operation::ResizeToFit { width, height }))
}

/// Angles outside `(0, 360]` are accepted and ignored.
pub(crate) fn rotate(args: &[&str]) -> Validated {
    let degrees = atof(args[0]);
    if !(degrees > 0.0 && degrees <= 360.0) {
        return Ok(None);
    }
    let op = if degrees == 90.0 {
        Operation::Rotate90
    } else if degrees == 180.0 {
        Operation::Rotate180
    } else if degrees == 270.0 {
        Operation::Rotate270
    } else {
        Operation::Rotate { degrees }
    };
    Ok(Some(op))
}

pub(crate) fn saturation(args: &[&str]) -> Validated {
    let percent = ranged(args, 0, -100.0, 500.0)?;
    Ok(Some(Operation::Saturation { percent }))
}

pub(crate) fn sepia(args: &[&str]) -> Validated {
    let percent = ranged(args, 0, 0.0, 100.0)?;
    Ok(Some(Operation::Sepia { percent }))
}

pub(crate) fn sigmoid(args: &[&str]) -> Validated {
    Ok(Some(Operation::Sigmoid {
        midpoint: atof(args[0]),
        factor: atof(args[1]),
    }))
}

pub(crate) fn sobel(_: &[&str]) -> Validated {
    Ok(Some(Operation::Sobel))
}

pub(crate) fn threshold(args: &[&str]) -> Validated {
    let percent = ranged(args, 0, 0.0, 100.0)?;
    Ok(Some(Operation::Threshold { percent }))
}

pub(crate) fn transpose(_: &[&str]) -> Validated {
    Ok(Some(Operation::Transpose))
}

pub(crate) fn transverse(_: &[&str]) -> Validated {
    Ok(Some(Operation::Transverse))
}

pub(crate) fn unsharp_mask(args: &[&str]) -> Validated {
    Ok(Some(Operation::UnsharpMask {
        sigma: atof(args[0]),
        amount: atof(args[1]),
        threshold: atof(args[2]),
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/script/validate.rs"]
mod tests;
