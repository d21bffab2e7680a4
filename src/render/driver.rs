use image::RgbaImage;

use crate::{
    assets::{decode::SourceBinding, encode::encode},
    filter::engine::FilterEngine,
    foundation::{
        core::Bounds,
        error::{ImgshError, ImgshResult},
    },
    pipeline::sequence::Pipeline,
};

/// Bounds after every operation of `ops` has been applied to `src`.
pub fn output_bounds<E: FilterEngine + ?Sized>(
    engine: &E,
    src: Bounds,
    ops: &Pipeline,
) -> Bounds {
    ops.iter().fold(src, |b, op| engine.bounds(op, b))
}

/// Run `ops` over `src` in order. Each step gets a fresh destination sized
/// by the engine; the source image is never touched.
#[tracing::instrument(level = "debug", skip_all, fields(ops = ops.len()))]
pub fn render_image<E: FilterEngine + ?Sized>(
    engine: &E,
    src: &RgbaImage,
    ops: &Pipeline,
) -> ImgshResult<RgbaImage> {
    let expected = output_bounds(engine, Bounds::of(src), ops);

    let mut current: Option<RgbaImage> = None;
    for (idx, op) in ops.iter().enumerate() {
        let input = current.as_ref().unwrap_or(src);
        let b = engine.bounds(op, Bounds::of(input));
        if !b.is_allocatable() {
            return Err(ImgshError::render(format!("step {idx} ({op}): {b} is too large")));
        }
        let mut dst = RgbaImage::new(b.width, b.height);
        engine.apply(op, input, &mut dst).map_err(|e| match e {
            ImgshError::Render(msg) => ImgshError::render(format!("step {idx} ({op}): {msg}")),
            other => other,
        })?;
        tracing::trace!(step = idx, op = %op, bounds = %b, "applied");
        current = Some(dst);
    }

    let out = current.unwrap_or_else(|| src.clone());
    if Bounds::of(&out) != expected {
        return Err(ImgshError::render(format!(
            "pipeline produced {}, expected {expected}",
            Bounds::of(&out)
        )));
    }
    Ok(out)
}

/// Render the bound source through `ops` and encode it in the source's
/// container. `Ok(None)` means the container has no encoder.
pub fn render<E: FilterEngine + ?Sized>(
    engine: &E,
    binding: &SourceBinding,
    ops: &Pipeline,
) -> ImgshResult<Option<Vec<u8>>> {
    let img = render_image(engine, &binding.image, ops)?;
    let bytes = encode(&img, &binding.format)?;
    if let Some(b) = &bytes {
        tracing::debug!(
            format = %binding.format,
            bounds = %Bounds::of(&img),
            bytes = b.len(),
            "rendered"
        );
    }
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
