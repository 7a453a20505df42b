use crate::foundation::error::{StoreshotsError, StoreshotsResult};

/// Source screenshot resampled to its fitted size.
#[derive(Clone, Debug)]
pub struct ScaledImage {
    /// Resampled straight-alpha pixels, `target_width` x `target_height`.
    pub image: image::RgbaImage,
    /// Width of the source before scaling.
    pub source_width: u32,
    /// Height of the source before scaling.
    pub source_height: u32,
    pub target_width: u32,
    pub target_height: u32,
}

/// Fit `(source_width, source_height)` to a width budget under a height ceiling.
///
/// The width budget wins unless the proportional height exceeds `max_height`, in which
/// case the height is pinned to `max_height` and the width follows the aspect ratio.
pub fn fit_within(
    source_width: u32,
    source_height: u32,
    target_width: u32,
    max_height: u32,
) -> StoreshotsResult<(u32, u32)> {
    if source_width == 0 || source_height == 0 {
        return Err(StoreshotsError::validation(format!(
            "source dimensions must be > 0 (got {source_width}x{source_height})"
        )));
    }
    if target_width == 0 || max_height == 0 {
        return Err(StoreshotsError::validation(format!(
            "fit budget must be > 0 (got width {target_width}, max height {max_height})"
        )));
    }

    let sw = f64::from(source_width);
    let sh = f64::from(source_height);

    let ratio = f64::from(target_width) / sw;
    let th = (sh * ratio).round();
    if th <= f64::from(max_height) {
        return Ok((target_width, (th as u32).max(1)));
    }

    let ratio = f64::from(max_height) / sh;
    let tw = (sw * ratio).round() as u32;
    Ok((tw.max(1), max_height))
}

/// Fit and resample `source` with a Lanczos3 filter.
#[tracing::instrument(skip(source), fields(w = source.width(), h = source.height()))]
pub fn scale_image(
    source: &image::RgbaImage,
    target_width: u32,
    max_height: u32,
) -> StoreshotsResult<ScaledImage> {
    let (source_width, source_height) = source.dimensions();
    let (tw, th) = fit_within(source_width, source_height, target_width, max_height)?;
    let image = if (tw, th) == (source_width, source_height) {
        source.clone()
    } else {
        image::imageops::resize(source, tw, th, image::imageops::FilterType::Lanczos3)
    };
    tracing::debug!(tw, th, "scaled screenshot");
    Ok(ScaledImage {
        image,
        source_width,
        source_height,
        target_width: tw,
        target_height: th,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
