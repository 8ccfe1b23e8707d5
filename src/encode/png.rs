use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{TwibbonError, TwibbonResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::surface::Surface;

/// File name handed to the save collaborator unless configured otherwise.
pub const DEFAULT_EXPORT_FILENAME: &str = "twibbon-result.png";

/// Encode the current contents of `surface` as a straight-alpha RGBA8 PNG.
///
/// Fails with [`TwibbonError::ExportUnavailable`] if the surface has never completed a composite.
#[tracing::instrument(skip_all, fields(composites = surface.composites()))]
pub fn encode_png(surface: &Surface) -> TwibbonResult<Vec<u8>> {
    if !surface.has_composite() {
        return Err(TwibbonError::export_unavailable(
            "surface has not completed a composite",
        ));
    }

    let canvas = surface.canvas();
    let mut rgba = surface.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);

    let img = image::RgbaImage::from_raw(canvas.width, canvas.height, rgba).ok_or_else(|| {
        TwibbonError::export_unavailable("surface buffer does not match its dimensions")
    })?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    tracing::debug!(bytes = buf.len(), "png encoded");
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
