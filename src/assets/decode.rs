use std::sync::Arc;

use crate::foundation::core::Layer;
use crate::foundation::error::{TwibbonError, TwibbonResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster image in premultiplied RGBA8 form.
///
/// The buffer always holds exactly `width * height * 4` bytes; the only constructor checks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> TwibbonResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| TwibbonError::validation("image size overflow"))?;
        if rgba.len() != expected {
            return Err(TwibbonError::validation(format!(
                "expected {expected} rgba8 bytes for {width}x{height}, got {}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Premultiplied pixel at `(x, y)`; transparent outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        match self.rgba8_premul.get(idx..idx + 4) {
            Some(px) => [px[0], px[1], px[2], px[3]],
            None => [0, 0, 0, 0],
        }
    }
}

/// Decode encoded image bytes for `layer` and convert to premultiplied RGBA8.
///
/// Any format the `image` crate recognises is accepted; the bytes are not transcoded or
/// validated beyond what decoding requires.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(layer: Layer, bytes: &[u8]) -> TwibbonResult<PreparedImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| TwibbonError::decode(layer, e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(TwibbonError::decode(layer, "image has zero area"));
    }
    PreparedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
