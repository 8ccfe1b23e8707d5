use crate::assets::decode::PreparedImage;
use crate::foundation::core::Rect;
use crate::foundation::math::{premul_over_px, premultiply_rgba8_in_place};
use crate::render::surface::Surface;
use crate::transform::state::TransformState;

/// Backend-agnostic render settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// If set, the surface is cleared to this straight RGBA8 color before drawing.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Draws the two-layer scene: the transformed photo, then the frame over the whole surface.
#[derive(Clone, Debug, Default)]
pub struct CompositeRenderer {
    settings: RenderSettings,
}

impl CompositeRenderer {
    /// Create a renderer with `settings`.
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Clear `surface`, draw `photo` under `transform`, then stretch `frame` over everything.
    ///
    /// The frame is always the last layer, so wherever it is opaque the photo cannot show through.
    #[tracing::instrument(
        skip_all,
        fields(
            scale = transform.scale,
            offset_x = transform.offset.x,
            offset_y = transform.offset.y
        )
    )]
    pub fn render(
        &self,
        surface: &mut Surface,
        photo: &PreparedImage,
        frame: &PreparedImage,
        transform: &TransformState,
    ) {
        let clear = self
            .settings
            .clear_rgba
            .map(premul_rgba8)
            .unwrap_or([0, 0, 0, 0]);
        surface.clear(clear);

        draw_image(surface, photo, photo_rect(photo, transform));
        let full = surface.canvas().rect();
        draw_image(surface, frame, full);

        surface.mark_composited();
        tracing::debug!(composites = surface.composites(), "composite complete");
    }
}

/// Destination rectangle of the photo: top-left at `offset`, natural size times `scale`.
pub fn photo_rect(photo: &PreparedImage, transform: &TransformState) -> Rect {
    let w = f64::from(photo.width()) * transform.scale;
    let h = f64::from(photo.height()) * transform.scale;
    let o = transform.offset;
    Rect::new(o.x, o.y, o.x + w, o.y + h)
}

/// Source-over draw of `img` stretched into `dest`, sampled bilinearly at pixel centres.
///
/// Pixels whose centre falls outside `dest` or outside the surface are untouched.
pub fn draw_image(surface: &mut Surface, img: &PreparedImage, dest: Rect) {
    let canvas = surface.canvas();
    let dest_w = dest.width();
    let dest_h = dest.height();
    if img.width() == 0 || img.height() == 0 || !(dest_w > 0.0) || !(dest_h > 0.0) {
        return;
    }

    let (x_start, x_end) = covered_span(dest.x0, dest.x1, canvas.width);
    let (y_start, y_end) = covered_span(dest.y0, dest.y1, canvas.height);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let sx = f64::from(img.width()) / dest_w;
    let sy = f64::from(img.height()) / dest_h;

    let columns: Vec<Tap> = (x_start..x_end)
        .map(|x| Tap::new((f64::from(x) + 0.5 - dest.x0) * sx - 0.5, img.width()))
        .collect();

    let width = canvas.width as usize;
    let data = surface.data_mut();
    for y in y_start..y_end {
        let row = Tap::new((f64::from(y) + 0.5 - dest.y0) * sy - 0.5, img.height());
        for (col, x) in columns.iter().zip(x_start..x_end) {
            let src = sample_bilinear(img, col, &row);
            if src[3] == 0 {
                continue;
            }
            let idx = ((y as usize) * width + (x as usize)) * 4;
            let d = &mut data[idx..idx + 4];
            let out = premul_over_px([d[0], d[1], d[2], d[3]], src);
            d.copy_from_slice(&out);
        }
    }
}

/// Integer pixel range whose centres lie in `[lo, hi)`, clipped to `[0, len)`.
fn covered_span(lo: f64, hi: f64, len: u32) -> (u32, u32) {
    let len_f = f64::from(len);
    let start = (lo - 0.5).ceil().clamp(0.0, len_f) as u32;
    let end = (hi - 0.5).ceil().clamp(0.0, len_f) as u32;
    (start, end)
}

/// Two neighbouring source indices and the weight of the second one.
#[derive(Clone, Copy, Debug)]
struct Tap {
    i0: u32,
    i1: u32,
    frac: f32,
}

impl Tap {
    fn new(pos: f64, len: u32) -> Self {
        let max = f64::from(len - 1);
        let pos = pos.clamp(0.0, max);
        let i0 = pos.floor();
        let frac = (pos - i0) as f32;
        let i0 = i0 as u32;
        let i1 = (i0 + 1).min(len - 1);
        Self { i0, i1, frac }
    }
}

fn sample_bilinear(img: &PreparedImage, col: &Tap, row: &Tap) -> [u8; 4] {
    if col.frac == 0.0 && row.frac == 0.0 {
        return img.pixel(col.i0, row.i0);
    }
    let p00 = img.pixel(col.i0, row.i0);
    let p10 = img.pixel(col.i1, row.i0);
    let p01 = img.pixel(col.i0, row.i1);
    let p11 = img.pixel(col.i1, row.i1);

    let (fx, fy) = (col.frac, row.frac);
    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    let mut out = [0u8; 4];
    for c in 0..4 {
        let v = f32::from(p00[c]) * w00
            + f32::from(p10[c]) * w10
            + f32::from(p01[c]) * w01
            + f32::from(p11[c]) * w11;
        out[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    // Rounding each channel independently can push colour above alpha.
    for c in 0..3 {
        out[c] = out[c].min(out[3]);
    }
    out
}

fn premul_rgba8(mut px: [u8; 4]) -> [u8; 4] {
    premultiply_rgba8_in_place(&mut px);
    px
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
