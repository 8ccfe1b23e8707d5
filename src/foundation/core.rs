use crate::foundation::error::{TwibbonError, TwibbonResult};

pub use kurbo::{Point, Rect, Vec2};

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed 4:5 output resolution. Never derived from a viewport.
    pub const OUTPUT: Canvas = Canvas {
        width: 1080,
        height: 1350,
    };

    /// Number of bytes needed for a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }

    /// Full-surface rectangle in canvas space.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// One of the two image layers of the composite.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// The user's photo, drawn first and transformed.
    Photo,
    /// The decorative overlay, drawn last and stretched over the whole surface.
    Frame,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Photo => f.write_str("photo"),
            Self::Frame => f.write_str("frame"),
        }
    }
}

/// Inclusive scale range enforced by one input modality.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleBounds {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl ScaleBounds {
    /// Range of the discrete zoom control.
    pub const SLIDER: ScaleBounds = ScaleBounds { min: 0.5, max: 3.0 };
    /// Range of the two-finger pinch gesture.
    pub const PINCH: ScaleBounds = ScaleBounds { min: 0.5, max: 5.0 };

    /// Construct bounds, rejecting empty or non-positive ranges.
    pub fn new(min: f64, max: f64) -> TwibbonResult<Self> {
        let out = Self { min, max };
        out.validate()?;
        Ok(out)
    }

    /// Check that `0 < min <= max` and both ends are finite.
    pub fn validate(&self) -> TwibbonResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(TwibbonError::validation("scale bounds must be finite"));
        }
        if self.min <= 0.0 {
            return Err(TwibbonError::validation("scale bounds min must be > 0"));
        }
        if self.min > self.max {
            return Err(TwibbonError::validation(
                "scale bounds min must be <= max",
            ));
        }
        Ok(())
    }

    /// Clamp `scale` into the range. NaN collapses to `min`.
    pub fn clamp(self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }

    /// Whether `scale` lies within the range.
    pub fn contains(self, scale: f64) -> bool {
        self.min <= scale && scale <= self.max
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
