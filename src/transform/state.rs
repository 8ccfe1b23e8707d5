use crate::foundation::core::{ScaleBounds, Vec2};
use crate::foundation::error::{TwibbonError, TwibbonResult};

/// Placement of the photo layer on the output canvas.
///
/// `offset` is the canvas-space position of the photo's top-left corner and is unconstrained;
/// the photo may be dragged fully outside the frame. `scale` multiplies the photo's natural
/// size uniformly on both axes.
///
/// Deserialized states go through [`TransformState::new`] with the default limits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TransformRepr")]
pub struct TransformState {
    /// Uniform scale factor applied to the photo's natural size.
    pub scale: f64,
    /// Top-left corner of the photo in canvas pixels.
    pub offset: Vec2,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

#[derive(serde::Deserialize)]
struct TransformRepr {
    scale: f64,
    offset: Vec2,
}

impl TryFrom<TransformRepr> for TransformState {
    type Error = TwibbonError;

    fn try_from(repr: TransformRepr) -> TwibbonResult<Self> {
        Self::new(repr.scale, repr.offset, &ScaleLimits::default())
    }
}

/// A state change requested by an input source.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformAction {
    /// Move the photo so its top-left corner lands on the given canvas position.
    SetOffset(Vec2),
    /// Scale produced by a pinch gesture; clamped to the pinch bounds.
    PinchScale(f64),
    /// Scale produced by the zoom control; snapped and clamped to the slider bounds.
    SliderScale(f64),
    /// Back to `{ scale: 1, offset: (0, 0) }`.
    Reset,
}

/// Per-modality scale limits.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScaleLimits {
    /// Range enforced for the discrete zoom control.
    pub slider: ScaleBounds,
    /// Increment of the zoom control, measured from `slider.min`.
    pub slider_step: f64,
    /// Range enforced for pinch gestures.
    pub pinch: ScaleBounds,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            slider: ScaleBounds::SLIDER,
            slider_step: 0.1,
            pinch: ScaleBounds::PINCH,
        }
    }
}

impl ScaleLimits {
    /// Validate both ranges and the slider step.
    pub fn validate(&self) -> TwibbonResult<()> {
        self.slider.validate()?;
        self.pinch.validate()?;
        if !self.slider_step.is_finite() || self.slider_step <= 0.0 {
            return Err(TwibbonError::validation("slider_step must be finite and > 0"));
        }
        Ok(())
    }

    /// Smallest range covering both the slider and the pinch bounds.
    pub fn widest(&self) -> ScaleBounds {
        ScaleBounds {
            min: self.slider.min.min(self.pinch.min),
            max: self.slider.max.max(self.pinch.max),
        }
    }

    /// Snap `value` to the slider grid and clamp it into the slider range.
    pub fn slider_value(&self, value: f64) -> f64 {
        let value = self.slider.clamp(value);
        let steps = ((value - self.slider.min) / self.slider_step).round();
        self.slider.clamp(self.slider.min + steps * self.slider_step)
    }
}

impl TransformState {
    /// Build a state, rejecting a non-finite offset and a scale no input could produce under
    /// `limits`.
    pub fn new(scale: f64, offset: Vec2, limits: &ScaleLimits) -> TwibbonResult<Self> {
        let bounds = limits.widest();
        if !bounds.contains(scale) {
            return Err(TwibbonError::validation(format!(
                "scale {scale} outside [{}, {}]",
                bounds.min, bounds.max
            )));
        }
        if !offset.is_finite() {
            return Err(TwibbonError::validation("offset must be finite"));
        }
        Ok(Self { scale, offset })
    }

    /// Apply `action` and return the resulting state. `self` is left untouched.
    pub fn reduce(self, action: TransformAction, limits: &ScaleLimits) -> Self {
        match action {
            TransformAction::SetOffset(offset) if offset.is_finite() => Self { offset, ..self },
            TransformAction::SetOffset(_) => self,
            TransformAction::PinchScale(scale) => Self {
                scale: limits.pinch.clamp(scale),
                ..self
            },
            TransformAction::SliderScale(scale) => Self {
                scale: limits.slider_value(scale),
                ..self
            },
            TransformAction::Reset => Self::default(),
        }
    }

    /// Zoom readout in whole percent (`1.0` is `100`).
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round().max(0.0) as u32
    }

    /// Whether this is the session-start state.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/state.rs"]
mod tests;
