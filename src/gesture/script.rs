use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{TwibbonError, TwibbonResult};
use crate::gesture::controller::GestureController;
use crate::gesture::pointer::{MouseAdapter, MouseInput, TouchInput};
use crate::transform::state::{ScaleLimits, TransformAction, TransformState};

/// One recorded user interaction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    /// Raw mouse input.
    Mouse(MouseInput),
    /// Raw touch input.
    Touch(TouchInput),
    /// Zoom control moved to a value.
    Slider(f64),
    /// Reset button pressed.
    Reset,
}

/// Ordered list of recorded interactions, replayed in arrival order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct GestureScript {
    /// Steps in the order they were recorded.
    pub steps: Vec<ScriptStep>,
}

impl GestureScript {
    /// Parse a script from a JSON array.
    pub fn from_json_str(s: &str) -> TwibbonResult<Self> {
        serde_json::from_str(s).map_err(|e| TwibbonError::serde(e.to_string()))
    }

    /// Read and parse a script file.
    pub fn from_path(path: &Path) -> TwibbonResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read gesture script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Replay every step from `initial` through a fresh controller and the reducer.
    pub fn replay_transform(&self, initial: TransformState, limits: &ScaleLimits) -> TransformState {
        let mut ctl = GestureController::new(limits.pinch);
        let mut mouse = MouseAdapter::new();
        let mut state = initial;
        for step in &self.steps {
            let action = match step {
                ScriptStep::Mouse(input) => mouse
                    .translate(*input)
                    .and_then(|ev| ctl.handle(&state, &ev).action),
                ScriptStep::Touch(input) => ctl.handle(&state, &input.to_pointer_event()).action,
                ScriptStep::Slider(v) => Some(TransformAction::SliderScale(*v)),
                ScriptStep::Reset => Some(TransformAction::Reset),
            };
            if let Some(action) = action {
                state = state.reduce(action, limits);
            }
        }
        state
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/script.rs"]
mod tests;
