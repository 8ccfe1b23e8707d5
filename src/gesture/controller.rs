use crate::foundation::core::{Point, ScaleBounds, Vec2};
use crate::gesture::pointer::{Contacts, PointerEvent, PointerKind};
use crate::transform::state::{TransformAction, TransformState};

/// Anchor of an active drag: the pointer position expressed relative to the photo origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    anchor: Point,
}

impl DragSession {
    /// Start a drag at `pointer` while the photo sits at `offset`.
    pub fn begin(pointer: Point, offset: Vec2) -> Self {
        Self {
            anchor: pointer - offset,
        }
    }

    /// Offset that keeps the anchor under `pointer`. No smoothing or accumulation.
    pub fn update(&self, pointer: Point) -> Vec2 {
        pointer - self.anchor
    }

    /// `pointer_at_start - offset_at_start`.
    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// Distance and scale recorded when a pinch starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchBaseline {
    distance: f64,
    scale: f64,
}

impl PinchBaseline {
    /// Record the baseline for contacts `p1`, `p2` at the current `scale`.
    pub fn begin(p1: Point, p2: Point, scale: f64) -> Self {
        Self {
            distance: p1.distance(p2),
            scale,
        }
    }

    /// Ratio of the current finger distance to the baseline; `1.0` for a zero baseline.
    pub fn factor(&self, p1: Point, p2: Point) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        p1.distance(p2) / self.distance
    }

    /// Scale for the current contacts, clamped to `bounds`.
    pub fn update(&self, p1: Point, p2: Point, bounds: ScaleBounds) -> f64 {
        bounds.clamp(self.scale * self.factor(p1, p2))
    }

    /// Whether both contacts started on the same spot.
    pub fn is_degenerate(&self) -> bool {
        self.distance == 0.0 || !self.distance.is_finite()
    }

    /// Finger distance at pinch start.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Scale at pinch start.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Gesture state machine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GesturePhase {
    /// No contact engaged.
    #[default]
    Idle,
    /// One contact translating the photo.
    Dragging(DragSession),
    /// Two contacts scaling the photo.
    Pinching(PinchBaseline),
}

impl GesturePhase {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging(_) => "dragging",
            Self::Pinching(_) => "pinching",
        }
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Result of feeding one event to the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureOutcome {
    /// State change to apply, if the event produced one.
    pub action: Option<TransformAction>,
    /// The host must cancel its default scroll/zoom handling for this event.
    pub suppress_default: bool,
}

/// Turns device-neutral pointer events into [`TransformAction`]s.
///
/// The controller never holds the transform itself; it reads the current state on every event so
/// that re-anchoring always starts from the latest offset and scale.
#[derive(Clone, Debug)]
pub struct GestureController {
    phase: GesturePhase,
    pinch_bounds: ScaleBounds,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(ScaleBounds::PINCH)
    }
}

impl GestureController {
    /// Create an idle controller clamping pinch output to `pinch_bounds`.
    pub fn new(pinch_bounds: ScaleBounds) -> Self {
        Self {
            phase: GesturePhase::Idle,
            pinch_bounds,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Drop any in-flight gesture.
    pub fn cancel(&mut self) {
        self.transition(GesturePhase::Idle);
    }

    /// Advance the state machine by one event.
    pub fn handle(&mut self, state: &TransformState, event: &PointerEvent) -> GestureOutcome {
        let mut action = None;
        let next = match (self.phase, event.contacts) {
            (_, Contacts::None) => GesturePhase::Idle,

            (GesturePhase::Idle, Contacts::Single(p)) if event.kind == PointerKind::Pressed => {
                GesturePhase::Dragging(DragSession::begin(p, state.offset))
            }
            (GesturePhase::Idle, Contacts::Dual(p1, p2)) if event.kind == PointerKind::Pressed => {
                GesturePhase::Pinching(PinchBaseline::begin(p1, p2, state.scale))
            }
            (GesturePhase::Idle, _) => GesturePhase::Idle,

            (GesturePhase::Dragging(drag), Contacts::Single(p)) => {
                if event.kind == PointerKind::Moved {
                    action = Some(TransformAction::SetOffset(drag.update(p)));
                    GesturePhase::Dragging(drag)
                } else {
                    GesturePhase::Dragging(DragSession::begin(p, state.offset))
                }
            }
            (GesturePhase::Dragging(_), Contacts::Dual(p1, p2)) => {
                GesturePhase::Pinching(PinchBaseline::begin(p1, p2, state.scale))
            }

            (GesturePhase::Pinching(base), Contacts::Dual(p1, p2)) => {
                if event.kind == PointerKind::Moved {
                    if base.is_degenerate() {
                        tracing::debug!("pinch started with zero finger distance; scale held");
                    }
                    let scale = base.update(p1, p2, self.pinch_bounds);
                    action = Some(TransformAction::PinchScale(scale));
                }
                GesturePhase::Pinching(base)
            }
            (GesturePhase::Pinching(_), Contacts::Single(p)) => {
                GesturePhase::Dragging(DragSession::begin(p, state.offset))
            }
        };

        self.transition(next);
        GestureOutcome {
            action,
            suppress_default: self.phase.is_active(),
        }
    }

    fn transition(&mut self, next: GesturePhase) {
        if std::mem::discriminant(&self.phase) != std::mem::discriminant(&next) {
            tracing::debug!(from = self.phase.name(), to = next.name(), "gesture phase");
        }
        self.phase = next;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/controller.rs"]
mod tests;
