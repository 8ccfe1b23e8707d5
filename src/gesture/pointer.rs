use crate::foundation::core::Point;

/// Contact points engaged with the surface, independent of the device that produced them.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contacts {
    /// Nothing is touching the surface.
    #[default]
    None,
    /// One mouse button or one finger.
    Single(Point),
    /// Two fingers; additional fingers are ignored.
    Dual(Point, Point),
}

impl Contacts {
    /// Build from an ordered list of contact positions. Only the first two are kept.
    pub fn from_points(points: &[Point]) -> Self {
        match points {
            [] => Self::None,
            [p] => Self::Single(*p),
            [p1, p2, ..] => Self::Dual(*p1, *p2),
        }
    }

    /// Number of contacts represented, capped at two.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Dual(..) => 2,
        }
    }
}

/// What happened to the contact set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// A contact went down.
    Pressed,
    /// One or more contacts moved.
    Moved,
    /// A contact was lifted.
    Released,
    /// The host aborted the gesture (pointer left the surface, touch cancelled).
    Cancelled,
}

/// Device-neutral input event. `contacts` lists what is still engaged after the event.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Contacts remaining after the event.
    pub contacts: Contacts,
}

impl PointerEvent {
    /// Construct an event.
    pub fn new(kind: PointerKind, contacts: Contacts) -> Self {
        Self { kind, contacts }
    }
}

/// Raw mouse input as delivered by a host surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MouseInput {
    /// Primary button pressed.
    Down {
        /// Cursor position.
        at: Point,
    },
    /// Cursor moved.
    Move {
        /// Cursor position.
        at: Point,
    },
    /// Primary button released.
    Up,
    /// Cursor left the surface.
    Leave,
}

/// Tracks the mouse button so hover moves are not mistaken for drags.
#[derive(Clone, Copy, Debug, Default)]
pub struct MouseAdapter {
    button_down: bool,
}

impl MouseAdapter {
    /// Create an adapter with the button released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a mouse input; hover moves yield `None`.
    pub fn translate(&mut self, input: MouseInput) -> Option<PointerEvent> {
        match input {
            MouseInput::Down { at } => {
                self.button_down = true;
                Some(PointerEvent::new(
                    PointerKind::Pressed,
                    Contacts::Single(at),
                ))
            }
            MouseInput::Move { at } if self.button_down => Some(PointerEvent::new(
                PointerKind::Moved,
                Contacts::Single(at),
            )),
            MouseInput::Move { .. } => None,
            MouseInput::Up => {
                self.button_down = false;
                Some(PointerEvent::new(PointerKind::Released, Contacts::None))
            }
            MouseInput::Leave => {
                let was_down = std::mem::replace(&mut self.button_down, false);
                was_down.then(|| PointerEvent::new(PointerKind::Cancelled, Contacts::None))
            }
        }
    }
}

/// Phase of a touch event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// A finger went down.
    Start,
    /// Fingers moved.
    Move,
    /// A finger was lifted.
    End,
    /// The platform cancelled the touch sequence.
    Cancel,
}

/// Raw touch input: the phase plus every touch still on the surface, in host order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TouchInput {
    /// Event phase.
    pub phase: TouchPhase,
    /// Remaining touches after the event.
    pub touches: Vec<Point>,
}

impl TouchInput {
    /// Translate into the device-neutral form.
    pub fn to_pointer_event(&self) -> PointerEvent {
        let kind = match self.phase {
            TouchPhase::Start => PointerKind::Pressed,
            TouchPhase::Move => PointerKind::Moved,
            TouchPhase::End => PointerKind::Released,
            TouchPhase::Cancel => PointerKind::Cancelled,
        };
        let contacts = match self.phase {
            TouchPhase::Cancel => Contacts::None,
            _ => Contacts::from_points(&self.touches),
        };
        PointerEvent::new(kind, contacts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/pointer.rs"]
mod tests;
