use super::*;
use crate::transform::state::ScaleLimits;

fn press(contacts: Contacts) -> PointerEvent {
    PointerEvent::new(PointerKind::Pressed, contacts)
}

fn moved(contacts: Contacts) -> PointerEvent {
    PointerEvent::new(PointerKind::Moved, contacts)
}

fn released(contacts: Contacts) -> PointerEvent {
    PointerEvent::new(PointerKind::Released, contacts)
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

struct Harness {
    ctl: GestureController,
    state: TransformState,
    limits: ScaleLimits,
}

impl Harness {
    fn new() -> Self {
        Self {
            ctl: GestureController::default(),
            state: TransformState::default(),
            limits: ScaleLimits::default(),
        }
    }

    fn feed(&mut self, ev: PointerEvent) -> GestureOutcome {
        let out = self.ctl.handle(&self.state, &ev);
        if let Some(action) = out.action {
            self.state = self.state.reduce(action, &self.limits);
        }
        out
    }
}

#[test]
fn drag_example_from_origin() {
    let mut h = Harness::new();
    h.feed(press(Contacts::Single(p(100.0, 100.0))));
    let out = h.feed(moved(Contacts::Single(p(150.0, 130.0))));
    assert_eq!(
        out.action,
        Some(TransformAction::SetOffset(Vec2::new(50.0, 30.0)))
    );
    assert_eq!(h.state.offset, Vec2::new(50.0, 30.0));
}

#[test]
fn drag_updates_equal_pointer_minus_anchor_without_drift() {
    let start_offset = Vec2::new(12.25, -7.5);
    let drag = DragSession::begin(p(40.0, 60.0), start_offset);
    let anchor = drag.anchor();
    assert_eq!(anchor, p(40.0 - 12.25, 60.0 + 7.5));

    for i in 0..500 {
        let pointer = p(f64::from(i) * 0.37 - 20.0, 300.0 - f64::from(i) * 1.13);
        assert_eq!(drag.update(pointer), pointer - anchor);
    }
    assert_eq!(drag.update(p(40.0, 60.0)), start_offset);
}

#[test]
fn pinch_example_scales_by_distance_ratio() {
    let base = PinchBaseline::begin(p(0.0, 0.0), p(100.0, 0.0), 1.0);
    assert_eq!(base.distance(), 100.0);
    assert_eq!(base.update(p(0.0, 0.0), p(250.0, 0.0), ScaleBounds::PINCH), 2.5);
}

#[test]
fn pinch_is_clamped_not_wrapped() {
    let base = PinchBaseline::begin(p(0.0, 0.0), p(10.0, 0.0), 1.0);
    for d in [0.0, 0.001, 1.0, 4.9, 10.0, 49.0, 51.0, 1.0e9] {
        let s = base.update(p(0.0, 0.0), p(d, 0.0), ScaleBounds::PINCH);
        assert!((0.5..=5.0).contains(&s), "distance {d} gave {s}");
    }
    assert_eq!(base.update(p(0.0, 0.0), p(1.0e9, 0.0), ScaleBounds::PINCH), 5.0);
    assert_eq!(base.update(p(0.0, 0.0), p(0.0, 0.0), ScaleBounds::PINCH), 0.5);
}

#[test]
fn degenerate_pinch_keeps_baseline_scale() {
    let base = PinchBaseline::begin(p(30.0, 30.0), p(30.0, 30.0), 1.7);
    assert!(base.is_degenerate());
    assert_eq!(base.factor(p(0.0, 0.0), p(500.0, 0.0)), 1.0);
    assert_eq!(base.update(p(0.0, 0.0), p(500.0, 0.0), ScaleBounds::PINCH), 1.7);

    let mut h = Harness::new();
    h.feed(press(Contacts::Dual(p(5.0, 5.0), p(5.0, 5.0))));
    let out = h.feed(moved(Contacts::Dual(p(0.0, 0.0), p(90.0, 0.0))));
    assert_eq!(out.action, Some(TransformAction::PinchScale(1.0)));
    assert_eq!(h.state.scale, 1.0);
}

#[test]
fn phase_transitions_follow_contact_count() {
    let mut h = Harness::new();
    assert_eq!(h.ctl.phase(), GesturePhase::Idle);

    h.feed(press(Contacts::Single(p(1.0, 1.0))));
    assert!(matches!(h.ctl.phase(), GesturePhase::Dragging(_)));

    h.feed(press(Contacts::Dual(p(1.0, 1.0), p(11.0, 1.0))));
    assert!(matches!(h.ctl.phase(), GesturePhase::Pinching(_)));

    h.feed(released(Contacts::Single(p(11.0, 1.0))));
    assert!(matches!(h.ctl.phase(), GesturePhase::Dragging(_)));

    h.feed(released(Contacts::None));
    assert_eq!(h.ctl.phase(), GesturePhase::Idle);

    h.feed(press(Contacts::Dual(p(0.0, 0.0), p(3.0, 4.0))));
    assert!(matches!(h.ctl.phase(), GesturePhase::Pinching(_)));
    h.feed(released(Contacts::None));
    assert_eq!(h.ctl.phase(), GesturePhase::Idle);
}

#[test]
fn idle_moves_do_not_start_a_gesture() {
    let mut h = Harness::new();
    let out = h.feed(moved(Contacts::Single(p(9.0, 9.0))));
    assert_eq!(out, GestureOutcome::default());
    assert_eq!(h.ctl.phase(), GesturePhase::Idle);
}

#[test]
fn pinch_to_drag_reanchors_without_jump() {
    let mut h = Harness::new();
    h.feed(press(Contacts::Single(p(100.0, 100.0))));
    h.feed(moved(Contacts::Single(p(140.0, 90.0))));
    assert_eq!(h.state.offset, Vec2::new(40.0, -10.0));

    h.feed(press(Contacts::Dual(p(140.0, 90.0), p(240.0, 90.0))));
    h.feed(moved(Contacts::Dual(p(140.0, 90.0), p(340.0, 90.0))));
    assert_eq!(h.state.scale, 2.0);

    let before = h.state.offset;
    let out = h.feed(released(Contacts::Single(p(340.0, 90.0))));
    assert_eq!(out.action, None);

    // The first move after re-anchoring lands exactly where the offset already was.
    h.feed(moved(Contacts::Single(p(340.0, 90.0))));
    assert_eq!(h.state.offset, before);

    // And further moves are relative to the remaining finger, not the first drag anchor.
    h.feed(moved(Contacts::Single(p(350.0, 100.0))));
    assert_eq!(h.state.offset, Vec2::new(50.0, 0.0));
}

#[test]
fn new_pinch_uses_current_scale_as_baseline() {
    let mut h = Harness::new();
    h.feed(press(Contacts::Dual(p(0.0, 0.0), p(100.0, 0.0))));
    h.feed(moved(Contacts::Dual(p(0.0, 0.0), p(200.0, 0.0))));
    h.feed(released(Contacts::None));
    assert_eq!(h.state.scale, 2.0);

    h.feed(press(Contacts::Dual(p(0.0, 0.0), p(100.0, 0.0))));
    h.feed(moved(Contacts::Dual(p(0.0, 0.0), p(200.0, 0.0))));
    assert_eq!(h.state.scale, 4.0);
}

#[test]
fn default_is_suppressed_only_while_a_gesture_is_active() {
    let mut h = Harness::new();
    assert!(h.feed(press(Contacts::Dual(p(0.0, 0.0), p(10.0, 0.0)))).suppress_default);
    assert!(h.feed(moved(Contacts::Dual(p(0.0, 0.0), p(20.0, 0.0)))).suppress_default);
    assert!(!h.feed(released(Contacts::None)).suppress_default);
}

#[test]
fn cancel_returns_to_idle() {
    let mut h = Harness::new();
    h.feed(press(Contacts::Single(p(0.0, 0.0))));
    h.ctl.cancel();
    assert_eq!(h.ctl.phase(), GesturePhase::Idle);
    assert_eq!(h.feed(moved(Contacts::Single(p(5.0, 5.0)))).action, None);
}
