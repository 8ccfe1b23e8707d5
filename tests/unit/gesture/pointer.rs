use super::*;

#[test]
fn contacts_keep_first_two_points() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(3.0, 4.0);
    let c = Point::new(5.0, 6.0);
    assert_eq!(Contacts::from_points(&[]), Contacts::None);
    assert_eq!(Contacts::from_points(&[a]), Contacts::Single(a));
    assert_eq!(Contacts::from_points(&[a, b, c]), Contacts::Dual(a, b));
    assert_eq!(Contacts::from_points(&[a, b, c]).count(), 2);
}

#[test]
fn mouse_hover_moves_are_ignored() {
    let mut m = MouseAdapter::new();
    assert_eq!(m.translate(MouseInput::Move { at: Point::new(5.0, 5.0) }), None);

    let down = m.translate(MouseInput::Down { at: Point::new(1.0, 1.0) }).unwrap();
    assert_eq!(down.kind, PointerKind::Pressed);

    let moved = m.translate(MouseInput::Move { at: Point::new(2.0, 3.0) }).unwrap();
    assert_eq!(moved.contacts, Contacts::Single(Point::new(2.0, 3.0)));

    let up = m.translate(MouseInput::Up).unwrap();
    assert_eq!(up.contacts, Contacts::None);
    assert_eq!(m.translate(MouseInput::Move { at: Point::new(9.0, 9.0) }), None);
}

#[test]
fn mouse_leave_cancels_only_an_active_press() {
    let mut m = MouseAdapter::new();
    assert_eq!(m.translate(MouseInput::Leave), None);

    m.translate(MouseInput::Down { at: Point::ZERO });
    let ev = m.translate(MouseInput::Leave).unwrap();
    assert_eq!(ev.kind, PointerKind::Cancelled);
    assert_eq!(ev.contacts, Contacts::None);
}

#[test]
fn touch_cancel_drops_all_contacts() {
    let t = TouchInput {
        phase: TouchPhase::Cancel,
        touches: vec![Point::new(1.0, 1.0)],
    };
    let ev = t.to_pointer_event();
    assert_eq!(ev.kind, PointerKind::Cancelled);
    assert_eq!(ev.contacts, Contacts::None);
}

#[test]
fn touch_end_reports_remaining_touches() {
    let t = TouchInput {
        phase: TouchPhase::End,
        touches: vec![Point::new(7.0, 8.0)],
    };
    let ev = t.to_pointer_event();
    assert_eq!(ev.kind, PointerKind::Released);
    assert_eq!(ev.contacts, Contacts::Single(Point::new(7.0, 8.0)));
}
