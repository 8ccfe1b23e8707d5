use super::*;
use crate::foundation::core::{Canvas, Vec2};

fn solid(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage::from_straight_rgba8(w, h, px.repeat((w * h) as usize)).unwrap()
}

fn small_surface() -> Surface {
    Surface::new(Canvas {
        width: 100,
        height: 100,
    })
}

fn transform(scale: f64, x: f64, y: f64) -> TransformState {
    TransformState {
        scale,
        offset: Vec2::new(x, y),
    }
}

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

#[test]
fn untouched_surface_is_transparent_and_uncomposited() {
    let s = small_surface();
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.composites(), 0);
    assert!(!s.has_composite());
}

#[test]
fn photo_lands_at_offset_with_scaled_size() {
    let mut s = small_surface();
    let photo = solid(10, 10, RED);
    let frame = solid(1, 1, CLEAR);
    CompositeRenderer::default().render(&mut s, &photo, &frame, &transform(2.0, 20.0, 30.0));

    assert_eq!(s.pixel(20, 30), RED);
    assert_eq!(s.pixel(39, 49), RED);
    assert_eq!(s.pixel(19, 30), CLEAR);
    assert_eq!(s.pixel(40, 30), CLEAR);
    assert_eq!(s.pixel(20, 29), CLEAR);
    assert_eq!(s.pixel(20, 50), CLEAR);
    assert_eq!(s.composites(), 1);
}

#[test]
fn identity_draw_reproduces_source_pixels_exactly() {
    let mut s = small_surface();
    let mut raw = Vec::new();
    for i in 0..(4u32 * 3) {
        raw.extend_from_slice(&[(i * 20) as u8, (255 - i * 20) as u8, 7, 255]);
    }
    let photo = PreparedImage::from_straight_rgba8(4, 3, raw).unwrap();
    let frame = solid(1, 1, CLEAR);
    CompositeRenderer::default().render(&mut s, &photo, &frame, &transform(1.0, 5.0, 6.0));

    for y in 0..3 {
        for x in 0..4 {
            assert_eq!(s.pixel(x + 5, y + 6), photo.pixel(x, y));
        }
    }
}

#[test]
fn opaque_frame_always_wins() {
    let frame = solid(2, 2, BLUE);
    let photo = solid(50, 50, RED);
    for t in [
        transform(1.0, 0.0, 0.0),
        transform(5.0, -13.5, 7.25),
        transform(0.5, 99.0, 99.0),
    ] {
        let mut s = small_surface();
        CompositeRenderer::default().render(&mut s, &photo, &frame, &t);
        assert!(s.data().chunks_exact(4).all(|px| px == BLUE));
    }
}

#[test]
fn transparent_frame_hole_shows_photo() {
    // Left column opaque blue, right column fully transparent.
    let frame = PreparedImage::from_straight_rgba8(2, 1, [BLUE, CLEAR].concat()).unwrap();
    let photo = solid(100, 100, RED);
    let mut s = small_surface();
    CompositeRenderer::default().render(&mut s, &photo, &frame, &transform(1.0, 0.0, 0.0));

    assert_eq!(s.pixel(0, 50), BLUE);
    assert_eq!(s.pixel(10, 10), BLUE);
    assert_eq!(s.pixel(99, 50), RED);
    assert_eq!(s.pixel(90, 90), RED);
}

#[test]
fn frame_is_stretched_to_fill_the_surface() {
    let frame = PreparedImage::from_straight_rgba8(
        2,
        2,
        [RED, BLUE, BLUE, RED].concat(),
    )
    .unwrap();
    let photo = solid(1, 1, CLEAR);
    let mut s = small_surface();
    CompositeRenderer::default().render(&mut s, &photo, &frame, &TransformState::default());

    assert_eq!(s.pixel(0, 0), RED);
    assert_eq!(s.pixel(99, 0), BLUE);
    assert_eq!(s.pixel(0, 99), BLUE);
    assert_eq!(s.pixel(99, 99), RED);
    assert!(s.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn photo_dragged_fully_outside_leaves_only_frame() {
    let photo = solid(10, 10, RED);
    let frame = solid(1, 1, CLEAR);
    let mut s = small_surface();
    CompositeRenderer::default().render(&mut s, &photo, &frame, &transform(1.0, -500.0, 900.0));
    assert!(s.data().iter().all(|&b| b == 0));
    assert!(s.has_composite());
}

#[test]
fn clear_color_is_applied_before_drawing() {
    let renderer = CompositeRenderer::new(RenderSettings {
        clear_rgba: Some([255, 255, 255, 255]),
    });
    let photo = solid(1, 1, CLEAR);
    let frame = solid(1, 1, CLEAR);
    let mut s = small_surface();
    renderer.render(&mut s, &photo, &frame, &TransformState::default());
    assert_eq!(s.pixel(42, 17), [255, 255, 255, 255]);
}

#[test]
fn redraw_replaces_previous_composite() {
    let photo = solid(10, 10, RED);
    let frame = solid(1, 1, CLEAR);
    let mut s = small_surface();
    let r = CompositeRenderer::default();
    r.render(&mut s, &photo, &frame, &transform(1.0, 0.0, 0.0));
    r.render(&mut s, &photo, &frame, &transform(1.0, 50.0, 50.0));

    assert_eq!(s.pixel(0, 0), CLEAR);
    assert_eq!(s.pixel(55, 55), RED);
    assert_eq!(s.composites(), 2);
}

#[test]
fn photo_rect_matches_scaled_natural_size() {
    let photo = solid(40, 30, RED);
    let r = photo_rect(&photo, &transform(2.5, -10.0, 4.0));
    assert_eq!(r, Rect::new(-10.0, 4.0, 90.0, 79.0));
}
