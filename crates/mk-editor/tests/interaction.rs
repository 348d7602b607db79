//! Integration tests: pointer input → session state → composed frame
//! (mk-editor ↔ mk-render ↔ mk-core).

use mk_core::{ImageSize, MemeConfig, MemeError};
use mk_editor::input::{InputEvent, PointerId};
use mk_editor::loader::RequestToken;
use mk_editor::session::MemeSession;
use mk_render::{DrawOp, FontSpec, ImageSlot, TextMeasure};
use pretty_assertions::assert_eq;

struct Monospace;

impl TextMeasure for Monospace {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        text.chars().count() as f64 * font.size * 0.6
    }
}

fn session() -> MemeSession<ImageSize> {
    let mut session = MemeSession::new(MemeConfig::default());
    // 800px canvas shown at 400px, 50px from the left, 100px from the top.
    session.set_canvas_rect(50.0, 100.0, 400.0);
    session.set_overlay_image(ImageSize::new(493.0, 897.0));
    session
}

fn down(id: i32, x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown {
        id: PointerId(id),
        x,
        y,
    }
}

fn moved(id: i32, x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        id: PointerId(id),
        x,
        y,
    }
}

/// Client coordinates of the overlay's centre.
fn overlay_center_client(session: &MemeSession<ImageSize>) -> (f64, f64) {
    let info = session.canvas_info();
    let (cx, cy) = session.overlay_coords().center();
    (
        cx * info.canvas_scale + info.offset_x,
        cy * info.canvas_scale + info.offset_y,
    )
}

// ─── Drag ───────────────────────────────────────────────────────────────

#[test]
fn down_at_overlay_center_starts_drag() {
    let mut session = session();
    let (x, y) = overlay_center_client(&session);
    session.handle_input(&down(1, x, y));
    assert!(session.is_dragging());
}

#[test]
fn down_outside_overlay_does_not_drag() {
    let mut session = session();
    session.handle_input(&down(1, 60.0, 110.0));
    assert!(!session.is_dragging());
    let before = session.overlay_coords();
    let response = session.handle_input(&moved(1, 90.0, 150.0));
    assert!(!response.repaint);
    assert_eq!(session.overlay_coords(), before);
}

#[test]
fn drag_moves_by_screen_delta_over_scale() {
    let mut session = session();
    let before = session.overlay_coords();

    // Client (370, 280) is canvas (640, 360), inside the initial overlay.
    let (x0, y0) = (370.0, 280.0);
    let (x1, y1) = (400.0, 268.0);
    session.handle_input(&down(1, x0, y0));
    assert!(session.is_dragging());
    let response = session.handle_input(&moved(1, x1, y1));

    assert!(response.repaint);
    let scale = session.canvas_info().canvas_scale;
    let after = session.overlay_coords();
    assert_eq!(after.x, before.x + (x1 - x0) / scale);
    assert_eq!(after.y, before.y + (y1 - y0) / scale);
    assert_eq!(after.width, before.width);
}

#[test]
fn release_cancel_and_leave_all_end_drag() {
    for release in [
        InputEvent::PointerUp { id: PointerId(1) },
        InputEvent::PointerCancel { id: PointerId(1) },
        InputEvent::PointerLeave { id: PointerId(1) },
    ] {
        let mut session = session();
        let (x, y) = overlay_center_client(&session);
        session.handle_input(&down(1, x, y));
        session.handle_input(&release);
        assert!(!session.is_dragging());
        assert_eq!(session.active_pointers(), 0);
    }
}

// ─── Pinch ──────────────────────────────────────────────────────────────

#[test]
fn pinch_steps_scale_by_two() {
    let mut session = session();
    session.set_scale_percent(50.0);

    session.handle_input(&down(1, 60.0, 110.0));
    session.handle_input(&down(2, 100.0, 110.0));

    // First two-finger move only primes the distance.
    let response = session.handle_input(&moved(2, 110.0, 110.0));
    assert_eq!(response.scale_percent, None);

    let response = session.handle_input(&moved(2, 120.0, 110.0));
    assert!(response.repaint);
    assert_eq!(response.scale_percent, Some(52.0));

    session.handle_input(&moved(2, 130.0, 110.0));
    assert_eq!(session.scale_percent(), 54.0);

    let response = session.handle_input(&moved(2, 125.0, 110.0));
    assert_eq!(response.scale_percent, Some(52.0));

    let natural = session.config().overlay.natural;
    assert_eq!(session.overlay_coords().width, natural.width * 52.0 / 100.0);
    assert_eq!(session.overlay_coords().height, natural.height * 52.0 / 100.0);
}

#[test]
fn lifting_a_finger_resets_pinch_distance() {
    let mut session = session();
    session.handle_input(&down(1, 60.0, 110.0));
    session.handle_input(&down(2, 100.0, 110.0));
    session.handle_input(&moved(2, 110.0, 110.0));
    assert_eq!(session.pinch_distance(), Some(50.0));

    session.handle_input(&InputEvent::PointerUp { id: PointerId(2) });
    assert_eq!(session.pinch_distance(), None);
    assert_eq!(session.active_pointers(), 1);
}

#[test]
fn second_finger_does_not_drag() {
    let mut session = session();
    let (x, y) = overlay_center_client(&session);
    session.handle_input(&down(1, 60.0, 110.0));
    session.handle_input(&down(2, x, y));
    assert!(!session.is_dragging());
}

#[test]
fn slider_sets_absolute_size() {
    let mut session = session();
    assert!(session.set_scale_percent(100.0));
    assert_eq!(session.overlay_coords().width, 493.0);
    assert_eq!(session.overlay_coords().height, 897.0);
}

// ─── Background requests ────────────────────────────────────────────────

#[test]
fn newest_background_request_wins() {
    let mut session = session();
    let slow = session.begin_background();
    let fast = session.begin_background();

    session
        .finish_background(fast, ImageSize::new(1600.0, 1600.0))
        .unwrap();
    let err = session
        .finish_background(slow, ImageSize::new(10.0, 10.0))
        .unwrap_err();
    assert!(matches!(err, MemeError::StaleRequest { .. }));
    assert_eq!(
        session.image(ImageSlot::Background),
        Some(&ImageSize::new(1600.0, 1600.0))
    );
}

#[test]
fn failed_request_keeps_previous_background() {
    let mut session = session();
    let first = session.begin_background();
    session
        .finish_background(first, ImageSize::new(800.0, 800.0))
        .unwrap();

    let second = session.begin_background();
    session.fail_background(second, "HTTP 503");
    assert!(session.background_failed());
    assert_eq!(
        session.image(ImageSlot::Background),
        Some(&ImageSize::new(800.0, 800.0))
    );

    session.begin_background();
    assert!(!session.background_failed());
}

#[test]
fn unissued_token_cannot_install_background() {
    let mut session = session();
    let err = session
        .finish_background(RequestToken(0), ImageSize::new(10.0, 10.0))
        .unwrap_err();
    assert!(matches!(err, MemeError::StaleRequest { .. }));
    assert_eq!(session.image(ImageSlot::Background), None);
}

// ─── Repaint ────────────────────────────────────────────────────────────

#[test]
fn repaint_twice_is_identical() {
    let mut session = session();
    let token = session.begin_background();
    session
        .finish_background(token, ImageSize::new(1024.0, 768.0))
        .unwrap();
    session.set_caption("Tohle jsme my a je nám dobře");

    let first = session.frame(&Monospace);
    let second = session.frame(&Monospace);
    assert_eq!(first, second);
}

#[test]
fn frame_reflects_drag() {
    let mut session = session();
    let (x, y) = overlay_center_client(&session);
    session.handle_input(&down(1, x, y));
    session.handle_input(&moved(1, x + 10.0, y));
    let coords = session.overlay_coords();

    let frame = session.frame(&Monospace);
    let overlay = frame.ops.iter().find_map(|op| match op {
        DrawOp::Image {
            slot: ImageSlot::Overlay,
            dest,
            ..
        } => Some(*dest),
        _ => None,
    });
    assert_eq!(overlay.map(|d| d.x0), Some(coords.x));
}

#[test]
fn caption_lines_paint_bottom_up() {
    let mut session = session();
    session.set_caption("The quick brown fox jumps over the lazy dog");
    let frame = session.frame(&Monospace);
    let texts: Vec<&str> = frame
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["dog", "jumps over the lazy", "The quick brown fox"]);
}
