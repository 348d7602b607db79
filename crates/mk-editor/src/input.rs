//! Input abstraction layer.
//!
//! Mouse, touch, and pen events are normalized into one `InputEvent` enum
//! at the wasm boundary. Only the pointer id and client position matter
//! downstream, so the DOM `pointerType` is not carried.

use serde::Serialize;

/// Browser `pointerId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PointerId(pub i32);

/// A normalized input event. Coordinates are client (screen) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse button down, touch start, pen contact.
    PointerDown {
        id: PointerId,
        x: f64,
        y: f64,
    },

    /// Any pointer motion, pressed or hovering.
    PointerMove {
        id: PointerId,
        x: f64,
        y: f64,
    },

    PointerUp { id: PointerId },

    /// The browser took the pointer away (e.g. a scroll gesture began).
    PointerCancel { id: PointerId },

    /// Pointer left the canvas element.
    PointerLeave { id: PointerId },
}

/// Hover affordance for the canvas element. Serializes as its CSS value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cursor {
    #[default]
    #[serde(rename = "initial")]
    Default,
    #[serde(rename = "pointer")]
    Pointer,
}

/// What an input event changed, reported back to the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputResponse {
    /// The canvas needs a repaint.
    pub repaint: bool,
    /// New cursor affordance, when the event determined one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
    /// New overlay scale percentage after a pinch step, for syncing the
    /// slider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_percent: Option<f64>,
}
