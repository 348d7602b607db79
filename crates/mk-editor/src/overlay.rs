//! Overlay placement: drag to move, slider or pinch to resize.
//!
//! Pointer positions come in as client pixels. They are made relative to
//! the canvas element with the cached `CanvasInfo` offsets, hit-tested
//! against the screen-scaled overlay box, and drag deltas are divided by
//! `canvas_scale` before touching the canvas-space coordinates.
//!
//! Nothing here clamps: the overlay may be dragged off-canvas or scaled
//! to zero or negative size.

use crate::input::{Cursor, PointerId};
use mk_core::{CanvasInfo, CanvasSize, ImageSize, OverlayConfig, OverlayCoords};
use mk_render::hit::overlay_contains;

pub struct OverlayController {
    coords: OverlayCoords,
    /// Natural size of the overlay graphic; the scale percentage is
    /// relative to it, which keeps the aspect ratio fixed.
    natural: ImageSize,
    scale_percent: f64,
    dragging: bool,
    /// Pointer whose down event recorded the start point.
    drag_pointer: Option<PointerId>,
    last_x: f64,
    last_y: f64,
}

impl OverlayController {
    pub fn new(natural: ImageSize, coords: OverlayCoords, scale_percent: f64) -> Self {
        Self {
            coords,
            natural,
            scale_percent,
            dragging: false,
            drag_pointer: None,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    pub fn from_config(config: &OverlayConfig, canvas: CanvasSize) -> Self {
        Self::new(
            config.natural,
            config.initial_coords(canvas),
            config.initial_percent(),
        )
    }

    pub fn coords(&self) -> OverlayCoords {
        self.coords
    }

    pub fn scale_percent(&self) -> f64 {
        self.scale_percent
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Hit-test a client-space point.
    pub fn contains(&self, canvas: &CanvasInfo, client_x: f64, client_y: f64) -> bool {
        let (mx, my) = canvas.to_local(client_x, client_y);
        overlay_contains(&self.coords, canvas, mx, my)
    }

    /// Record the start point and begin dragging if the point is on the
    /// overlay. Returns whether a drag started.
    pub fn pointer_down(
        &mut self,
        id: PointerId,
        canvas: &CanvasInfo,
        client_x: f64,
        client_y: f64,
    ) -> bool {
        let (mx, my) = canvas.to_local(client_x, client_y);
        if overlay_contains(&self.coords, canvas, mx, my) {
            self.dragging = true;
            log::debug!("overlay drag start at ({mx}, {my})");
        }
        self.drag_pointer = Some(id);
        self.last_x = mx;
        self.last_y = my;
        self.dragging
    }

    /// Translate the overlay while dragging. Returns whether the overlay
    /// moved, plus the hover cursor for the new position.
    pub fn pointer_move(
        &mut self,
        id: PointerId,
        canvas: &CanvasInfo,
        client_x: f64,
        client_y: f64,
    ) -> (bool, Cursor) {
        let (mx, my) = canvas.to_local(client_x, client_y);
        let cursor = if overlay_contains(&self.coords, canvas, mx, my) {
            Cursor::Pointer
        } else {
            Cursor::Default
        };

        if !self.dragging || self.drag_pointer != Some(id) {
            return (false, cursor);
        }

        let dx = mx - self.last_x;
        let dy = my - self.last_y;
        self.coords.x += dx / canvas.canvas_scale;
        self.coords.y += dy / canvas.canvas_scale;
        self.last_x = mx;
        self.last_y = my;
        log::trace!("overlay moved to ({}, {})", self.coords.x, self.coords.y);
        (true, cursor)
    }

    /// Any release ends the drag.
    pub fn pointer_up(&mut self) {
        if self.dragging {
            log::debug!("overlay drag end at ({}, {})", self.coords.x, self.coords.y);
        }
        self.dragging = false;
        self.drag_pointer = None;
    }

    /// Resize to `percent` of the natural size. Always needs a repaint.
    pub fn set_scale_percent(&mut self, percent: f64) -> bool {
        self.scale_percent = percent;
        self.coords.width = self.natural.width * percent / 100.0;
        self.coords.height = self.natural.height * percent / 100.0;
        true
    }
}
