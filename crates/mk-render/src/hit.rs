//! Hit testing: pointer position → overlay.
//!
//! Pointer positions arrive relative to the canvas element's top-left
//! corner in screen pixels, so the overlay box is scaled by `canvas_scale`
//! before the comparison rather than un-scaling the pointer.

use mk_core::{CanvasInfo, OverlayCoords};

/// Whether a canvas-relative screen point lies strictly inside the overlay.
/// Points on the edge are outside; a box with zero or negative size
/// contains nothing.
pub fn overlay_contains(coords: &OverlayCoords, canvas: &CanvasInfo, mx: f64, my: f64) -> bool {
    let scale = canvas.canvas_scale;
    let ix = coords.x * scale;
    let iy = coords.y * scale;
    let iw = coords.width * scale;
    let ih = coords.height * scale;

    mx > ix && mx < ix + iw && my > iy && my < iy + ih
}
