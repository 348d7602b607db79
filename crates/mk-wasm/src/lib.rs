//! WASM bridge for Memekit: exposes the meme session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns one
//! `MemeCanvas`, forwards DOM pointer events and form input to it, awaits
//! the loaders in [`web`] and calls `render` whenever a method reports that
//! the canvas changed.

mod render2d;
pub mod web;

use mk_core::{ImageSize, ImageSource, MemeConfig};
use mk_editor::input::{InputEvent, InputResponse, PointerId};
use mk_editor::loader::RequestToken;
use mk_editor::session::MemeSession;
use mk_render::ImageSlot;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// A decoded `<img>` element.
pub struct WebImage(HtmlImageElement);

impl ImageSource for WebImage {
    fn size(&self) -> ImageSize {
        ImageSize::new(
            self.0.natural_width() as f64,
            self.0.natural_height() as f64,
        )
    }
}

/// The WASM-facing meme editor.
///
/// Holds the session state. Pointer handlers return a JSON string
/// `{"repaint":bool, "cursor"?:"<css>", "scalePercent"?:number}`.
#[wasm_bindgen]
pub struct MemeCanvas {
    session: MemeSession<WebImage>,
}

#[wasm_bindgen]
impl MemeCanvas {
    /// Create an editor with the built-in defaults.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook_setup();
        Self {
            session: MemeSession::new(MemeConfig::default()),
        }
    }

    /// Create an editor from a JSON config. Missing fields take their
    /// defaults.
    pub fn with_config(json: &str) -> Result<MemeCanvas, JsValue> {
        console_error_panic_hook_setup();
        let config = MemeConfig::from_json(json).map_err(web::to_js)?;
        Ok(Self {
            session: MemeSession::new(config),
        })
    }

    // ─── Canvas metrics ──────────────────────────────────────────────────

    pub fn canvas_width(&self) -> f64 {
        self.session.config().canvas.width
    }

    pub fn canvas_height(&self) -> f64 {
        self.session.config().canvas.height
    }

    /// Feed the canvas element's bounding rect. Call on load and resize.
    pub fn set_canvas_rect(&mut self, left: f64, top: f64, width: f64) {
        self.session.set_canvas_rect(left, top, width);
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    pub fn handle_pointer_down(&mut self, pointer_id: i32, x: f64, y: f64) -> String {
        self.dispatch(InputEvent::PointerDown {
            id: PointerId(pointer_id),
            x,
            y,
        })
    }

    pub fn handle_pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> String {
        self.dispatch(InputEvent::PointerMove {
            id: PointerId(pointer_id),
            x,
            y,
        })
    }

    pub fn handle_pointer_up(&mut self, pointer_id: i32) -> String {
        self.dispatch(InputEvent::PointerUp {
            id: PointerId(pointer_id),
        })
    }

    pub fn handle_pointer_cancel(&mut self, pointer_id: i32) -> String {
        self.dispatch(InputEvent::PointerCancel {
            id: PointerId(pointer_id),
        })
    }

    pub fn handle_pointer_leave(&mut self, pointer_id: i32) -> String {
        self.dispatch(InputEvent::PointerLeave {
            id: PointerId(pointer_id),
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    // ─── Overlay size ────────────────────────────────────────────────────

    /// Slider input. Returns `true` if the canvas needs a repaint.
    pub fn set_scale_percent(&mut self, percent: f64) -> bool {
        self.session.set_scale_percent(percent)
    }

    pub fn scale_percent(&self) -> f64 {
        self.session.scale_percent()
    }

    /// Overlay placement as JSON `{"x","y","width","height"}`.
    pub fn overlay_coords_json(&self) -> String {
        serde_json::to_string(&self.session.overlay_coords()).unwrap_or_default()
    }

    // ─── Caption ─────────────────────────────────────────────────────────

    /// Returns `true` if the caption changed.
    pub fn set_caption(&mut self, text: &str) -> bool {
        self.session.set_caption(text)
    }

    /// Switch to a random preset caption. Returns `true` if the caption
    /// changed.
    pub fn random_caption(&mut self) -> bool {
        self.session.set_preset_caption(js_sys::Math::random())
    }

    /// Switch to the preset at `unit` in `[0, 1)`.
    pub fn preset_caption_at(&mut self, unit: f64) -> bool {
        self.session.set_preset_caption(unit)
    }

    pub fn caption(&self) -> String {
        self.session.caption().to_string()
    }

    pub fn caption_lines_json(&self) -> String {
        serde_json::to_string(self.session.caption_lines().lines()).unwrap_or_default()
    }

    pub fn font_family(&self) -> String {
        self.session.config().caption.font_family.clone()
    }

    pub fn font_url(&self) -> String {
        self.session.config().caption.font_url.clone()
    }

    // ─── Images ──────────────────────────────────────────────────────────

    /// URL for the next remote photo, chosen by weight.
    pub fn next_photo_url(&self) -> Option<String> {
        self.photo_url_at(js_sys::Math::random())
    }

    /// Weighted photo URL for a uniform `unit` in `[0, 1)`.
    pub fn photo_url_at(&self, unit: f64) -> Option<String> {
        self.session.config().photos.pick(unit).map(str::to_string)
    }

    pub fn overlay_src(&self) -> String {
        self.session.config().overlay.src.clone()
    }

    /// Reserve a token before awaiting a photo fetch or file load.
    pub fn begin_background_request(&mut self) -> u32 {
        self.session.begin_background().0
    }

    /// Install a decoded background. Returns `false` when a newer request
    /// has been started since `token` was issued.
    pub fn finish_background_request(&mut self, token: u32, image: HtmlImageElement) -> bool {
        self.session
            .finish_background(RequestToken(token), WebImage(image))
            .is_ok()
    }

    pub fn fail_background_request(&mut self, token: u32, reason: &str) {
        self.session.fail_background(RequestToken(token), reason);
    }

    /// Whether the newest background request failed.
    pub fn background_failed(&self) -> bool {
        self.session.background_failed()
    }

    pub fn set_overlay_image(&mut self, image: HtmlImageElement) {
        self.session.set_overlay_image(WebImage(image));
    }

    // ─── Render / export ─────────────────────────────────────────────────

    /// Repaint the whole canvas.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let measure = render2d::CanvasMeasure::new(ctx);
        let frame = self.session.frame(&measure);
        let painted = render2d::render_frame(ctx, &frame, |slot: ImageSlot| {
            self.session.image(slot).map(|image| &image.0)
        })?;
        log::trace!("painted {painted} of {} ops", frame.ops.len());
        Ok(())
    }

    pub fn export_filename(&self) -> String {
        self.session.config().export.filename.clone()
    }

    pub fn export_mime(&self) -> String {
        self.session.config().export.mime.clone()
    }
}

impl Default for MemeCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MemeCanvas {
    fn dispatch(&mut self, event: InputEvent) -> String {
        response_json(&self.session.handle_input(&event))
    }
}

fn response_json(response: &InputResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| r#"{"repaint":false}"#.to_string())
}

/// Whether a dropped file's MIME type is accepted as a background.
#[wasm_bindgen]
pub fn is_image_type(mime: &str) -> bool {
    mk_core::is_image_mime(mime)
}

/// Set up a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Memekit WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mk_editor::input::Cursor;
    use pretty_assertions::assert_eq;

    #[test]
    fn response_json_omits_empty_fields() {
        assert_eq!(
            response_json(&InputResponse::default()),
            r#"{"repaint":false}"#
        );
        let response = InputResponse {
            repaint: true,
            cursor: Some(Cursor::Pointer),
            scale_percent: Some(52.0),
        };
        assert_eq!(
            response_json(&response),
            r#"{"repaint":true,"cursor":"pointer","scalePercent":52.0}"#
        );
    }

    #[test]
    fn hover_outside_overlay_resets_cursor() {
        let mut canvas = MemeCanvas::new();
        canvas.set_canvas_rect(0.0, 0.0, 800.0);
        let json = canvas.handle_pointer_move(1, 10.0, 10.0);
        assert_eq!(json, r#"{"repaint":false,"cursor":"initial"}"#);
    }

    #[test]
    fn drag_round_trip_through_bridge() {
        let mut canvas = MemeCanvas::new();
        canvas.set_canvas_rect(0.0, 0.0, 800.0);
        // Default overlay spans x 500..~774, y ~302..800.
        canvas.handle_pointer_down(1, 600.0, 500.0);
        assert!(canvas.is_dragging());
        let json = canvas.handle_pointer_move(1, 610.0, 500.0);
        assert_eq!(json, r#"{"repaint":true,"cursor":"pointer"}"#);
        canvas.handle_pointer_leave(1);
        assert!(!canvas.is_dragging());
    }

    #[test]
    fn photo_pick_follows_weights() {
        let canvas = MemeCanvas::new();
        let first = canvas.photo_url_at(0.0);
        let second = canvas.photo_url_at(0.99);
        assert_eq!(
            first.as_deref(),
            Some("https://source.unsplash.com/800x800?people")
        );
        assert_eq!(
            second.as_deref(),
            Some("https://source.unsplash.com/800x800?group")
        );
    }

    #[test]
    fn preset_caption_follows_unit() {
        let mut canvas = MemeCanvas::new();
        assert!(canvas.preset_caption_at(0.0));
        assert_eq!(canvas.caption(), "Tohle jsme my");
        assert!(canvas.preset_caption_at(0.99));
        assert_eq!(canvas.caption(), "Makáme jako mourovatí");
        assert_eq!(
            canvas.caption_lines_json(),
            r#"["Makáme jako","mourovatí"]"#
        );
    }

    #[test]
    fn defaults_exposed_to_page() {
        let canvas = MemeCanvas::new();
        assert_eq!(canvas.export_filename(), "TohleJsmeMy.jpg");
        assert_eq!(canvas.export_mime(), "image/jpeg");
        assert_eq!(canvas.font_family(), "Bebas Neue");
        assert_eq!(canvas.canvas_width(), 800.0);
        assert!(is_image_type("image/webp"));
        assert!(!is_image_type("text/plain"));
    }
}
