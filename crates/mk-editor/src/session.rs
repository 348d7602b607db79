//! Application state for one meme canvas.
//!
//! `MemeSession` owns every piece of mutable state the page needs (overlay
//! placement, live pointers, cached canvas metrics, caption, and the
//! current images) and funnels all changes through named methods. The wasm
//! bridge holds exactly one session per canvas.

use crate::gesture::{GestureTracker, PointerSample};
use crate::input::{InputEvent, InputResponse};
use crate::loader::{BackgroundSlot, RequestToken};
use crate::overlay::OverlayController;
use mk_core::{
    CanvasInfo, CaptionLines, ImageSource, MemeConfig, MemeError, OverlayCoords, wrap_caption,
};
use mk_render::{CaptionBlock, Frame, ImageSlot, SceneInput, TextMeasure, compose};

pub struct MemeSession<I> {
    config: MemeConfig,
    overlay: OverlayController,
    gestures: GestureTracker,
    canvas: CanvasInfo,
    caption: String,
    caption_lines: CaptionLines,
    background: BackgroundSlot<I>,
    overlay_image: Option<I>,
}

impl<I: ImageSource> MemeSession<I> {
    pub fn new(config: MemeConfig) -> Self {
        let overlay = OverlayController::from_config(&config.overlay, config.canvas);
        let gestures = GestureTracker::new(config.pinch_step);
        let caption_lines = wrap_caption("", config.caption.max_line_chars);

        Self {
            config,
            overlay,
            gestures,
            canvas: CanvasInfo::default(),
            caption: String::new(),
            caption_lines,
            background: BackgroundSlot::new(),
            overlay_image: None,
        }
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    // ─── Canvas metrics ──────────────────────────────────────────────────

    pub fn canvas_info(&self) -> CanvasInfo {
        self.canvas
    }

    /// Re-derive offsets and scale from the element's bounding rect. Call on
    /// load and on every viewport resize.
    pub fn set_canvas_rect(&mut self, left: f64, top: f64, displayed_width: f64) {
        self.canvas = CanvasInfo::from_rect(left, top, displayed_width, self.config.canvas);
        log::debug!(
            "canvas at ({left}, {top}), scale {}",
            self.canvas.canvas_scale
        );
    }

    // ─── Overlay ─────────────────────────────────────────────────────────

    pub fn overlay_coords(&self) -> OverlayCoords {
        self.overlay.coords()
    }

    pub fn is_dragging(&self) -> bool {
        self.overlay.is_dragging()
    }

    pub fn scale_percent(&self) -> f64 {
        self.overlay.scale_percent()
    }

    /// Slider input. Returns whether a repaint is needed.
    pub fn set_scale_percent(&mut self, percent: f64) -> bool {
        self.overlay.set_scale_percent(percent)
    }

    pub fn active_pointers(&self) -> usize {
        self.gestures.active()
    }

    pub fn pinch_distance(&self) -> Option<f64> {
        self.gestures.previous_distance()
    }

    /// Route a pointer event to the gesture tracker and the overlay.
    ///
    /// Only the first pointer down may start a drag; a second finger joins
    /// the pinch without disturbing it.
    pub fn handle_input(&mut self, event: &InputEvent) -> InputResponse {
        match *event {
            InputEvent::PointerDown { id, x, y, .. } => {
                let first = self.gestures.is_empty();
                self.gestures.pointer_down(PointerSample { id, x, y });
                if first {
                    self.overlay.pointer_down(id, &self.canvas, x, y);
                }
                InputResponse::default()
            }
            InputEvent::PointerMove { id, x, y, .. } => {
                let mut response = InputResponse::default();

                if let Some(delta) = self.gestures.pointer_move(PointerSample { id, x, y }) {
                    let percent = self.overlay.scale_percent() + delta;
                    response.repaint |= self.overlay.set_scale_percent(percent);
                    response.scale_percent = Some(percent);
                }

                let (moved, cursor) = self.overlay.pointer_move(id, &self.canvas, x, y);
                response.repaint |= moved;
                response.cursor = Some(cursor);
                response
            }
            InputEvent::PointerUp { id }
            | InputEvent::PointerCancel { id }
            | InputEvent::PointerLeave { id } => {
                self.gestures.pointer_up(id);
                self.overlay.pointer_up();
                InputResponse::default()
            }
        }
    }

    // ─── Caption ─────────────────────────────────────────────────────────

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn caption_lines(&self) -> &CaptionLines {
        &self.caption_lines
    }

    /// Replace the caption. Returns whether it changed.
    pub fn set_caption(&mut self, text: &str) -> bool {
        if self.caption == text {
            return false;
        }
        self.caption = text.to_string();
        self.caption_lines = wrap_caption(text, self.config.caption.max_line_chars);
        log::debug!("caption wrapped to {} lines", self.caption_lines.len());
        true
    }

    /// Replace the caption with a configured preset chosen by `unit`
    /// (uniform in `[0, 1)`). Returns whether the caption changed.
    pub fn set_preset_caption(&mut self, unit: f64) -> bool {
        let Some(preset) = self.config.caption.pick_preset(unit) else {
            return false;
        };
        let preset = preset.to_string();
        self.set_caption(&preset)
    }

    // ─── Images ──────────────────────────────────────────────────────────

    /// Reserve a token for a new background fetch or file load.
    pub fn begin_background(&mut self) -> RequestToken {
        self.background.begin()
    }

    /// Install a decoded background. Stale tokens are rejected and the
    /// current background stays.
    pub fn finish_background(&mut self, token: RequestToken, image: I) -> Result<(), MemeError> {
        self.background.complete(token, image)
    }

    pub fn fail_background(&mut self, token: RequestToken, reason: &str) {
        self.background.fail(token, reason);
    }

    /// The newest background request failed and none has started since.
    pub fn background_failed(&self) -> bool {
        self.background.last_failed().is_some()
    }

    pub fn set_overlay_image(&mut self, image: I) {
        self.overlay_image = Some(image);
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&I> {
        match slot {
            ImageSlot::Background => self.background.current(),
            ImageSlot::Overlay => self.overlay_image.as_ref(),
        }
    }

    // ─── Repaint ─────────────────────────────────────────────────────────

    pub fn scene_input(&self) -> SceneInput<'_> {
        SceneInput {
            canvas: self.config.canvas,
            background_color: self.config.background,
            background: self.background.current().map(|image| image.size()),
            overlay: self.overlay_image.as_ref().map(|_| self.overlay.coords()),
            caption: Some(CaptionBlock {
                lines: &self.caption_lines,
                style: &self.config.caption,
            }),
        }
    }

    /// Compose the current scene.
    pub fn frame(&self, measure: &dyn TextMeasure) -> Frame {
        compose(&self.scene_input(), measure)
    }
}
