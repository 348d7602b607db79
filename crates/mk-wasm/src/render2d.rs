//! Canvas2D painter.
//!
//! Replays a composed `Frame` onto an HTML `<canvas>` through
//! `CanvasRenderingContext2d`. Images are looked up per slot; a slot with
//! no decoded image is skipped.

use mk_core::Color;
use mk_render::{DrawOp, FontSpec, Frame, ImageSlot, TextMeasure};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Text measurement backed by the context's own font metrics.
pub struct CanvasMeasure<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasMeasure<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for CanvasMeasure<'_> {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        self.ctx.set_font(&font.css());
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(_) => {
                log::warn!("measure_text failed for {text:?}");
                0.0
            }
        }
    }
}

/// Paint every op in order. Returns the number of ops drawn.
pub fn render_frame<'i, F>(
    ctx: &CanvasRenderingContext2d,
    frame: &Frame,
    images: F,
) -> Result<usize, JsValue>
where
    F: Fn(ImageSlot) -> Option<&'i HtmlImageElement>,
{
    let mut painted = 0;
    for op in &frame.ops {
        match op {
            DrawOp::Fill { rect, color } => {
                fill(ctx, *color, rect.x0, rect.y0, rect.width(), rect.height());
                painted += 1;
            }
            DrawOp::Image {
                slot,
                transform,
                dest,
            } => {
                let Some(image) = images(*slot) else {
                    log::trace!("{slot:?} image not loaded, skipped");
                    continue;
                };
                let [a, b, c, d, e, f] = transform.as_coeffs();
                ctx.set_transform(a, b, c, d, e, f)?;
                ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    dest.x0,
                    dest.y0,
                    dest.width(),
                    dest.height(),
                )?;
                ctx.reset_transform()?;
                painted += 1;
            }
            DrawOp::Text {
                text,
                origin,
                font,
                color,
            } => {
                ctx.set_font(&font.css());
                ctx.set_text_baseline("top");
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_text(text, origin.x, origin.y)?;
                painted += 1;
            }
        }
    }
    Ok(painted)
}

fn fill(ctx: &CanvasRenderingContext2d, color: Color, x: f64, y: f64, w: f64, h: f64) {
    ctx.set_fill_style_str(&color.to_css());
    ctx.fill_rect(x, y, w, h);
}
