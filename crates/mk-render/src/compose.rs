//! Scene compositor.
//!
//! Turns the current meme state into a flat display list. Painters (Canvas2D
//! in the browser, Vello natively) replay the list; the compositor itself
//! never touches a drawing surface, so the same state always produces the
//! same `Frame`.
//!
//! Paint order:
//!
//! 1. opaque background fill (transparent photos show this color)
//! 2. background photo, uniformly scaled to cover the canvas
//! 3. overlay graphic at its canvas-space coordinates
//! 4. caption lines, bottom line first, each as a highlight box plus text

use kurbo::{Affine, Point, Rect};
use mk_core::{CanvasSize, CaptionLines, CaptionStyle, Color, ImageSize, OverlayCoords};

/// Which image a `DrawOp::Image` refers to. Painters resolve the slot to
/// their own image handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    Background,
    Overlay,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl FontSpec {
    /// Canvas2D `font` shorthand, e.g. `60px 'Bebas Neue'`.
    pub fn css(&self) -> String {
        format!("{}px '{}'", self.size, self.family)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Color,
    },
    /// Draw the slot's image stretched into `dest`, under `transform`.
    Image {
        slot: ImageSlot,
        transform: Affine,
        dest: Rect,
    },
    /// Single line of text; `origin` is the top-left of the glyph box.
    Text {
        text: String,
        origin: Point,
        font: FontSpec,
        color: Color,
    },
}

/// One repaint worth of drawing commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub size: CanvasSize,
    pub ops: Vec<DrawOp>,
}

/// Text advance measurement, supplied by the platform.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64;
}

pub struct CaptionBlock<'a> {
    pub lines: &'a CaptionLines,
    pub style: &'a CaptionStyle,
}

/// Everything a repaint depends on.
pub struct SceneInput<'a> {
    pub canvas: CanvasSize,
    pub background_color: Color,
    /// Natural size of the current background photo, if one has loaded.
    pub background: Option<ImageSize>,
    /// Overlay placement, if the overlay graphic has loaded.
    pub overlay: Option<OverlayCoords>,
    pub caption: Option<CaptionBlock<'a>>,
}

/// Uniform factor that makes `src` cover `canvas`, cropping the excess.
/// `None` for an image that has not decoded.
pub fn cover_scale(canvas: CanvasSize, src: ImageSize) -> Option<f64> {
    if src.is_empty() {
        return None;
    }
    Some((canvas.width / src.width).max(canvas.height / src.height))
}

/// Build the display list for the current scene.
pub fn compose(input: &SceneInput<'_>, measure: &dyn TextMeasure) -> Frame {
    let canvas = input.canvas;
    let mut ops = Vec::new();

    ops.push(DrawOp::Fill {
        rect: Rect::new(0.0, 0.0, canvas.width, canvas.height),
        color: input.background_color,
    });

    if let Some(src) = input.background
        && let Some(scale) = cover_scale(canvas, src)
    {
        ops.push(DrawOp::Image {
            slot: ImageSlot::Background,
            transform: Affine::scale(scale),
            dest: Rect::new(0.0, 0.0, src.width, src.height),
        });
    }

    if let Some(coords) = input.overlay {
        ops.push(DrawOp::Image {
            slot: ImageSlot::Overlay,
            transform: Affine::IDENTITY,
            dest: Rect::new(
                coords.x,
                coords.y,
                coords.x + coords.width,
                coords.y + coords.height,
            ),
        });
    }

    if let Some(caption) = &input.caption {
        compose_caption(&mut ops, caption, measure);
    }

    log::trace!("composed frame with {} ops", ops.len());
    Frame {
        size: canvas,
        ops,
    }
}

fn compose_caption(ops: &mut Vec<DrawOp>, caption: &CaptionBlock<'_>, measure: &dyn TextMeasure) {
    let style = caption.style;
    if !style.enabled || caption.lines.is_empty() {
        return;
    }

    let font = FontSpec {
        family: style.font_family.clone(),
        size: style.font_size_for(caption.lines.len()),
    };
    let line_height = style.line_height(font.size);

    for (i, line) in caption.lines.render_order().enumerate() {
        let top = style.baseline_y - i as f64 * line_height;
        let width = measure.text_width(line, &font) + 2.0 * style.padding;

        ops.push(DrawOp::Fill {
            rect: Rect::new(style.x, top, style.x + width, top + line_height),
            color: style.highlight,
        });
        ops.push(DrawOp::Text {
            text: line.to_string(),
            origin: Point::new(style.x + style.padding, top + style.padding),
            font: font.clone(),
            color: style.text_color,
        });
    }
}
