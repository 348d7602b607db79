//! Frame → Vello drawing commands.
//!
//! Native counterpart of the browser's Canvas2D painter: replays a composed
//! `Frame` into a Vello `Scene` (fills and images).

use crate::compose::{DrawOp, Frame, ImageSlot};
use kurbo::{Affine, Rect};
use mk_core::Color;
use peniko::{Blob, Fill, Image, ImageFormat};
use std::collections::HashMap;
use vello::Scene;

/// Wrap raw RGBA8 pixels as a paintable image.
pub fn image_from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Image {
    Image::new(Blob::from(pixels), ImageFormat::Rgba8, width, height)
}

/// Paint a frame into `scene`, resolving image slots through `images`.
///
/// Call once per frame with a freshly-cleared `Scene`. Returns the number
/// of ops actually painted; ops whose image is missing are skipped.
pub fn paint_frame(scene: &mut Scene, frame: &Frame, images: &HashMap<ImageSlot, Image>) -> usize {
    let mut painted = 0;

    for op in &frame.ops {
        match op {
            DrawOp::Fill { rect, color } => {
                scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(*color), None, rect);
                painted += 1;
            }
            DrawOp::Image {
                slot,
                transform,
                dest,
            } => {
                let Some(image) = images.get(slot) else {
                    log::trace!("no image bound for {slot:?}");
                    continue;
                };
                if let Some(placement) = image_placement(image, *dest) {
                    scene.draw_image(image, *transform * placement);
                    painted += 1;
                }
            }
            DrawOp::Text { text, .. } => {
                // Glyph runs need a font context; caption text is only
                // rasterized by the browser painter.
                log::trace!("TEXT {text:?} skipped in native paint");
            }
        }
    }

    painted
}

/// Affine that maps the image's natural rect onto `dest`.
fn image_placement(image: &Image, dest: Rect) -> Option<Affine> {
    if image.width == 0 || image.height == 0 {
        return None;
    }
    let sx = dest.width() / image.width as f64;
    let sy = dest.height() / image.height as f64;
    Some(Affine::translate((dest.x0, dest.y0)) * Affine::scale_non_uniform(sx, sy))
}

fn to_peniko(color: Color) -> peniko::Color {
    peniko::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{FontSpec, SceneInput, TextMeasure, compose};
    use mk_core::{CanvasSize, ImageSize, OverlayCoords};

    struct Fixed;

    impl TextMeasure for Fixed {
        fn text_width(&self, _text: &str, _font: &FontSpec) -> f64 {
            100.0
        }
    }

    fn frame() -> Frame {
        compose(
            &SceneInput {
                canvas: CanvasSize::default(),
                background_color: Color::BLACK,
                background: Some(ImageSize::new(2.0, 2.0)),
                overlay: Some(OverlayCoords {
                    x: 10.0,
                    y: 10.0,
                    width: 4.0,
                    height: 4.0,
                }),
                caption: None,
            },
            &Fixed,
        )
    }

    #[test]
    fn paints_fill_and_bound_images() {
        let mut images = HashMap::new();
        images.insert(ImageSlot::Background, image_from_rgba(2, 2, vec![255; 16]));
        images.insert(ImageSlot::Overlay, image_from_rgba(2, 2, vec![0; 16]));

        let mut scene = Scene::new();
        assert_eq!(paint_frame(&mut scene, &frame(), &images), 3);
    }

    #[test]
    fn unbound_images_are_skipped() {
        let mut scene = Scene::new();
        assert_eq!(paint_frame(&mut scene, &frame(), &HashMap::new()), 1);
    }

    #[test]
    fn rgba_pixels_wrap_as_rgba8_image() {
        let image = image_from_rgba(3, 1, vec![7; 12]);
        assert_eq!(image.format, ImageFormat::Rgba8);
        assert_eq!((image.width, image.height), (3, 1));
        assert_eq!(image.data.data().len(), 12);
    }

    #[test]
    fn placement_stretches_into_dest() {
        let image = image_from_rgba(2, 4, vec![0; 32]);
        let placement = image_placement(&image, Rect::new(10.0, 20.0, 14.0, 22.0)).unwrap();
        assert_eq!(placement * kurbo::Point::new(2.0, 4.0), kurbo::Point::new(14.0, 22.0));
        assert_eq!(placement * kurbo::Point::ZERO, kurbo::Point::new(10.0, 20.0));
    }
}
