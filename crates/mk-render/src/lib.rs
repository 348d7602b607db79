pub mod compose;
pub mod hit;
pub mod paint;

pub use compose::{
    CaptionBlock, DrawOp, FontSpec, Frame, ImageSlot, SceneInput, TextMeasure, compose,
};
pub use hit::overlay_contains;
