pub mod config;
pub mod error;
pub mod model;
pub mod photo;
pub mod wrap;

pub use config::{CaptionStyle, MemeConfig, OverlayConfig};
pub use error::MemeError;
pub use model::*;
pub use photo::{PhotoSource, PhotoSources, is_image_mime};
pub use wrap::{TextWrapper, wrap_caption};
