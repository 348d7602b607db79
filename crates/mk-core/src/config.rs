//! Runtime configuration.
//!
//! Every field defaults to the stock meme layout, so an empty JSON object
//! (or no config at all) reproduces the standard canvas. Pages that want a
//! different overlay, caption style, or photo feed pass a partial JSON
//! document to [`MemeConfig::from_json`].

use crate::error::MemeError;
use crate::model::{CanvasSize, Color, ImageSize, OverlayCoords};
use crate::photo::PhotoSources;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeConfig {
    /// Intrinsic canvas size.
    pub canvas: CanvasSize,
    /// Fill behind the photo; shows through transparent images.
    pub background: Color,
    pub overlay: OverlayConfig,
    pub caption: CaptionStyle,
    pub photos: PhotoSources,
    /// Scale-percentage change per pinch step.
    pub pinch_step: f64,
    pub export: ExportConfig,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            background: Color::BLACK,
            overlay: OverlayConfig::default(),
            caption: CaptionStyle::default(),
            photos: PhotoSources::default(),
            pinch_step: 2.0,
            export: ExportConfig::default(),
        }
    }
}

impl MemeConfig {
    /// Parse a (possibly partial) JSON config. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, MemeError> {
        let config: MemeConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "config loaded: canvas {}x{}, {} photo sources",
            config.canvas.width,
            config.canvas.height,
            config.photos.len()
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), MemeError> {
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(MemeError::Config("canvas size must be positive".into()));
        }
        if self.overlay.descale <= 0.0 {
            return Err(MemeError::Config("overlay descale must be positive".into()));
        }
        if self.photos.is_empty() {
            return Err(MemeError::Config("at least one photo source is required".into()));
        }
        Ok(())
    }
}

// ─── Overlay ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Image URL the page loads for the overlay graphic.
    pub src: String,
    /// Natural pixel size of the overlay graphic.
    pub natural: ImageSize,
    /// The overlay starts at `natural / descale`.
    pub descale: f64,
    /// Initial left edge in canvas space. The bottom edge starts flush with
    /// the canvas bottom.
    pub x: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            src: "public/janecek.png".into(),
            natural: ImageSize::new(493.0, 897.0),
            descale: 1.8,
            x: 500.0,
        }
    }
}

impl OverlayConfig {
    pub fn initial_coords(&self, canvas: CanvasSize) -> OverlayCoords {
        let width = self.natural.width / self.descale;
        let height = self.natural.height / self.descale;
        OverlayCoords {
            x: self.x,
            y: canvas.height - height,
            width,
            height,
        }
    }

    /// Scale percentage matching [`initial_coords`](Self::initial_coords).
    pub fn initial_percent(&self) -> f64 {
        100.0 / self.descale
    }
}

// ─── Caption ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    pub enabled: bool,
    /// Wrap width in characters.
    pub max_line_chars: usize,
    /// Left edge of every highlight box.
    pub x: f64,
    /// Top of the bottom-most highlight box.
    pub baseline_y: f64,
    pub padding: f64,
    pub font_family: String,
    /// Font file the page registers under `font_family`.
    pub font_url: String,
    pub font_size: f64,
    /// Used once the caption wraps to `small_font_min_lines` or more.
    pub small_font_size: f64,
    pub small_font_min_lines: usize,
    pub highlight: Color,
    pub text_color: Color,
    /// Captions offered when the user has not typed one.
    pub presets: Vec<String>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            max_line_chars: 20,
            x: 30.0,
            baseline_y: 685.0,
            padding: 15.0,
            font_family: "Bebas Neue".into(),
            font_url: "public/BebasNeue-Bold.ttf".into(),
            font_size: 60.0,
            small_font_size: 40.0,
            small_font_min_lines: 5,
            highlight: Color::rgb(0xf9, 0xdc, 0x4d),
            text_color: Color::BLACK,
            presets: vec![
                "Tohle jsme my".into(),
                "Tohle jsme my a je nám dobře".into(),
                "Když to nejde po dobrém, tak to jde po našem".into(),
                "Makáme jako mourovatí".into(),
            ],
        }
    }
}

impl CaptionStyle {
    pub fn font_size_for(&self, line_count: usize) -> f64 {
        if line_count < self.small_font_min_lines {
            self.font_size
        } else {
            self.small_font_size
        }
    }

    pub fn line_height(&self, font_size: f64) -> f64 {
        self.padding + font_size
    }

    /// Map `unit` (uniform in `[0, 1)`) onto the preset list with equal
    /// odds. Out-of-range input is clamped. `None` when there are no
    /// presets.
    pub fn pick_preset(&self, unit: f64) -> Option<&str> {
        let last = self.presets.len().checked_sub(1)?;
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        let index = ((unit * self.presets.len() as f64).floor() as usize).min(last);
        Some(&self.presets[index])
    }
}

// ─── Export ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub filename: String,
    /// Encoding requested from the canvas.
    pub mime: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "TohleJsmeMy.jpg".into(),
            mime: "image/jpeg".into(),
        }
    }
}
