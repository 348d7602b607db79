//! Core data model for the meme canvas.
//!
//! Everything here lives in one of two coordinate systems:
//!
//! - **Canvas space**: the intrinsic pixel grid of the drawing surface
//!   (800×800 by default). Overlay coordinates are always canvas space.
//! - **Screen space**: client pixels as reported by pointer events. The
//!   `CanvasInfo` cached from the element's bounding box converts between
//!   the two.

use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_val(hi)? << 4 | hex_val(lo)?)
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(
                hex_pair(bytes[0], bytes[1])?,
                hex_pair(bytes[2], bytes[3])?,
                hex_pair(bytes[4], bytes[5])?,
            )),
            8 => Some(Self::rgba(
                hex_pair(bytes[0], bytes[1])?,
                hex_pair(bytes[2], bytes[3])?,
                hex_pair(bytes[4], bytes[5])?,
                hex_pair(bytes[6], bytes[7])?,
            )),
            _ => None,
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// CSS color string for Canvas2D fill styles.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            self.to_hex()
        } else {
            let alpha = self.a as f32 / 255.0;
            format!("rgba({}, {}, {}, {alpha:.3})", self.r, self.g, self.b)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

// ─── Sizes ───────────────────────────────────────────────────────────────

/// Natural pixel size of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// An image that has not decoded yet reports a zero dimension.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Intrinsic size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
        }
    }
}

/// Anything the session can hold as a background or overlay image.
///
/// The browser bridge implements this for decoded `<img>` elements; tests
/// use plain sizes.
pub trait ImageSource {
    fn size(&self) -> ImageSize;
}

impl ImageSource for ImageSize {
    fn size(&self) -> ImageSize {
        *self
    }
}

// ─── Overlay geometry ────────────────────────────────────────────────────

/// Overlay placement in canvas-space pixels.
///
/// Width and height may go to zero or negative through the scale input;
/// nothing clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayCoords {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OverlayCoords {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Cached on-screen placement of the canvas element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasInfo {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Displayed width / intrinsic width.
    pub canvas_scale: f64,
}

impl Default for CanvasInfo {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            canvas_scale: 1.0,
        }
    }
}

impl CanvasInfo {
    /// Derive from the element's bounding client rect.
    pub fn from_rect(left: f64, top: f64, displayed_width: f64, canvas: CanvasSize) -> Self {
        Self {
            offset_x: left,
            offset_y: top,
            canvas_scale: displayed_width / canvas.width,
        }
    }

    /// Client coordinates → coordinates relative to the canvas element's
    /// top-left corner (still screen-scaled).
    pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.offset_x, client_y - self.offset_y)
    }
}

// ─── Captions ────────────────────────────────────────────────────────────

/// Wrapped caption, in reading order (top line first).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptionLines {
    lines: Vec<String>,
}

impl CaptionLines {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` for no lines or a single empty line.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    /// Lines in paint order: the last wrapped line sits on the baseline and
    /// earlier lines stack upward from it.
    pub fn render_order(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().rev().map(String::as_str)
    }
}
