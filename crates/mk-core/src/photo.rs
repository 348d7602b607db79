//! Background photo sources and the file-type filter for user images.

use serde::{Deserialize, Serialize};

/// One remote photo query and its relative weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSource {
    pub url: String,
    pub weight: u32,
}

impl PhotoSource {
    pub fn new(url: impl Into<String>, weight: u32) -> Self {
        Self {
            url: url.into(),
            weight,
        }
    }
}

/// Weighted list of photo queries. A pick behaves like choosing uniformly
/// from the list with every entry repeated `weight` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoSources(Vec<PhotoSource>);

impl Default for PhotoSources {
    fn default() -> Self {
        Self(vec![
            PhotoSource::new("https://source.unsplash.com/800x800?people", 10),
            PhotoSource::new("https://source.unsplash.com/800x800?group", 5),
        ])
    }
}

impl PhotoSources {
    pub fn new(sources: Vec<PhotoSource>) -> Self {
        Self(sources)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.0.iter().map(|s| s.weight as u64).sum()
    }

    /// Map `unit` (uniform in `[0, 1)`, e.g. `Math.random()`) onto the
    /// weighted list. Out-of-range input is clamped. Returns `None` when
    /// every weight is zero.
    pub fn pick(&self, unit: f64) -> Option<&str> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let unit = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
        let slot = ((unit * total as f64).floor() as u64).min(total - 1);

        let mut cumulative = 0u64;
        for source in &self.0 {
            cumulative += source.weight as u64;
            if slot < cumulative {
                return Some(&source.url);
            }
        }
        None
    }
}

/// Only files whose MIME type is `image/*` are accepted as backgrounds.
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}
