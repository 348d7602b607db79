//! Two-finger pinch detection.
//!
//! Keeps the live pointers in down order. While exactly two are active,
//! every move compares their horizontal separation with the previous one
//! and turns growth or shrinkage into a fixed scale step.

use crate::input::PointerId;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
}

pub struct GestureTracker {
    /// Active pointers in the order they went down.
    pointers: SmallVec<[PointerSample; 2]>,
    /// Separation seen on the previous two-pointer move. `None` whenever
    /// fewer than two pointers are down.
    prev_distance: Option<f64>,
    step: f64,
}

impl GestureTracker {
    /// `step` is the scale-percentage change per pinch move.
    pub fn new(step: f64) -> Self {
        Self {
            pointers: SmallVec::new(),
            prev_distance: None,
            step,
        }
    }

    pub fn active(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn previous_distance(&self) -> Option<f64> {
        self.prev_distance
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        self.pointers.push(sample);
    }

    /// Update the cached pointer and return the scale-percentage delta for
    /// this move, if it was a pinch step.
    pub fn pointer_move(&mut self, sample: PointerSample) -> Option<f64> {
        let slot = self.pointers.iter_mut().find(|p| p.id == sample.id)?;
        *slot = sample;

        if self.pointers.len() != 2 {
            return None;
        }

        let distance = (self.pointers[0].x - self.pointers[1].x).abs();
        let delta = match self.prev_distance {
            Some(prev) if prev > 0.0 && distance > prev => Some(self.step),
            Some(prev) if prev > 0.0 && distance < prev => Some(-self.step),
            _ => None,
        };
        self.prev_distance = Some(distance);

        if let Some(d) = delta {
            log::trace!("pinch step {d:+} (separation {distance})");
        }
        delta
    }

    /// Drop a released pointer. Unknown ids are ignored.
    pub fn pointer_up(&mut self, id: PointerId) {
        if let Some(pos) = self.pointers.iter().position(|p| p.id == id) {
            self.pointers.remove(pos);
        }
        if self.pointers.len() < 2 {
            self.prev_distance = None;
        }
    }
}
