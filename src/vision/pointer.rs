use anyhow::Result;

use super::{Frame, FrameSource};
use crate::game::Point;

/// Pointer position relative to the play field: (0, 0) is its top-left
/// corner and (1, 1) its bottom-right. Values outside that range mean the
/// pointer is off the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub fx: f64,
    pub fy: f64,
}

impl PointerSample {
    /// Map a terminal cell onto a field occupying `width` x `height` cells at (`left`, `top`)
    pub fn from_cell(column: u16, row: u16, left: u16, top: u16, width: u16, height: u16) -> Self {
        let span = |v: u16| f64::from(v.max(1));
        Self {
            fx: (f64::from(column) - f64::from(left) + 0.5) / span(width),
            fy: (f64::from(row) - f64::from(top) + 0.5) / span(height),
        }
    }
}

/// Treats the terminal pointer as a webcam that tracks a single marker
///
/// Positions come out mirrored, the way a front-facing camera sees the
/// player, so the usual horizontal flip puts them back under the pointer.
/// A frame carries the marker only when the pointer has moved since the
/// previous frame; a resting pointer reads as no hand.
#[derive(Debug, Clone)]
pub struct PointerCamera {
    width: u32,
    height: u32,
    pending: Option<PointerSample>,
    last_reported: Option<PointerSample>,
}

impl PointerCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pending: None,
            last_reported: None,
        }
    }
}

impl FrameSource for PointerCamera {
    fn configure(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn read(&mut self) -> Result<Option<Frame>> {
        let (width, height) = (self.width as f64, self.height as f64);
        let sample = self.pending.take();
        if sample.is_some() {
            self.last_reported = sample;
        }
        let marker = sample.map(|s| Point::new(width - s.fx * width, s.fy * height));
        Ok(Some(Frame::new(self.width, self.height, marker)))
    }

    fn feed_pointer(&mut self, sample: PointerSample) {
        // Press and drag events can repeat the cell that was already reported
        if self.last_reported == Some(sample) {
            return;
        }
        self.pending = Some(sample);
    }
}
