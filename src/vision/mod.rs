//! Frame capture and hand detection seams
//!
//! The game only needs one point per frame: the index fingertip. Capture
//! backends implement [`FrameSource`], trackers implement [`HandDetector`].

pub mod pointer;
pub mod replay;

use anyhow::Result;

use crate::game::Point;

pub use pointer::{PointerCamera, PointerSample};
pub use replay::ReplaySource;

/// Landmark index of the index fingertip in a 21-point hand model
pub const INDEX_FINGER_TIP: usize = 8;

/// Number of landmarks reported per hand
pub const LANDMARK_COUNT: usize = 21;

/// A captured video frame
///
/// Pixel data stays with the capture backend; the game sees the frame
/// extent and, when the backend tracks one, the marker it follows.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub marker: Option<Point>,
}

impl Frame {
    pub fn new(width: u32, height: u32, marker: Option<Point>) -> Self {
        Self {
            width,
            height,
            marker,
        }
    }

    /// Mirror the frame left to right, so moving the hand right moves the snake right
    pub fn flip_horizontal(mut self) -> Self {
        let width = self.width as f64;
        self.marker = self.marker.map(|p| Point::new(width - p.x, p.y));
        self
    }
}

/// One hand landmark in frame pixels; `z` is relative depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    pub landmarks: Vec<Landmark>,
}

impl Hand {
    /// Screen position of the index fingertip, depth dropped
    pub fn index_tip(&self) -> Option<Point> {
        self.landmarks
            .get(INDEX_FINGER_TIP)
            .map(|lm| Point::new(lm.x, lm.y))
    }
}

/// Produces frames, once per loop iteration
pub trait FrameSource {
    /// Request a capture size
    fn configure(&mut self, width: u32, height: u32);

    /// Next frame, or `None` once the source has stopped producing frames
    fn read(&mut self) -> Result<Option<Frame>>;

    /// Latest pointer position for sources that follow the terminal pointer
    fn feed_pointer(&mut self, _sample: PointerSample) {}
}

/// Finds hands in a frame
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<Hand>;
}

/// Reports the frame's tracked marker as a single hand
///
/// Every landmark sits on the marker, so the fingertip is exactly where the
/// marker is.
pub struct MarkerDetector {
    max_hands: usize,
}

impl MarkerDetector {
    pub fn new(max_hands: usize) -> Self {
        Self { max_hands }
    }
}

impl Default for MarkerDetector {
    fn default() -> Self {
        Self::new(1)
    }
}

impl HandDetector for MarkerDetector {
    fn detect(&mut self, frame: &Frame) -> Vec<Hand> {
        frame
            .marker
            .map(|p| Hand {
                landmarks: vec![
                    Landmark {
                        x: p.x,
                        y: p.y,
                        z: 0.0,
                    };
                    LANDMARK_COUNT
                ],
            })
            .into_iter()
            .take(self.max_hands)
            .collect()
    }
}
