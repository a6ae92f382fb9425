use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use crate::audio::{SoundEffect, SoundPlayer};
use crate::game::{GameSession, StepResult};
use crate::metrics::GameMetrics;
use crate::vision::{FrameSource, HandDetector, PointerSample};

/// What one loop iteration did
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The source produced no frame; the loop should stop
    SourceEnded,
    /// No hand in the frame, the game was left untouched
    NoHand,
    Tracked(StepResult),
}

/// Capture, flip, detect, update: one camera frame's worth of work
pub struct FramePipeline {
    source: Box<dyn FrameSource>,
    detector: Box<dyn HandDetector>,
    sound: Box<dyn SoundPlayer>,
    mirror: bool,
}

impl FramePipeline {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn HandDetector>,
        sound: Box<dyn SoundPlayer>,
        mirror: bool,
    ) -> Self {
        Self {
            source,
            detector,
            sound,
            mirror,
        }
    }

    /// Size the source's frames to match the game field
    pub fn configure(&mut self, width: u32, height: u32) {
        self.source.configure(width, height);
    }

    pub fn advance(
        &mut self,
        session: &mut GameSession,
        metrics: &mut GameMetrics,
        now: Instant,
    ) -> Result<FrameOutcome> {
        let Some(mut frame) = self.source.read().context("Failed to read frame")? else {
            info!("frame source exhausted");
            return Ok(FrameOutcome::SourceEnded);
        };

        if self.mirror {
            frame = frame.flip_horizontal();
        }

        let hands = self.detector.detect(&frame);
        let Some(tip) = hands.first().and_then(|hand| hand.index_tip()) else {
            return Ok(FrameOutcome::NoHand);
        };

        let result = session.update(tip, now);
        for &kind in &result.eaten {
            self.sound.play(SoundEffect::for_food(kind));
        }
        metrics.record_step(&result);

        Ok(FrameOutcome::Tracked(result))
    }

    pub fn feed_pointer(&mut self, sample: PointerSample) {
        self.source.feed_pointer(sample);
    }

    pub fn toggle_mirror(&mut self) {
        self.mirror = !self.mirror;
    }

    pub fn mirror(&self) -> bool {
        self.mirror
    }
}
