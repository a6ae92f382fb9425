//! Runs the frame loop without a terminal, for recordings and scripted checks

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use super::pipeline::{FrameOutcome, FramePipeline};
use crate::game::GameSession;
use crate::metrics::GameMetrics;

/// What happened over a whole run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u32,
    pub tracked_frames: u32,
    pub final_score: i32,
    pub high_score: i32,
    pub games_played: u32,
    pub food_eaten: u32,
    pub poison_eaten: u32,
    pub game_over: bool,
}

pub struct HeadlessMode {
    session: GameSession,
    pipeline: FramePipeline,
    metrics: GameMetrics,
}

impl HeadlessMode {
    pub fn new(session: GameSession, mut pipeline: FramePipeline) -> Self {
        let config = session.config();
        pipeline.configure(config.width, config.height);

        Self {
            session,
            pipeline,
            metrics: GameMetrics::new(),
        }
    }

    /// Drive the session until the source stops producing frames
    pub fn run(&mut self) -> Result<RunSummary> {
        self.run_with_clock(Instant::now)
    }

    /// Like [`run`](Self::run) with a caller-supplied clock, one reading per frame
    pub fn run_with_clock(&mut self, mut clock: impl FnMut() -> Instant) -> Result<RunSummary> {
        let mut frames = 0;
        let mut tracked_frames = 0;

        loop {
            match self
                .pipeline
                .advance(&mut self.session, &mut self.metrics, clock())?
            {
                FrameOutcome::SourceEnded => break,
                FrameOutcome::NoHand => {}
                FrameOutcome::Tracked(_) => tracked_frames += 1,
            }
            frames += 1;
        }

        let state = self.session.state();
        let summary = RunSummary {
            frames,
            tracked_frames,
            final_score: state.score,
            high_score: self.metrics.high_score.max(state.score),
            games_played: self.metrics.games_played,
            food_eaten: self.metrics.food_eaten,
            poison_eaten: self.metrics.poison_eaten,
            game_over: state.is_over(),
        };
        info!(?summary, "headless run finished");

        Ok(summary)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}
