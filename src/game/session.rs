use std::time::Instant;

use tracing::info;

use super::{
    config::GameConfig,
    engine::{GameEngine, StepResult},
    geometry::Point,
    state::GameState,
};
use crate::error::ConfigError;

/// One player's game: the rules engine plus the round it is playing
pub struct GameSession {
    engine: GameEngine,
    state: GameState,
}

impl GameSession {
    /// Validate `config` and start the first round
    pub fn new(config: GameConfig, now: Instant) -> Result<Self, ConfigError> {
        let mut engine = GameEngine::new(config)?;
        let state = engine.reset(now);
        Ok(Self { engine, state })
    }

    /// Feed the tracked fingertip for one frame
    pub fn update(&mut self, head: Point, now: Instant) -> StepResult {
        self.engine.step(&mut self.state, head, now)
    }

    /// Start over from the initial state, whatever phase the round is in
    pub fn reset(&mut self, now: Instant) {
        info!(score = self.state.score, "session reset");
        self.state = self.engine.reset(now);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }
}
