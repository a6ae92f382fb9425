use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    food::{FoodKind, FoodManager},
    geometry::Point,
    state::{CollisionType, GameState, Phase},
};
use crate::error::ConfigError;

/// Result of feeding one tracked head position into the game
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    /// Food eaten this step, in check order
    pub eaten: Vec<FoodKind>,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Whether the round has ended
    pub terminated: bool,
    /// Whether the round was restarted within this step
    pub auto_reset: bool,
    /// Score at the end of the step, before any restart
    pub score: i32,
}

/// Collision and scoring rules applied to a [`GameState`]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine, rejecting configs whose food cannot be placed
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh round: empty trail, new food, zero score
    pub fn reset(&mut self, now: Instant) -> GameState {
        let food = FoodManager::new(&self.config, &mut self.rng, now);
        GameState::new(
            food,
            self.config.initial_allowed_length,
            self.config.width,
            self.config.height,
        )
    }

    /// Advance the round by one tracked frame with the fingertip at `head`
    pub fn step(&mut self, state: &mut GameState, head: Point, now: Instant) -> StepResult {
        if state.phase == Phase::GameOver {
            return StepResult {
                terminated: true,
                score: state.score,
                ..Default::default()
            };
        }

        state.trail.append(head);
        state.trail.trim(state.allowed_length);
        state.frames += 1;

        if self.config.capabilities.boundary_death && !state.is_in_bounds(head) {
            return self.end_round(state, CollisionType::Boundary, Vec::new(), now);
        }

        let mut eaten = Vec::new();
        for kind in self.config.enabled_food() {
            if state.food.hit_test(head, kind) {
                self.eat(state, kind, now);
                eaten.push(kind);
            }
        }

        state.food.tick_expiry(now);

        if self.config.capabilities.self_collision
            && state.trail.self_intersects(self.config.self_collision_exclude)
        {
            return self.end_round(state, CollisionType::SelfCollision, eaten, now);
        }

        StepResult {
            eaten,
            score: state.score,
            ..Default::default()
        }
    }

    fn eat(&mut self, state: &mut GameState, kind: FoodKind, now: Instant) {
        let spec = *self.config.food_spec(kind);

        match kind {
            FoodKind::Normal | FoodKind::Bonus => {
                state.food.randomize_all(&mut self.rng, now);
                state.allowed_length += spec.growth;
            }
            FoodKind::Poison => state.food.hide(FoodKind::Poison),
        }
        state.score += spec.score;

        debug!(%kind, score = state.score, allowed_length = state.allowed_length, "food eaten");
    }

    fn end_round(
        &mut self,
        state: &mut GameState,
        collision: CollisionType,
        eaten: Vec<FoodKind>,
        now: Instant,
    ) -> StepResult {
        info!(?collision, score = state.score, frames = state.frames, "game over");

        let score = state.score;
        let auto_reset = self.config.auto_reset_on_death;
        if auto_reset {
            *state = self.reset(now);
        } else {
            state.phase = Phase::GameOver;
        }
        state.last_collision = Some(collision);

        StepResult {
            eaten,
            collision: Some(collision),
            terminated: true,
            auto_reset,
            score,
        }
    }
}
