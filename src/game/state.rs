use super::food::FoodManager;
use super::geometry::Point;
use super::trail::Trail;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the frame
    Boundary,
    /// Head touched the older part of the trail
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub trail: Trail,
    pub food: FoodManager,
    /// May go negative after eating poison
    pub score: i32,
    /// Upper bound on the trail's total length; only grows within a round
    pub allowed_length: f64,
    pub phase: Phase,
    /// What ended the last round, kept for the game-over screen
    pub last_collision: Option<CollisionType>,
    /// Tracked frames processed this round
    pub frames: u32,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(food: FoodManager, allowed_length: f64, frame_width: u32, frame_height: u32) -> Self {
        Self {
            trail: Trail::new(),
            food,
            score: 0,
            allowed_length,
            phase: Phase::Playing,
            last_collision: None,
            frames: 0,
            frame_width,
            frame_height,
        }
    }

    /// Whether a point lies within the closed frame rectangle
    pub fn is_in_bounds(&self, p: Point) -> bool {
        p.x >= 0.0
            && p.x <= self.frame_width as f64
            && p.y >= 0.0
            && p.y <= self.frame_height as f64
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Instant;

    fn state() -> GameState {
        let config = GameConfig::default();
        let food = FoodManager::new(&config, &mut StdRng::seed_from_u64(1), Instant::now());
        GameState::new(food, 150.0, 1280, 720)
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert_eq!(state.phase, Phase::Playing);
        assert!(!state.is_over());
        assert!(state.trail.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_bounds_checking() {
        let state = state();

        assert!(state.is_in_bounds(Point::new(0.0, 0.0)));
        assert!(state.is_in_bounds(Point::new(1280.0, 720.0)));
        assert!(state.is_in_bounds(Point::new(640.0, 360.0)));
        assert!(!state.is_in_bounds(Point::new(-1.0, 0.0)));
        assert!(!state.is_in_bounds(Point::new(1280.5, 10.0)));
        assert!(!state.is_in_bounds(Point::new(10.0, 721.0)));
    }
}
