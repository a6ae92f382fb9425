use std::time::{Duration, Instant};

use crate::game::{FoodKind, StepResult};

pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: i32,
    pub games_played: u32,
    /// Food eaten this round
    pub food_eaten: u32,
    /// Poison eaten this round
    pub poison_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            food_eaten: 0,
            poison_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.food_eaten = 0;
        self.poison_eaten = 0;
    }

    /// Fold one step into the counters
    pub fn record_step(&mut self, result: &StepResult) {
        for kind in &result.eaten {
            match kind {
                FoodKind::Normal | FoodKind::Bonus => self.food_eaten += 1,
                FoodKind::Poison => self.poison_eaten += 1,
            }
        }
        if result.collision.is_some() {
            self.on_game_over(result.score);
            if result.auto_reset {
                self.on_game_start();
            }
        }
    }

    pub fn on_game_over(&mut self, final_score: i32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(-4);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_record_step() {
        let mut metrics = GameMetrics::new();

        metrics.record_step(
            &StepResult {
                eaten: vec![FoodKind::Normal, FoodKind::Poison],
                ..Default::default()
            },
        );
        assert_eq!(metrics.food_eaten, 1);
        assert_eq!(metrics.poison_eaten, 1);

        metrics.record_step(
            &StepResult {
                collision: Some(CollisionType::Boundary),
                terminated: true,
                auto_reset: true,
                score: 7,
                ..Default::default()
            },
        );
        assert_eq!(metrics.high_score, 7);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.food_eaten, 0);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
