use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{FoodSpec, GameConfig};
use super::geometry::{HitBox, Point};

/// The three kinds of food, in collision-check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Normal,
    Bonus,
    /// Time-limited hazard that costs points
    Poison,
}

impl fmt::Display for FoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Bonus => write!(f, "bonus"),
            Self::Poison => write!(f, "poison"),
        }
    }
}

/// A single food sprite on the field
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub kind: FoodKind,
    pub position: Point,
    pub spec: FoodSpec,
    pub visible: bool,
    /// When the item was last placed
    pub appeared_at: Instant,
}

impl FoodItem {
    pub fn hit_box(&self) -> HitBox {
        HitBox {
            center: self.position,
            half_width: self.spec.half_width() as f64,
            half_height: self.spec.half_height() as f64,
        }
    }
}

/// Holds one item per enabled food kind and decides where they go
#[derive(Debug, Clone, PartialEq)]
pub struct FoodManager {
    items: Vec<FoodItem>,
    frame_width: u32,
    frame_height: u32,
    poison_lifetime: Duration,
}

impl FoodManager {
    /// Create the enabled food items, all placed at a random position
    pub(crate) fn new<R: Rng>(config: &GameConfig, rng: &mut R, now: Instant) -> Self {
        let items = config
            .enabled_food()
            .into_iter()
            .map(|kind| FoodItem {
                kind,
                position: Point::default(),
                spec: *config.food_spec(kind),
                visible: true,
                appeared_at: now,
            })
            .collect();

        let mut manager = Self {
            items,
            frame_width: config.width,
            frame_height: config.height,
            poison_lifetime: config.poison_lifetime(),
        };
        manager.randomize_all(rng, now);
        manager
    }

    /// Move `kind` to a uniformly random spot that keeps its whole sprite on screen
    pub(crate) fn randomize<R: Rng>(&mut self, kind: FoodKind, rng: &mut R, now: Instant) {
        let (width, height) = (self.frame_width, self.frame_height);
        let Some(item) = self.item_mut(kind) else {
            return;
        };

        let (inset_x, inset_y) = (item.spec.half_width(), item.spec.half_height());
        let x = rng.gen_range(inset_x..width - inset_x);
        let y = rng.gen_range(inset_y..height - inset_y);

        item.position = Point::new(x as f64, y as f64);
        item.visible = true;
        item.appeared_at = now;
    }

    /// Re-place every item; poison reappears with a fresh visibility window
    pub(crate) fn randomize_all<R: Rng>(&mut self, rng: &mut R, now: Instant) {
        let kinds: Vec<FoodKind> = self.items.iter().map(|item| item.kind).collect();
        for kind in kinds {
            self.randomize(kind, rng, now);
        }
    }

    /// True iff `point` is strictly inside a visible item of this kind
    pub fn hit_test(&self, point: Point, kind: FoodKind) -> bool {
        self.item(kind)
            .is_some_and(|item| item.visible && item.hit_box().contains(point))
    }

    pub fn is_visible(&self, kind: FoodKind) -> bool {
        self.item(kind).is_some_and(|item| item.visible)
    }

    /// Hide an item until the next randomization
    pub fn hide(&mut self, kind: FoodKind) {
        if let Some(item) = self.item_mut(kind) {
            item.visible = false;
        }
    }

    /// Hide poison once it has been on screen longer than its lifetime
    pub fn tick_expiry(&mut self, now: Instant) {
        let lifetime = self.poison_lifetime;
        if let Some(poison) = self.item_mut(FoodKind::Poison) {
            if poison.visible && now.saturating_duration_since(poison.appeared_at) > lifetime {
                poison.visible = false;
            }
        }
    }

    pub fn item(&self, kind: FoodKind) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    fn item_mut(&mut self, kind: FoodKind) -> Option<&mut FoodItem> {
        self.items.iter_mut().find(|item| item.kind == kind)
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Place an item at an exact spot
    pub fn place(&mut self, kind: FoodKind, position: Point) {
        if let Some(item) = self.item_mut(kind) {
            item.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn manager(config: &GameConfig) -> (FoodManager, StdRng, Instant) {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Instant::now();
        (FoodManager::new(config, &mut rng, now), rng, now)
    }

    #[test]
    fn test_enabled_kinds() {
        let (food, _, _) = manager(&GameConfig::classic());
        assert_eq!(food.items().len(), 1);
        assert!(food.item(FoodKind::Bonus).is_none());

        let (food, _, _) = manager(&GameConfig::extended());
        assert_eq!(food.items().len(), 3);
    }

    #[test]
    fn test_positions_keep_sprite_on_screen() {
        let mut config = GameConfig::extended();
        config.bonus_food.width = 101;
        config.poison_food.height = 200;
        let (mut food, mut rng, now) = manager(&config);

        for _ in 0..1000 {
            food.randomize_all(&mut rng, now);
            for item in food.items() {
                let (hw, hh) = (item.spec.half_width() as f64, item.spec.half_height() as f64);
                assert!(item.position.x >= hw && item.position.x < config.width as f64 - hw);
                assert!(item.position.y >= hh && item.position.y < config.height as f64 - hh);
            }
        }
    }

    #[test]
    fn test_hit_test_centered() {
        let (mut food, _, _) = manager(&GameConfig::classic());
        let mut spec = food.items[0].spec;
        spec.width = 60;
        spec.height = 60;
        food.items[0].spec = spec;
        food.place(FoodKind::Normal, Point::new(500.0, 500.0));

        assert!(food.hit_test(Point::new(500.0, 500.0), FoodKind::Normal));
        assert!(!food.hit_test(Point::new(530.0, 500.0), FoodKind::Normal));
        assert!(!food.hit_test(Point::new(500.0, 500.0), FoodKind::Bonus));
    }

    #[test]
    fn test_poison_expires_after_lifetime() {
        let (mut food, _, now) = manager(&GameConfig::extended());
        assert!(food.is_visible(FoodKind::Poison));

        food.tick_expiry(now + Duration::from_secs(5));
        assert!(food.is_visible(FoodKind::Poison));

        food.tick_expiry(now + Duration::from_millis(5001));
        assert!(!food.is_visible(FoodKind::Poison));

        // Stays hidden until the next randomization
        food.tick_expiry(now + Duration::from_secs(60));
        assert!(!food.is_visible(FoodKind::Poison));
    }

    #[test]
    fn test_randomize_all_revives_poison() {
        let (mut food, mut rng, now) = manager(&GameConfig::extended());
        food.hide(FoodKind::Poison);
        let position = food.item(FoodKind::Poison).unwrap().position;
        assert!(!food.hit_test(position, FoodKind::Poison));

        let later = now + Duration::from_secs(30);
        food.randomize_all(&mut rng, later);
        let poison = food.item(FoodKind::Poison).unwrap();
        assert!(poison.visible);
        assert_eq!(poison.appeared_at, later);
    }
}
