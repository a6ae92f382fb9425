use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::food::FoodKind;
use crate::error::ConfigError;

/// Sprite extent and reward shaping for one food kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodSpec {
    /// Sprite width in pixels
    pub width: u32,
    /// Sprite height in pixels
    pub height: u32,
    /// Added to the score when eaten
    pub score: i32,
    /// Added to the allowed trail length when eaten
    pub growth: f64,
}

impl FoodSpec {
    /// Half the sprite width, rounded down
    pub fn half_width(&self) -> u32 {
        self.width / 2
    }

    /// Half the sprite height, rounded down
    pub fn half_height(&self) -> u32 {
        self.height / 2
    }
}

/// Optional features of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub bonus_food: bool,
    pub poison_food: bool,
    pub sound: bool,
    /// Leaving the frame ends the game
    pub boundary_death: bool,
    /// Touching the older trail ends the game
    pub self_collision: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        GameConfig::extended().capabilities
    }
}

/// Sound effect files; a synthesised tone is used for any that is missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoundPaths {
    pub eat: Option<PathBuf>,
    pub poison: Option<PathBuf>,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Allowed trail length at the start of every round
    pub initial_allowed_length: f64,

    pub normal_food: FoodSpec,
    pub bonus_food: FoodSpec,
    pub poison_food: FoodSpec,
    /// How long poison stays visible after it appears
    pub poison_lifetime_ms: u64,

    pub capabilities: Capabilities,
    /// Reset immediately on death instead of holding the game-over screen
    pub auto_reset_on_death: bool,
    /// Newest trail points left out of the self-collision outline
    pub self_collision_exclude: usize,
    /// Flip frames horizontally before detection
    pub mirror: bool,
    /// Seed for food placement; entropy when unset
    pub seed: Option<u64>,
    pub sounds: SoundPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::extended()
    }
}

impl GameConfig {
    /// Normal food only, self collision ends the game, silent
    pub fn classic() -> Self {
        Self {
            width: 1280,
            height: 720,
            initial_allowed_length: 150.0,
            normal_food: FoodSpec {
                width: 64,
                height: 64,
                score: 1,
                growth: 50.0,
            },
            bonus_food: FoodSpec {
                width: 64,
                height: 64,
                score: 2,
                growth: 100.0,
            },
            poison_food: FoodSpec {
                width: 64,
                height: 64,
                score: -2,
                growth: 0.0,
            },
            poison_lifetime_ms: 5000,
            capabilities: Capabilities {
                bonus_food: false,
                poison_food: false,
                sound: false,
                boundary_death: false,
                self_collision: true,
            },
            auto_reset_on_death: false,
            self_collision_exclude: 2,
            mirror: true,
            seed: None,
            sounds: SoundPaths::default(),
        }
    }

    /// All food kinds, sound, leaving the frame ends the game
    pub fn extended() -> Self {
        Self {
            capabilities: Capabilities {
                bonus_food: true,
                poison_food: true,
                sound: true,
                boundary_death: true,
                self_collision: false,
            },
            ..Self::classic()
        }
    }

    /// Override the frame size
    pub fn with_frame(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Read a JSON config file; missing fields fall back to the extended preset
    ///
    /// Nested objects may be partial too: `{"normal_food": {"score": 5}}`
    /// keeps the preset's sprite size and growth for normal food.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let overrides: Value = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        let mut merged =
            serde_json::to_value(Self::default()).context("Failed to serialize default config")?;
        merge_json(&mut merged, overrides);
        let config: GameConfig = serde_json::from_value(merged)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn food_spec(&self, kind: FoodKind) -> &FoodSpec {
        match kind {
            FoodKind::Normal => &self.normal_food,
            FoodKind::Bonus => &self.bonus_food,
            FoodKind::Poison => &self.poison_food,
        }
    }

    /// Food kinds present in a session, in collision-check order
    pub fn enabled_food(&self) -> Vec<FoodKind> {
        let mut kinds = vec![FoodKind::Normal];
        if self.capabilities.bonus_food {
            kinds.push(FoodKind::Bonus);
        }
        if self.capabilities.poison_food {
            kinds.push(FoodKind::Poison);
        }
        kinds
    }

    pub fn poison_lifetime(&self) -> Duration {
        Duration::from_millis(self.poison_lifetime_ms)
    }

    /// Check that every enabled sprite fits inside the frame
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        if self.initial_allowed_length.is_nan() || self.initial_allowed_length < 0.0 {
            return Err(ConfigError::NegativeLength(self.initial_allowed_length));
        }
        if self.capabilities.poison_food && self.poison_lifetime_ms == 0 {
            return Err(ConfigError::ZeroPoisonLifetime);
        }

        for kind in self.enabled_food() {
            let spec = self.food_spec(kind);
            // Placement range is [half, dim - half), which must not be empty
            if spec.half_width() * 2 >= self.width || spec.half_height() * 2 >= self.height {
                return Err(ConfigError::SpriteTooLarge {
                    kind,
                    width: spec.width,
                    height: spec.height,
                    frame_width: self.width,
                    frame_height: self.height,
                });
            }
            if spec.growth < 0.0 {
                return Err(ConfigError::NegativeGrowth(kind));
            }
        }

        Ok(())
    }
}

/// Overlay `overrides` onto `base`, descending into objects present in both
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.initial_allowed_length, 150.0);
        assert_eq!(config.poison_lifetime(), Duration::from_secs(5));
        assert_eq!(
            config.enabled_food(),
            vec![FoodKind::Normal, FoodKind::Bonus, FoodKind::Poison]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classic_config() {
        let config = GameConfig::classic();
        assert_eq!(config.enabled_food(), vec![FoodKind::Normal]);
        assert!(config.capabilities.self_collision);
        assert!(!config.capabilities.boundary_death);
        assert!(!config.capabilities.sound);
    }

    #[test]
    fn test_sprite_larger_than_frame_rejected() {
        let config = GameConfig::default().with_frame(60, 720);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpriteTooLarge { kind: FoodKind::Normal, .. })
        ));
    }

    #[test]
    fn test_zero_frame_rejected() {
        let config = GameConfig::default().with_frame(0, 720);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyFrame {
                width: 0,
                height: 720
            })
        );
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "width": 640, "height": 480, "auto_reset_on_death": true }}"#
        )
        .unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert!(config.auto_reset_on_death);
        assert_eq!(config.normal_food.score, 1);
    }

    #[test]
    fn test_load_partial_nested_objects() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "capabilities": {{ "sound": false }}, "normal_food": {{ "width": 40, "height": 40 }} }}"#
        )
        .unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        let extended = GameConfig::extended();
        assert!(!config.capabilities.sound);
        assert!(config.capabilities.poison_food);
        assert!(config.capabilities.boundary_death);
        assert_eq!((config.normal_food.width, config.normal_food.height), (40, 40));
        assert_eq!(config.normal_food.score, extended.normal_food.score);
        assert_eq!(config.normal_food.growth, extended.normal_food.growth);
        assert_eq!(config.bonus_food, extended.bonus_food);
    }

    #[test]
    fn test_partial_capabilities_deserialize() {
        let capabilities: Capabilities = serde_json::from_str(r#"{ "poison_food": false }"#).unwrap();
        assert_eq!(
            capabilities,
            Capabilities {
                poison_food: false,
                ..GameConfig::extended().capabilities
            }
        );
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "width": 32, "height": 32 }}"#).unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }
}
