//! Core game logic for the fingertip-steered snake
//!
//! Nothing in here touches the terminal, the camera or the speakers: a
//! session is fed one head position per tracked frame and reports what
//! happened.

pub mod config;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod session;
pub mod state;
pub mod trail;

// Re-export commonly used types
pub use config::{Capabilities, FoodSpec, GameConfig, SoundPaths};
pub use engine::{GameEngine, StepResult};
pub use food::{FoodItem, FoodKind, FoodManager};
pub use geometry::{HitBox, Point};
pub use session::GameSession;
pub use state::{CollisionType, GameState, Phase};
pub use trail::Trail;
