//! Hand Snake - a snake steered by a tracked fingertip
//!
//! This library provides:
//! - Core game logic: trail, food, collisions and scoring (game module)
//! - Frame capture and hand detection seams (vision module)
//! - Sound effects (audio module)
//! - TUI rendering and input (render, input modules)
//! - The frame loop, interactive or headless (modes module)

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod vision;
