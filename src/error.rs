//! Startup errors: invalid configuration and unusable assets

use std::path::PathBuf;

use thiserror::Error;

use crate::game::FoodKind;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame must be non-empty, got {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },
    #[error("initial allowed length {0} must be non-negative")]
    NegativeLength(f64),
    #[error("poison lifetime must be non-zero when poison food is enabled")]
    ZeroPoisonLifetime,
    #[error(
        "{kind} sprite {width}x{height} does not fit inside the {frame_width}x{frame_height} frame"
    )]
    SpriteTooLarge {
        kind: FoodKind,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },
    #[error("{0} food growth must be non-negative")]
    NegativeGrowth(FoodKind),
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("sound file {path} not found")]
    Missing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("sound file {path} could not be decoded")]
    Undecodable {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("replay {path} is not a valid recording")]
    BadReplay {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
