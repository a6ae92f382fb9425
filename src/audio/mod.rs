//! Fire-and-forget sound effects

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rodio::buffer::SamplesBuffer;
use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Source};
use tracing::warn;

use crate::error::AssetError;
use crate::game::{FoodKind, SoundPaths};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Eat,
    Poison,
}

impl SoundEffect {
    /// Effect triggered by eating `kind`
    pub fn for_food(kind: FoodKind) -> Self {
        match kind {
            FoodKind::Normal | FoodKind::Bonus => Self::Eat,
            FoodKind::Poison => Self::Poison,
        }
    }
}

pub trait SoundPlayer {
    /// Start playing `effect` without waiting for it to finish
    fn play(&self, effect: SoundEffect);
}

/// Plays nothing; used when sound is disabled or muted
#[derive(Debug, Default)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, _effect: SoundEffect) {}
}

/// A fully decoded clip, cheap to replay
#[derive(Debug, Clone)]
struct Clip {
    channels: u16,
    sample_rate: u32,
    samples: Vec<f32>,
}

impl Clip {
    fn decode(path: &Path) -> Result<Self, AssetError> {
        let file = File::open(path).map_err(|source| AssetError::Missing {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder =
            Decoder::new(BufReader::new(file)).map_err(|source| AssetError::Undecodable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            channels: decoder.channels(),
            sample_rate: decoder.sample_rate(),
            samples: decoder.convert_samples().collect(),
        })
    }

    fn tone(freq: f32, millis: u64) -> Self {
        let wave = SineWave::new(freq)
            .take_duration(Duration::from_millis(millis))
            .amplify(0.2);
        Self {
            channels: wave.channels(),
            sample_rate: wave.sample_rate(),
            samples: wave.collect(),
        }
    }

    fn source(&self) -> SamplesBuffer<f32> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.clone())
    }
}

/// Plays effects on the default output device
pub struct RodioPlayer {
    // Dropping the stream silences the handle
    _stream: OutputStream,
    handle: OutputStreamHandle,
    eat: Clip,
    poison: Clip,
}

impl RodioPlayer {
    /// Open the default device and load every configured clip
    ///
    /// Effects without a file get a short synthesised tone.
    pub fn open(paths: &SoundPaths) -> Result<Self> {
        let eat = match &paths.eat {
            Some(path) => Clip::decode(path)?,
            None => Clip::tone(880.0, 120),
        };
        let poison = match &paths.poison {
            Some(path) => Clip::decode(path)?,
            None => Clip::tone(160.0, 300),
        };

        let (stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;

        Ok(Self {
            _stream: stream,
            handle,
            eat,
            poison,
        })
    }
}

impl SoundPlayer for RodioPlayer {
    fn play(&self, effect: SoundEffect) {
        let clip = match effect {
            SoundEffect::Eat => &self.eat,
            SoundEffect::Poison => &self.poison,
        };
        if let Err(e) = self.handle.play_raw(clip.source()) {
            warn!(?effect, error = %e, "failed to play sound");
        }
    }
}
