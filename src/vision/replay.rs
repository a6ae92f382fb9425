use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{Frame, FrameSource};
use crate::error::AssetError;
use crate::game::Point;

/// A recorded fingertip track, one entry per camera frame
///
/// `null` entries are frames in which no hand was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<Option<[f64; 2]>>,
}

/// Plays a [`Recording`] back frame by frame and stops when it runs out
#[derive(Debug, Clone)]
pub struct ReplaySource {
    recorded_width: u32,
    recorded_height: u32,
    width: u32,
    height: u32,
    frames: VecDeque<Option<[f64; 2]>>,
}

impl ReplaySource {
    pub fn new(recording: Recording) -> Self {
        Self {
            recorded_width: recording.width,
            recorded_height: recording.height,
            width: recording.width,
            height: recording.height,
            frames: recording.frames.into(),
        }
    }

    /// Load a JSON recording
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay {}", path.display()))?;
        let recording: Recording =
            serde_json::from_str(&json).map_err(|source| AssetError::BadReplay {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(recording))
    }

    /// Frames not yet played
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    /// Recorded positions are rescaled to the requested size
    fn configure(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn read(&mut self) -> Result<Option<Frame>> {
        let Some(entry) = self.frames.pop_front() else {
            return Ok(None);
        };

        let sx = self.width as f64 / self.recorded_width.max(1) as f64;
        let sy = self.height as f64 / self.recorded_height.max(1) as f64;
        let marker = entry.map(|[x, y]| Point::new(x * sx, y * sy));

        Ok(Some(Frame::new(self.width, self.height, marker)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_replay_until_exhausted() {
        let mut source = ReplaySource::new(Recording {
            width: 1280,
            height: 720,
            frames: vec![Some([10.0, 20.0]), None],
        });

        let first = source.read().unwrap().unwrap();
        assert_eq!(first.marker, Some(Point::new(10.0, 20.0)));
        let second = source.read().unwrap().unwrap();
        assert_eq!(second.marker, None);
        assert!(source.read().unwrap().is_none());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_configure_rescales() {
        let mut source = ReplaySource::new(Recording {
            width: 640,
            height: 360,
            frames: vec![Some([320.0, 180.0])],
        });
        source.configure(1280, 720);

        let frame = source.read().unwrap().unwrap();
        assert_eq!((frame.width, frame.height), (1280, 720));
        assert_eq!(frame.marker, Some(Point::new(640.0, 360.0)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "width": 1280, "height": 720, "frames": [[1.0, 2.0], null, [3.0, 4.0]] }}"#
        )
        .unwrap();

        let source = ReplaySource::load(file.path()).unwrap();
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn test_load_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ReplaySource::load(file.path()).unwrap_err();
        assert!(err.downcast_ref::<AssetError>().is_some());
    }
}
