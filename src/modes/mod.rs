pub mod headless;
pub mod pipeline;
pub mod play;

pub use headless::{HeadlessMode, RunSummary};
pub use pipeline::{FrameOutcome, FramePipeline};
pub use play::PlayMode;
