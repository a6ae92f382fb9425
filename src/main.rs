use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use hand_snake::audio::{RodioPlayer, SilentPlayer, SoundPlayer};
use hand_snake::game::{GameConfig, GameSession};
use hand_snake::modes::{FramePipeline, HeadlessMode, PlayMode};
use hand_snake::vision::{FrameSource, MarkerDetector, PointerCamera, ReplaySource};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hand_snake")]
#[command(version, about = "Snake steered by a tracked fingertip")]
struct Cli {
    /// JSON config file; overrides the variant preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule set to play when no config file is given
    #[arg(long, default_value = "extended")]
    variant: Variant,

    /// Frame width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Frame height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Where fingertip positions come from
    #[arg(long, default_value = "pointer")]
    source: Source,

    /// Recording to play back with `--source replay`
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Run without a terminal UI and print a JSON summary (replay only)
    #[arg(long)]
    headless: bool,

    /// Do not flip frames horizontally
    #[arg(long)]
    no_mirror: bool,

    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Variant {
    /// Normal food only; biting yourself ends the game
    Classic,
    /// Bonus and poison food, sound; leaving the frame ends the game
    Extended,
}

#[derive(Clone, PartialEq, Eq, ValueEnum)]
enum Source {
    /// Terminal mouse pointer
    Pointer,
    /// Recorded fingertip track
    Replay,
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    // The terminal UI owns stderr, so logs only go to a file
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => match cli.variant {
            Variant::Classic => GameConfig::classic(),
            Variant::Extended => GameConfig::extended(),
        },
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.no_mirror {
        config.mirror = false;
    }
    if cli.mute {
        config.capabilities.sound = false;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = build_config(&cli)?;

    let source: Box<dyn FrameSource> = match cli.source {
        Source::Pointer => {
            if cli.headless {
                bail!("--headless needs --source replay");
            }
            Box::new(PointerCamera::new(config.width, config.height))
        }
        Source::Replay => {
            let Some(path) = &cli.replay else {
                bail!("--source replay needs --replay <file>");
            };
            Box::new(ReplaySource::load(path)?)
        }
    };

    // Load sounds before touching the terminal so a bad file fails cleanly
    let sound: Box<dyn SoundPlayer> = if config.capabilities.sound && !cli.headless {
        Box::new(RodioPlayer::open(&config.sounds)?)
    } else {
        Box::new(SilentPlayer)
    };

    let pipeline = FramePipeline::new(
        source,
        Box::new(MarkerDetector::default()),
        sound,
        config.mirror,
    );
    let session = GameSession::new(config, Instant::now())?;

    // Dispatch to appropriate mode
    if cli.headless {
        let mut headless = HeadlessMode::new(session, pipeline);
        let summary = headless.run()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
        );
    } else {
        let mut play_mode = PlayMode::new(session, pipeline);
        play_mode.run().await?;
    }

    Ok(())
}
