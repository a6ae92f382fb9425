use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use super::pipeline::{FrameOutcome, FramePipeline};
use crate::game::GameSession;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::vision::PointerSample;

/// Interactive game in the terminal, one frame every 33ms
pub struct PlayMode {
    session: GameSession,
    pipeline: FramePipeline,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Play field cells as of the last draw
    field: Rect,
}

impl PlayMode {
    pub fn new(session: GameSession, mut pipeline: FramePipeline) -> Self {
        let config = session.config();
        pipeline.configure(config.width, config.height);

        Self {
            session,
            pipeline,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            field: Rect::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Camera frames at 30 FPS (33ms per frame)
        let frame_interval = Duration::from_millis(33);
        let mut frame_timer = interval(frame_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // One camera frame: update then draw
                _ = frame_timer.tick() => {
                    let outcome = self.pipeline.advance(
                        &mut self.session,
                        &mut self.metrics,
                        Instant::now(),
                    )?;
                    if outcome == FrameOutcome::SourceEnded {
                        self.should_quit = true;
                    }

                    if !self.session.is_over() {
                        self.metrics.update();
                    }
                    let completed = terminal.draw(|frame| {
                        self.renderer.render(frame, self.session.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                    self.field = self.renderer.field_area(completed.area);
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Restart => self.reset_game(),
                    KeyAction::ToggleMirror => {
                        self.pipeline.toggle_mirror();
                        info!(mirror = self.pipeline.mirror(), "mirror toggled");
                    }
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if let Some((column, row)) = self.input_handler.handle_mouse_event(mouse) {
                    let field = self.field;
                    self.pipeline.feed_pointer(PointerSample::from_cell(
                        column,
                        row,
                        field.x,
                        field.y,
                        field.width,
                        field.height,
                    ));
                }
            }
            _ => {}
        }
    }

    fn reset_game(&mut self) {
        self.session.reset(Instant::now());
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
