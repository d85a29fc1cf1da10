use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Action, Direction, EndReason, GameEngine, RoundConfig, RoundState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;
use crate::score::{ScoreLedger, ScoreReport};

/// Driver for solo and timed rounds: one snake, obstacles, level
/// progression, and the persisted score ledger at round end.
pub struct SoloMode {
    engine: GameEngine,
    state: RoundState,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    ledger: ScoreLedger,
    player_name: String,
    pending_direction: Option<Direction>,
    report: Option<ScoreReport>,
    should_quit: bool,
    round_start: Instant,
}

impl SoloMode {
    pub fn new(config: RoundConfig, player_name: String, ledger: ScoreLedger) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            ledger,
            player_name,
            pending_direction: None,
            report: None,
            should_quit: false,
            round_start: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
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

        // Game tick follows the round's speed, which shrinks on level-up
        let mut tick_ms = self.state.speed_ms;
        let mut tick_timer = interval(Duration::from_millis(tick_ms));

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.state.is_active() {
                        self.update_game();
                    }
                    if self.state.speed_ms != tick_ms {
                        tick_ms = self.state.speed_ms;
                        tick_timer = interval(Duration::from_millis(tick_ms));
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.update();
                    terminal.draw(|frame| {
                        self.renderer.render_solo(
                            frame,
                            &self.state,
                            &self.stats,
                            &self.player_name,
                            self.report.as_ref(),
                        );
                    }).context("Failed to draw frame")?;
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
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                // Solo play takes steering from either namespace
                KeyAction::ArrowSteer(dir) | KeyAction::WasdSteer(dir) => {
                    self.pending_direction = Some(dir);
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    if self.state.is_active() {
                        // First quit ends the round; the score still counts
                        self.end_round(EndReason::Quit);
                    } else {
                        self.should_quit = true;
                    }
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let action = self
            .pending_direction
            .take()
            .map(Action::Steer)
            .unwrap_or(Action::Continue);

        let result = self
            .engine
            .step(&mut self.state, action, self.round_start.elapsed());

        if result.terminated && self.report.is_none() {
            self.finalize_round();
        }
    }

    fn end_round(&mut self, reason: EndReason) {
        self.state.end(reason);
        if self.report.is_none() {
            self.finalize_round();
        }
    }

    /// Track session stats and persist the score, downgrading a failed
    /// ledger write to the zeroed defaults.
    fn finalize_round(&mut self) {
        self.stats.on_round_over(self.state.score);
        let report = self
            .ledger
            .record_and_query(&self.player_name, self.state.score)
            .unwrap_or_else(|_| ScoreReport::unavailable());
        self.report = Some(report);
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.stats.on_round_start();
        self.pending_direction = None;
        self.report = None;
        self.round_start = Instant::now();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
