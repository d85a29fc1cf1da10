use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::versus::VERSUS_TICK_MS;
use crate::game::{Action, Direction, EndReason, RoundPhase, VersusEngine, VersusState};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

/// Driver for the local two-player arena. WASD steers player 1, the arrow
/// keys steer player 2; each player's latest key within a tick wins.
pub struct VersusMode {
    engine: VersusEngine,
    state: VersusState,
    renderer: Renderer,
    input_handler: InputHandler,
    pending_directions: [Option<Direction>; 2],
    should_quit: bool,
}

impl VersusMode {
    pub fn new() -> Self {
        let mut engine = VersusEngine::new();
        let state = engine.reset();

        Self {
            engine,
            state,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pending_directions: [None, None],
            should_quit: false,
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

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(Duration::from_millis(VERSUS_TICK_MS));

        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.is_active() {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render_versus(frame, &self.state);
                    }).context("Failed to draw frame")?;
                }

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
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::WasdSteer(dir) => {
                    self.pending_directions[0] = Some(dir);
                }
                KeyAction::ArrowSteer(dir) => {
                    self.pending_directions[1] = Some(dir);
                }
                KeyAction::Restart => {
                    self.reset_game();
                }
                KeyAction::Quit => {
                    if self.state.is_active() {
                        self.state.phase = RoundPhase::GameOver(EndReason::Quit);
                    } else {
                        self.should_quit = true;
                    }
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let actions = self.pending_directions.map(|pending| {
            pending.map(Action::Steer).unwrap_or(Action::Continue)
        });
        self.pending_directions = [None, None];

        self.engine.step(&mut self.state, actions);
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.pending_directions = [None, None];
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

impl Default for VersusMode {
    fn default() -> Self {
        Self::new()
    }
}
