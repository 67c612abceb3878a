use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::driver::{Driver, GameSession};
use crate::game::Lifecycle;
use crate::input::{InputHandler, KeyAction, quadrant_direction};
use crate::render::{Renderer, View};
use crate::store::HighScoreStore;

pub struct HumanMode<S> {
    driver: Driver<S>,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Screen area of the grid cells as last drawn
    grid_area: Rect,
    should_quit: bool,
}

impl<S: HighScoreStore> HumanMode<S> {
    pub fn new(session: GameSession<S>) -> Self {
        Self {
            driver: Driver::new(session),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            grid_area: Rect::default(),
            should_quit: false,
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
        self.driver.shutdown();

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        info!("entering game loop");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Countdown or movement, whichever is armed
                tick = self.driver.next_tick() => {
                    let outcome = self.driver.fire(tick).context("Game engine failed")?;
                    debug!(?tick, ?outcome, "tick");
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.draw(terminal)?;
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

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let session = self.driver.session();
        let view = View {
            state: session.state(),
            config: session.config(),
            high_score: session.high_score(),
            new_high_score: session.is_new_high_score(),
        };
        let renderer = &self.renderer;
        let mut grid_area = self.grid_area;

        terminal
            .draw(|frame| grid_area = renderer.render(frame, &view))
            .context("Failed to draw frame")?;

        self.grid_area = grid_area;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::Steer(direction) => {
                        self.driver.steer(direction);
                    }
                    KeyAction::Answer(index) => {
                        let outcome = self.driver.answer_index(index);
                        debug!(index, ?outcome, "answer");
                    }
                    KeyAction::Start => self.start_game()?,
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) && !self.grid_area.is_empty()
                {
                    let direction = quadrant_direction(mouse.column, mouse.row, self.grid_area);
                    self.driver.steer(direction);
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Start from the title screen or after game over; ignored mid-game
    fn start_game(&mut self) -> Result<()> {
        let lifecycle = self.driver.session().state().lifecycle;
        if lifecycle != Lifecycle::Idle && !lifecycle.is_game_over() {
            return Ok(());
        }
        self.driver.start().context("Failed to start game")
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
