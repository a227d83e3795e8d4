use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tracing::{debug, info};

use crate::game::{GameConfig, GameController, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Overlay, Renderer};

pub struct HumanMode {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    overlay: Overlay,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, renderer: Renderer) -> Result<Self> {
        let controller = GameController::new(config).context("Invalid game configuration")?;

        Ok(Self {
            controller,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            overlay: Overlay::Welcome,
            should_quit: false,
        })
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
        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; pending while no game is running
                _ = self.controller.next_tick() => {
                    self.controller.update();
                    self.process_game_events();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, self.controller.state(), &self.metrics, self.overlay);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        self.apply(self.input_handler.handle_key_event(key));
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                self.controller.steer(direction);
            }
            KeyAction::Start => match self.overlay {
                // The notice has to be dismissed before a new game can begin
                Overlay::GameOver { .. } => self.overlay = Overlay::None,
                Overlay::Welcome | Overlay::None => self.start_game(),
            },
            KeyAction::ToggleWallMode => {
                self.controller.toggle_mode();
            }
            KeyAction::SetSpeed(speed) => self.controller.set_speed(speed),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn start_game(&mut self) {
        self.controller.start();
        self.overlay = Overlay::None;
        self.metrics.on_game_start();
        self.process_game_events();
    }

    fn process_game_events(&mut self) {
        let events: Vec<GameEvent> = self.controller.drain_events().collect();
        for event in events {
            match event {
                GameEvent::ScoreChanged(score) => debug!(score, "score changed"),
                GameEvent::GameOver { final_score, cause } => {
                    info!(final_score, ?cause, "showing game over notice");
                    self.metrics.on_game_over();
                    self.overlay = Overlay::GameOver { final_score, cause };
                }
            }
        }
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
