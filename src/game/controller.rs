use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::config::{GameConfig, SpeedTier, WallMode};
use super::direction::Direction;
use super::state::{CollisionType, GameState, Position};
use super::ticker::Ticker;

/// Points awarded per food item
pub const SCORE_PER_FOOD: u32 = 10;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    Collision(CollisionType),
    /// No free cell left to place food on
    BoardFilled,
}

/// Notifications for the score display and game-over collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    ScoreChanged(u32),
    GameOver {
        final_score: u32,
        cause: GameOverCause,
    },
}

/// What a single update did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The game is not running; nothing changed
    Idle,
    Moved,
    AteFood,
    GameOver(GameOverCause),
}

/// Owns the game state and drives it from ticks and player intent
pub struct GameController<R: Rng = StdRng> {
    state: GameState,
    ticker: Ticker,
    rng: R,
    events: Vec<GameEvent>,
}

impl GameController<StdRng> {
    /// Create a stopped game with an entropy-seeded random source
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> anyhow::Result<Self> {
        config.validate()?;
        let ticker = Ticker::new(config.tick_interval());

        Ok(Self {
            state: GameState::new(config),
            ticker,
            rng,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Reset everything and begin ticking at the configured speed
    pub fn start(&mut self) {
        self.ticker.stop();

        self.state.snake.reset();
        self.state.score = 0;
        self.state.steps = 0;
        // Notifications left over from the previous game are stale now
        self.events.clear();
        self.push_event(GameEvent::ScoreChanged(0));

        match self.generate_food() {
            Some(_) => {
                self.state.running = true;
                self.ticker.start(self.state.config.tick_interval());
                info!(
                    width = self.state.config.grid_width,
                    height = self.state.config.grid_height,
                    wall_mode = ?self.state.config.wall_mode,
                    speed = ?self.state.config.speed,
                    "game started"
                );
            }
            None => self.game_over(GameOverCause::BoardFilled),
        }
    }

    /// One game step: move, collide, eat
    pub fn update(&mut self) -> UpdateOutcome {
        if !self.state.running {
            return UpdateOutcome::Idle;
        }

        self.state.snake.advance();
        self.state.steps += 1;

        let config = &self.state.config;
        let collision = self.state.snake.check_collision(
            config.grid_width,
            config.grid_height,
            config.wall_mode.is_pass(),
        );

        if let Some(collision) = collision {
            let cause = GameOverCause::Collision(collision);
            self.game_over(cause);
            return UpdateOutcome::GameOver(cause);
        }

        if self.state.snake.head() != self.state.food {
            return UpdateOutcome::Moved;
        }

        self.state.snake.grow();
        self.state.score += SCORE_PER_FOOD;
        self.push_event(GameEvent::ScoreChanged(self.state.score));

        if self.generate_food().is_none() {
            self.game_over(GameOverCause::BoardFilled);
            return UpdateOutcome::GameOver(GameOverCause::BoardFilled);
        }

        UpdateOutcome::AteFood
    }

    /// Stop ticking and report the final score
    pub fn game_over(&mut self, cause: GameOverCause) {
        self.ticker.stop();
        self.state.running = false;
        info!(score = self.state.score, ?cause, "game over");

        self.push_event(GameEvent::GameOver {
            final_score: self.state.score,
            cause,
        });
    }

    /// Queue a notification, replacing any undrained one of the same kind
    fn push_event(&mut self, event: GameEvent) {
        self.events
            .retain(|queued| std::mem::discriminant(queued) != std::mem::discriminant(&event));
        self.events.push(event);
    }

    /// Place food on a random cell not covered by the snake
    ///
    /// Uses rejection sampling for up to `max_food_attempts` draws, then picks
    /// uniformly among the free cells. Returns `None` when the snake covers the board;
    /// the previous food position is kept in that case.
    pub fn generate_food(&mut self) -> Option<Position> {
        let width = self.state.config.grid_width as i32;
        let height = self.state.config.grid_height as i32;

        for _ in 0..self.state.config.max_food_attempts {
            let pos = Position::new(
                self.rng.gen_range(0..width),
                self.rng.gen_range(0..height),
            );
            if !self.state.snake.occupies(pos) {
                return Some(self.place_food(pos));
            }
        }

        let snake = &self.state.snake;
        let free = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)?;
        Some(self.place_food(free))
    }

    fn place_food(&mut self, pos: Position) -> Position {
        debug!(x = pos.x, y = pos.y, "food placed");
        self.state.food = pos;
        pos
    }

    /// Queue a direction for the next tick, rejecting reversals
    pub fn steer(&mut self, direction: Direction) -> bool {
        let accepted = self.state.snake.steer(direction);
        debug!(?direction, accepted, "steer");
        accepted
    }

    /// Steer from a raw key identifier such as `"arrowup"` or `"W"`
    ///
    /// Returns false for unrecognised keys and rejected reversals.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => self.steer(direction),
            None => false,
        }
    }

    /// Applies from the next update on
    pub fn set_mode(&mut self, wall_mode: WallMode) {
        self.state.config.wall_mode = wall_mode;
        info!(?wall_mode, "wall mode changed");
    }

    pub fn toggle_mode(&mut self) -> WallMode {
        let wall_mode = self.state.config.wall_mode.toggled();
        self.set_mode(wall_mode);
        wall_mode
    }

    /// Change the tick rate without touching the running game
    pub fn set_speed(&mut self, speed: SpeedTier) {
        self.state.config.speed = speed;
        self.ticker.reconfigure(speed.tick_interval());
        info!(?speed, running = self.state.running, "speed changed");
    }

    /// Resolves when the next tick is due; pending forever while stopped
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await
    }

    /// Hand queued notifications to the front end
    ///
    /// Meant to be called after every `start` and `update`. Undrained events are
    /// coalesced, so the queue holds at most the latest score and one game over.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
