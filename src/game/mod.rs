//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The controller owns the state and the tick schedule; front ends feed it player
//! intent and draw whatever it holds.

pub mod config;
pub mod controller;
pub mod direction;
pub mod state;
pub mod ticker;

// Re-export commonly used types
pub use config::{GameConfig, MAX_GRID_SIDE, SpeedTier, WallMode};
pub use controller::{GameController, GameEvent, GameOverCause, SCORE_PER_FOOD, UpdateOutcome};
pub use direction::Direction;
pub use state::{CollisionType, GameState, Position, Snake};
pub use ticker::Ticker;
