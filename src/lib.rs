//! Grid Snake - the classic snake arcade game on a discrete grid
//!
//! This library provides:
//! - Core game logic (game module): snake, collisions, food, tick scheduling
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
