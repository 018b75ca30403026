//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! The engine is driven by intents from an input adapter and ticks from a timer.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionKind, GameState, Phase, Position, Snake};
