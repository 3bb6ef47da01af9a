//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal shell drives it through [`GameState::step`] and [`GameState::set_direction`].

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use engine::{GameState, StepOutcome};
pub use state::{CollisionKind, Position, Snake};
