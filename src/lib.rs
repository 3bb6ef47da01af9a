//! Grid Snake - a single-player snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive tick loop tying them together (session module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod session;
