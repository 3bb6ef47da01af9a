use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::state::Position;

/// Errors raised when a configuration describes an unplayable board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tile size must be positive")]
    ZeroTileSize,
    #[error("board of {width}x{height} holds no whole {tile}px tile")]
    EmptyGrid { width: u32, height: u32, tile: u32 },
    #[error("grid of {cells} cells along one axis is too large")]
    GridTooLarge { cells: u32 },
    #[error("tick interval must be positive")]
    ZeroTickInterval,
    #[error("origin ({x}, {y}) lies outside the {width}x{height} grid")]
    OriginOutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    #[error("{part} at ({x}, {y}) lies outside the grid")]
    CellOutOfBounds { part: &'static str, x: i32, y: i32 },
    #[error("snake covers ({x}, {y}) more than once")]
    OverlappingSnake { x: i32, y: i32 },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in display units
    pub board_width: u32,
    /// Board height in display units
    pub board_height: u32,
    /// Side of one grid cell in display units
    pub tile_size: u32,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Cell the head starts on and returns to after a collision
    pub origin: Position,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 600,
            board_height: 600,
            tile_size: 25,
            tick_interval_ms: 100,
            origin: Position::new(5, 5),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Number of columns on the grid
    pub fn grid_width(&self) -> u32 {
        self.board_width.checked_div(self.tile_size).unwrap_or(0)
    }

    /// Number of rows on the grid
    pub fn grid_height(&self) -> u32 {
        self.board_height.checked_div(self.tile_size).unwrap_or(0)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations that produce a degenerate grid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }

        let (width, height) = (self.grid_width(), self.grid_height());
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.board_width,
                height: self.board_height,
                tile: self.tile_size,
            });
        }
        for cells in [width, height] {
            if i32::try_from(cells).is_err() {
                return Err(ConfigError::GridTooLarge { cells });
            }
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let Position { x, y } = self.origin;
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            return Err(ConfigError::OriginOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 24);
        assert_eq!(config.grid_height(), 24);
        assert_eq!(config.origin, Position::new(5, 5));
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 200);
        assert_eq!(config.grid_width(), 12);
        assert_eq!(config.grid_height(), 8);
        assert_eq!(config.tile_size, 25);
    }

    #[test]
    fn test_partial_tiles_are_dropped() {
        let config = GameConfig::new(260, 249);
        assert_eq!(config.grid_width(), 10);
        assert_eq!(config.grid_height(), 9);
    }

    #[test]
    fn test_zero_tile_size_rejected() {
        let config = GameConfig {
            tile_size: 0,
            ..Default::default()
        };
        assert_eq!(config.grid_width(), 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn test_board_smaller_than_tile_rejected() {
        let config = GameConfig::new(600, 20);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyGrid { height: 20, .. })
        ));
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTickInterval));
    }

    #[test]
    fn test_origin_outside_grid_rejected() {
        // 4x4 grid cannot hold the default (5, 5) origin
        let config = GameConfig::new(100, 100);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OriginOutOfBounds { x: 5, y: 5, .. })
        ));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"board_width": 400, "seed": 7}}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.board_width, 400);
        assert_eq!(config.board_height, 600);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.grid_width(), 16);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::new(500, 300)
        };
        let json = serde_json::to_string(&config).unwrap();
        let decoded: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, config);
    }
}
