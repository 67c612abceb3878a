use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::state::Position;

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell_size must be at least 1")]
    ZeroCellSize,
    #[error("canvas {width}x{height} holds no full cell of size {cell_size}")]
    EmptyGrid {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("start head ({x}, {y}) lies outside the {grid_width}x{grid_height} grid")]
    StartOutOfBounds {
        x: i32,
        y: i32,
        grid_width: u32,
        grid_height: u32,
    },
    #[error("min_speed must be at least 1")]
    ZeroMinSpeed,
    #[error("min_speed ({min}) cannot exceed max_speed ({max})")]
    InvertedSpeedRange { min: u32, max: u32 },
    #[error("max_speed ({0}) exceeds 1000 moves per second")]
    SpeedTooHigh(u32),
    #[error("countdown_steps must be at least 1")]
    ZeroCountdown,
    #[error("countdown_period_ms must be at least 1")]
    ZeroCountdownPeriod,
    #[error("milestone_interval must be at least 1")]
    ZeroMilestoneInterval,
}

/// Configuration for the game
///
/// Grid dimensions are derived from the canvas extent and the cell size, the
/// same way the drawing surface is partitioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the drawing surface in pixels
    pub canvas_width: u32,
    /// Height of the drawing surface in pixels
    pub canvas_height: u32,
    /// Edge length of one grid cell in pixels
    pub cell_size: u32,
    /// Where the head is placed on every start
    pub start_head: Position,

    /// Moves per second until the score climbs past it
    pub min_speed: u32,
    /// Fastest moves per second the ramp reaches
    pub max_speed: u32,

    /// First countdown value shown after start
    pub countdown_steps: u8,
    /// Period of one countdown step in milliseconds
    pub countdown_period_ms: u64,

    /// Score multiple that triggers a trivia question
    pub milestone_interval: u32,

    /// Random samples tried before falling back to free-cell enumeration
    pub max_placement_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 380,
            cell_size: 20,
            start_head: Position::new(12, 9),
            min_speed: 10,
            max_speed: 15,
            countdown_steps: 3,
            countdown_period_ms: 800,
            milestone_interval: 3,
            max_placement_attempts: 1024,
        }
    }
}

impl GameConfig {
    /// Create a configuration for a canvas of the given pixel size
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Number of columns
    pub fn grid_width(&self) -> u32 {
        self.canvas_width.checked_div(self.cell_size).unwrap_or(0)
    }

    /// Number of rows
    pub fn grid_height(&self) -> u32 {
        self.canvas_height.checked_div(self.cell_size).unwrap_or(0)
    }

    pub fn countdown_period(&self) -> Duration {
        Duration::from_millis(self.countdown_period_ms)
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as u32) < self.grid_width()
            && (pos.y as u32) < self.grid_height()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.grid_width() == 0 || self.grid_height() == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.canvas_width,
                height: self.canvas_height,
                cell_size: self.cell_size,
            });
        }

        if !self.is_in_bounds(self.start_head) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.start_head.x,
                y: self.start_head.y,
                grid_width: self.grid_width(),
                grid_height: self.grid_height(),
            });
        }

        if self.min_speed == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }

        if self.min_speed > self.max_speed {
            return Err(ConfigError::InvertedSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if self.max_speed > 1000 {
            return Err(ConfigError::SpeedTooHigh(self.max_speed));
        }

        if self.countdown_steps == 0 {
            return Err(ConfigError::ZeroCountdown);
        }

        if self.countdown_period_ms == 0 {
            return Err(ConfigError::ZeroCountdownPeriod);
        }

        if self.milestone_interval == 0 {
            return Err(ConfigError::ZeroMilestoneInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width(), 25);
        assert_eq!(config.grid_height(), 19);
        assert_eq!(config.start_head, Position::new(12, 9));
        assert_eq!(config.countdown_period(), Duration::from_millis(800));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_canvas() {
        let config = GameConfig::new(200, 100);
        assert_eq!(config.grid_width(), 10);
        assert_eq!(config.grid_height(), 5);
    }

    #[test]
    fn test_partial_cells_are_dropped() {
        let config = GameConfig {
            canvas_width: 119,
            canvas_height: 41,
            ..Default::default()
        };
        assert_eq!(config.grid_width(), 5);
        assert_eq!(config.grid_height(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));

        let config = GameConfig {
            min_speed: 20,
            max_speed: 15,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedSpeedRange { min: 20, max: 15 })
        );

        // 10x5 grid cannot hold the canonical start cell
        let config = GameConfig::new(200, 100);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds { .. })
        ));

        let config = GameConfig {
            canvas_width: 10,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_periods() {
        let config = GameConfig {
            max_speed: 2000,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SpeedTooHigh(2000)));

        let config = GameConfig {
            countdown_period_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCountdownPeriod));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"min_speed": 5}"#).unwrap();
        assert_eq!(config.min_speed, 5);
        assert_eq!(config.max_speed, 15);
        assert_eq!(config.grid_width(), 25);
    }
}
