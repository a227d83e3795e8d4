use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest accepted grid side; the renderer lays out every cell each frame
pub const MAX_GRID_SIDE: usize = 1024;

/// What happens when the snake's head leaves the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallMode {
    /// The head re-enters on the opposite edge
    Pass,
    /// Leaving the grid ends the game
    #[default]
    Collide,
}

impl WallMode {
    pub fn is_pass(&self) -> bool {
        *self == WallMode::Pass
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Pass => Self::Collide,
            Self::Collide => Self::Pass,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Collide => "Walls",
        }
    }
}

/// Game speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedTier {
    /// 150ms per tick
    Slow,
    /// 100ms per tick
    #[default]
    Normal,
    /// 60ms per tick
    Fast,
}

impl SpeedTier {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(150),
            Self::Normal => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(60),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Wall behaviour applied on each update
    pub wall_mode: WallMode,
    /// Tick speed
    pub speed: SpeedTier,
    /// Random draws tried before food placement falls back to scanning free cells
    pub max_food_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            wall_mode: WallMode::Collide,
            speed: SpeedTier::Normal,
            max_food_attempts: 1024,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config in {:?}", path))?;
        Ok(config)
    }

    /// Check that the grid can hold a snake plus one food item
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.cell_count() >= 2,
            "grid must have room for the snake and food, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid sides must be at most {}, got {}x{}",
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.max_food_attempts > 0,
            "max_food_attempts must be at least 1"
        );
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width.saturating_mul(self.grid_height)
    }

    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
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
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.wall_mode, WallMode::Collide);
        assert_eq!(config.speed, SpeedTier::Normal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.cell_count(), 180);
    }

    #[test]
    fn test_speed_tiers() {
        assert_eq!(SpeedTier::Slow.tick_interval(), Duration::from_millis(150));
        assert_eq!(SpeedTier::Normal.tick_interval(), Duration::from_millis(100));
        assert_eq!(SpeedTier::Fast.tick_interval(), Duration::from_millis(60));
    }

    #[test]
    fn test_wall_mode_toggle() {
        assert_eq!(WallMode::Pass.toggled(), WallMode::Collide);
        assert_eq!(WallMode::Collide.toggled(), WallMode::Pass);
        assert!(WallMode::Pass.is_pass());
    }

    #[test]
    fn test_validation_rejects_degenerate_grids() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(10, 0).validate().is_err());
        assert!(GameConfig::new(1, 1).validate().is_err());
        assert!(GameConfig::new(2, 1).validate().is_ok());

        assert!(GameConfig::new(100_000, 100_000).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE + 1, 10).validate().is_err());
        assert!(GameConfig::new(10, MAX_GRID_SIDE + 1).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());

        let config = GameConfig {
            max_food_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 30, "wall_mode": "pass", "speed": "fast" }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.wall_mode, WallMode::Pass);
        assert_eq!(config.speed, SpeedTier::Fast);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::load(file.path()).is_err());
    }
}
