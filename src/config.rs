use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub const DEFAULT_CELL_SIZE: u32 = 20;
pub const DEFAULT_TICK_RATE: u32 = 10;
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Terminal columns used to draw one grid cell.
pub const CELL_COLUMNS: u16 = 2;

const MIN_GRID_SIDE: i32 = 2;

/// Immutable game settings, fixed when the game is constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Ticks per second.
    pub tick_rate: u32,
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_width: (DEFAULT_WINDOW_WIDTH / DEFAULT_CELL_SIZE) as i32,
            grid_height: (DEFAULT_WINDOW_HEIGHT / DEFAULT_CELL_SIZE) as i32,
            tick_rate: DEFAULT_TICK_RATE,
            food_reward: DEFAULT_FOOD_REWARD,
        }
    }
}

impl GameConfig {
    /// Derives the logical grid from a pixel window and a cell size.
    pub fn from_window(window_width: u32, window_height: u32, cell_size: u32) -> Result<Self> {
        if cell_size == 0 {
            return Err(Error::InvalidConfig("cell size must be greater than 0".to_string()));
        }

        let config = GameConfig {
            grid_width: (window_width / cell_size) as i32,
            grid_height: (window_height / cell_size) as i32,
            ..GameConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width < MIN_GRID_SIDE || self.grid_height < MIN_GRID_SIDE {
            return Err(Error::InvalidConfig(format!(
                "grid must be at least {0}x{0}, got {1}x{2}",
                MIN_GRID_SIDE, self.grid_width, self.grid_height
            )));
        }
        if self.tick_rate == 0 {
            return Err(Error::InvalidConfig("tick rate must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    pub fn center(&self) -> (i32, i32) {
        (self.grid_width / 2, self.grid_height / 2)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate
    }

    /// Shrinks the grid so that it fits, with its border, in a terminal of the given size.
    pub fn fit_terminal(self, cols: u16, rows: u16) -> Result<Self> {
        let max_width = (cols.saturating_sub(2) / CELL_COLUMNS) as i32;
        let max_height = rows.saturating_sub(2) as i32;

        if max_width < MIN_GRID_SIDE || max_height < MIN_GRID_SIDE {
            return Err(Error::TerminalTooSmall {
                cols,
                rows,
                min_cols: MIN_GRID_SIDE as u16 * CELL_COLUMNS + 2,
                min_rows: MIN_GRID_SIDE as u16 + 2,
            });
        }

        let fitted = GameConfig {
            grid_width: self.grid_width.min(max_width),
            grid_height: self.grid_height.min(max_height),
            ..self
        };

        if fitted != self {
            tracing::warn!(
                "terminal is {}x{}, shrinking grid from {}x{} to {}x{}",
                cols, rows, self.grid_width, self.grid_height, fitted.grid_width, fitted.grid_height
            );
        }

        Ok(fitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_window() {
        let config = GameConfig::default();
        assert_eq!((config.grid_width, config.grid_height), (40, 30));
        assert_eq!(config.tick_rate, 10);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn window_size_is_floored() {
        let config = GameConfig::from_window(810, 619, 20).unwrap();
        assert_eq!((config.grid_width, config.grid_height), (40, 30));
    }

    #[test]
    fn rejects_degenerate_configs() {
        assert!(matches!(GameConfig::from_window(800, 600, 0), Err(Error::InvalidConfig(_))));
        assert!(matches!(GameConfig::from_window(20, 600, 20), Err(Error::InvalidConfig(_))));

        let config = GameConfig { tick_rate: 0, ..GameConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn fit_terminal_clamps_to_available_space() {
        let config = GameConfig::default().fit_terminal(80, 24).unwrap();
        assert_eq!((config.grid_width, config.grid_height), (39, 22));

        let roomy = GameConfig::default().fit_terminal(200, 60).unwrap();
        assert_eq!(roomy, GameConfig::default());
    }

    #[test]
    fn fit_terminal_fails_on_tiny_terminal() {
        assert!(matches!(
            GameConfig::default().fit_terminal(5, 3),
            Err(Error::TerminalTooSmall { min_cols: 6, min_rows: 4, .. })
        ));
    }
}
