use std::time::Duration;

use ratatui::style::Color;
use thiserror::Error;

use crate::grid::Grid;

/// Default board width in pixels.
pub const DEFAULT_BOARD_WIDTH: u32 = 600;

/// Default board height in pixels.
pub const DEFAULT_BOARD_HEIGHT: u32 = 400;

/// Default edge length of one grid cell in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;

/// Default simulation speed in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 12;

/// Largest column or row count a grid may have.
pub const MAX_GRID_EXTENT: u32 = i16::MAX as u32;

/// Startup configuration rejected before a session is created.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("board {axis} must be greater than zero")]
    ZeroBoardDimension { axis: &'static str },

    #[error("board {axis} of {value}px is not a multiple of the {cell_size}px cell size")]
    NotCellAligned {
        axis: &'static str,
        value: u32,
        cell_size: u32,
    },

    #[error("board {axis} spans {cells} cells, more than the supported {max}")]
    GridTooLarge {
        axis: &'static str,
        cells: u32,
        max: u32,
    },

    #[error("tick rate must be greater than zero")]
    ZeroTickRate,
}

/// Board geometry and pacing, fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoardConfig {
    pub board_width: u32,
    pub board_height: u32,
    pub cell_size: u32,
    pub tick_rate: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl BoardConfig {
    /// Validates the configuration and derives the playing grid from it.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let cols = cells_along("width", self.board_width, self.cell_size)?;
        let rows = cells_along("height", self.board_height, self.cell_size)?;

        Ok(Grid::new(self.cell_size, cols, rows))
    }

    /// Wall-clock duration of one simulation step.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }
}

fn cells_along(axis: &'static str, value: u32, cell_size: u32) -> Result<u32, ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroBoardDimension { axis });
    }
    if value % cell_size != 0 {
        return Err(ConfigError::NotCellAligned {
            axis,
            value,
            cell_size,
        });
    }

    let cells = value / cell_size;
    if cells > MAX_GRID_EXTENT {
        return Err(ConfigError::GridTooLarge {
            axis,
            cells,
            max: MAX_GRID_EXTENT,
        });
    }

    Ok(cells)
}

/// Colors used by the terminal renderer.
#[derive(Debug)]
pub struct Theme {
    pub background: Color,
    /// Block color for the head cell.
    pub snake_head: Color,
    /// Block color for every other body cell.
    pub snake_body: Color,
    pub food: Color,
    pub border: Color,
    /// Primary text (score, overlay title).
    pub ink: Color,
    /// Secondary text (key hints).
    pub ink_dim: Color,
}

pub const THEME_DEFAULT: Theme = Theme {
    background: Color::Rgb(14, 14, 14),
    snake_head: Color::Rgb(60, 200, 120),
    snake_body: Color::Rgb(40, 160, 100),
    food: Color::Rgb(220, 60, 60),
    border: Color::Rgb(160, 160, 160),
    ink: Color::Rgb(235, 235, 235),
    ink_dim: Color::Rgb(160, 160, 160),
};

/// Glyph drawn for one grid cell; two columns keep cells roughly square.
pub const GLYPH_CELL: &str = "██";

/// Terminal columns used per grid cell.
pub const CELL_TERMINAL_WIDTH: u16 = 2;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{BoardConfig, ConfigError};

    #[test]
    fn default_board_yields_thirty_by_twenty_grid() {
        let grid = BoardConfig::default().grid().expect("default config is valid");

        assert_eq!(grid.cols(), 30);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cell_size(), 20);
    }

    #[test]
    fn misaligned_board_is_rejected() {
        let config = BoardConfig {
            board_width: 610,
            ..BoardConfig::default()
        };

        assert_eq!(
            config.grid(),
            Err(ConfigError::NotCellAligned {
                axis: "width",
                value: 610,
                cell_size: 20,
            })
        );
    }

    #[test]
    fn zero_values_are_rejected() {
        let zero_cell = BoardConfig {
            cell_size: 0,
            ..BoardConfig::default()
        };
        let zero_height = BoardConfig {
            board_height: 0,
            ..BoardConfig::default()
        };
        let zero_rate = BoardConfig {
            tick_rate: 0,
            ..BoardConfig::default()
        };

        assert_eq!(zero_cell.grid(), Err(ConfigError::ZeroCellSize));
        assert_eq!(
            zero_height.grid(),
            Err(ConfigError::ZeroBoardDimension { axis: "height" })
        );
        assert_eq!(zero_rate.grid(), Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let config = BoardConfig {
            board_width: 40_000,
            cell_size: 1,
            ..BoardConfig::default()
        };

        assert!(matches!(
            config.grid(),
            Err(ConfigError::GridTooLarge { axis: "width", .. })
        ));
    }

    #[test]
    fn tick_interval_follows_rate() {
        let config = BoardConfig {
            tick_rate: 10,
            ..BoardConfig::default()
        };

        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }
}
