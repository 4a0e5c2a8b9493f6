mod config;
mod error;
mod food;
mod game;
mod input;
mod snake;
mod state;
mod term;

use tracing_subscriber::EnvFilter;

use crate::config::{GameConfig, DEFAULT_CELL_SIZE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

pub type TermInt = u16;
pub type Coords = (u16, u16);
/// Grid position; signed so a head that left the board can still be represented.
pub type Cell = (i32, i32);

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, so they stay off the game screen unless redirected
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = GameConfig::from_window(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT, DEFAULT_CELL_SIZE)?;
    let mut game = game::SnakeGame::new(config)?;
    game.run()?;

    Ok(())
}
