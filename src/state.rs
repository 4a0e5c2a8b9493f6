use rand::rngs::ThreadRng;
use rand::Rng;

use crate::Cell;
use crate::config::GameConfig;
use crate::food::Food;
use crate::snake::{Direction, Snake, Step};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Restart,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// What the loop should do after a command was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Restarted,
    Quit,
}

/// The whole game, stepped one tick at a time. Knows nothing about the terminal.
pub struct GameState<R = ThreadRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    // None only once the snake covers the board
    food: Option<Food>,
    score: u32,
    game_over: bool,
    paused: bool,
    won: bool,
}

impl GameState<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        GameState::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let snake = Snake::new(config.center());
        let food = Food::place(snake.body(), &config, &mut rng);

        GameState { config, rng, snake, food, score: 0, game_over: false, paused: false, won: false }
    }

    /// Rebuilds the snake and food from scratch and zeroes the score.
    pub fn reset(&mut self) {
        self.snake = Snake::new(self.config.center());
        self.food = Food::place(self.snake.body(), &self.config, &mut self.rng);
        self.score = 0;
        self.game_over = false;
        self.paused = false;
        self.won = false;
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Quit => {
                tracing::info!(score = self.score, "quitting");
                return Flow::Quit;
            },
            Command::Turn(dir) if !self.game_over => self.snake.set_direction(dir),
            Command::TogglePause if !self.game_over => {
                self.paused = !self.paused;
                tracing::debug!(paused = self.paused, "pause toggled");
            },
            Command::Restart if self.game_over => {
                self.reset();
                tracing::info!("game restarted");
                return Flow::Restarted;
            },
            _ => {}
        }

        Flow::Continue
    }

    /// Runs one tick: move, then eat, then check for a crash.
    ///
    /// Returns `None` if nothing moved because the game is paused or over.
    pub fn tick(&mut self) -> Option<Step> {
        if self.game_over || self.paused {
            return None;
        }

        let step = self.snake.advance();

        let ate = self.food.map_or(false, |food| food.position() == step.new_head);
        if ate {
            self.snake.request_growth();
            self.score += self.config.food_reward;
            self.food = Food::place(self.snake.body(), &self.config, &mut self.rng);
            tracing::debug!(score = self.score, length = self.snake.len(), "food eaten");
        }

        if self.snake.detect_collision(self.config.grid_width, self.config.grid_height) {
            self.game_over = true;
            tracing::info!(score = self.score, head = ?step.new_head, "game over");
        } else if self.food.is_none() {
            self.game_over = true;
            self.won = true;
            tracing::info!(score = self.score, "board filled");
        }

        Some(step)
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Playing
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food.map(|food| food.position())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn in_bounds(&self, (x, y): Cell) -> bool {
        x >= 0 && y >= 0 && x < self.config.grid_width && y < self.config.grid_height
    }
}
