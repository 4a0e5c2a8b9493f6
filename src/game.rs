use std::{thread::sleep, time::Instant};

use crate::{Cell, Coords, TermInt};
use crate::config::{GameConfig, CELL_COLUMNS};
use crate::error::Result;
use crate::input;
use crate::snake::Step;
use crate::state::{Flow, GameState, Phase};
use crate::term::TermManager;

const SNAKE_BODY_GLYPH: [char; 2] = ['█', '█'];
const APPLE_GLYPH: [char; 2] = ['(', ')'];
const DEAD_SNAKE_GLYPH: [char; 2] = ['X', 'X'];
const EMPTY_GLYPH: [char; 2] = [' ', ' '];

const CONTROLS_HINT: &str = " WASD/arrows: move  Space: pause  Q: quit ";

pub struct SnakeGame {
    term: TermManager,
    state: GameState,
    // Phase the screen currently shows
    shown_phase: Phase,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let term = TermManager::new()?;
        let (cols, rows) = term.get_terminal_size();
        let config = config.fit_terminal(cols, rows)?;

        Ok(SnakeGame { term, state: GameState::new(config), shown_phase: Phase::Playing })
    }

    /// Plays until the player quits. The terminal is restored even if drawing fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.play();
        let restored = self.term.restore();
        res.and(restored)
    }

    fn play(&mut self) -> Result<()> {
        let config = *self.state.config();
        let tick_period = config.tick_period();
        tracing::info!(
            width = config.grid_width, height = config.grid_height, tick_rate = config.tick_rate,
            "starting game"
        );

        self.redraw()?;

        loop {
            let tick_start = Instant::now();

            for key_ev in self.term.read_key_events_queue()? {
                let cmd = match input::command_for(&key_ev) {
                    Some(cmd) => cmd,
                    None => continue,
                };

                match self.state.handle(cmd) {
                    Flow::Quit => return Ok(()),
                    Flow::Restarted => self.redraw()?,
                    Flow::Continue => {},
                }
            }

            let food_before = self.state.food();
            if let Some(step) = self.state.tick() {
                self.print_step(&step, food_before)?;
            }

            self.sync_overlay()?;
            self.term.flush()?;

            sleep(tick_period.checked_sub(tick_start.elapsed()).unwrap_or_default());
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn board_size(&self) -> Coords {
        let config = self.state.config();
        (config.grid_width as TermInt * CELL_COLUMNS + 2, config.grid_height as TermInt + 2)
    }

    fn redraw(&mut self) -> Result<()> {
        let board = self.board_size();
        self.term.clear()?;
        self.term.draw_borders(board)?;

        let hint: String = CONTROLS_HINT.chars().take(board.0.saturating_sub(4) as usize).collect();
        self.term.print_str_at((2, board.1 - 1), &hint)?;
        self.print_score()?;

        if let Some(apple) = self.state.food() {
            self.print_cell(apple, APPLE_GLYPH)?;
        }
        self.print_snake()?;

        self.shown_phase = Phase::Playing;
        self.sync_overlay()?;
        self.term.flush()
    }

    fn print_snake(&mut self) -> Result<()> {
        let body: Vec<Cell> = self.state.snake().body().iter().skip(1).copied().collect();
        for pos in body {
            self.print_cell(pos, SNAKE_BODY_GLYPH)?;
        }
        self.print_head()
    }

    fn print_head(&mut self) -> Result<()> {
        let snake = self.state.snake();
        let head_char = snake.head_char();
        let head = snake.head();
        self.print_cell(head, [head_char, head_char])
    }

    fn print_step(&mut self, step: &Step, food_before: Option<Cell>) -> Result<()> {
        if let Some(old_tail) = step.old_tail {
            self.print_cell(old_tail, EMPTY_GLYPH)?;
        }

        // A one-cell snake has no body left behind its head
        if self.state.snake().len() > 1 {
            self.print_cell(step.old_head, SNAKE_BODY_GLYPH)?;
        }

        let food = self.state.food();
        if food != food_before {
            if let Some(apple) = food {
                self.print_cell(apple, APPLE_GLYPH)?;
            }
            self.print_score()?;
        }

        self.print_head()
    }

    fn print_score(&mut self) -> Result<()> {
        let text = format!(" Score: {} ", self.state.score());
        self.term.print_str_at((2, 0), &text)
    }

    fn print_cell(&mut self, cell: Cell, glyph: [char; 2]) -> Result<()> {
        if !self.state.in_bounds(cell) {
            return Ok(());
        }

        let (x, y) = screen_pos(cell);
        for (x_diff, &ch) in glyph.iter().enumerate() {
            self.term.print_at((x + x_diff as TermInt, y), ch)?;
        }
        Ok(())
    }

    fn sync_overlay(&mut self) -> Result<()> {
        let phase = self.state.phase();
        if phase == self.shown_phase {
            return Ok(());
        }

        match phase {
            Phase::Paused => self.term.show_message(&["Paused", "Press Space to resume"])?,
            Phase::Playing => self.term.hide_message()?,
            Phase::GameOver => self.show_game_over()?,
        }

        self.shown_phase = phase;
        Ok(())
    }

    fn show_game_over(&mut self) -> Result<()> {
        let won = self.state.won();

        if !won {
            let body: Vec<Cell> = self.state.snake().body().iter().copied().collect();
            for pos in body {
                self.print_cell(pos, DEAD_SNAKE_GLYPH)?;
            }
        }

        let title = if won {"You won!"} else {"Game over!"};
        let score = format!("Final score: {}", self.state.score());
        self.term.show_message(&[
            title,
            &score,
            "",
            "Press R to restart,",
            "or Q to quit.",
        ])
    }
}

/// Top-left terminal position of a grid cell, inside the one-character border.
fn screen_pos((x, y): Cell) -> Coords {
    (1 + x as TermInt * CELL_COLUMNS, 1 + y as TermInt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_inside_the_border() {
        assert_eq!(screen_pos((0, 0)), (1, 1));
        assert_eq!(screen_pos((3, 2)), (7, 3));
        assert_eq!(screen_pos((39, 29)), (79, 30));
    }
}
