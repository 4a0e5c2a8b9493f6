use std::collections::VecDeque;

use crate::Cell;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

/// What a single `advance` changed, so the screen can be patched instead of redrawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub new_head: Cell,
    pub old_head: Cell,
    /// `None` when the snake grew on this step.
    pub old_tail: Option<Cell>,
}

#[derive(Clone, Debug)]
pub struct Snake {
    // Head at the front
    body: VecDeque<Cell>,
    direction: Direction,
    pending_growth: bool,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        Snake { body: VecDeque::from(vec![start]), direction: Right, pending_growth: false }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Cell>, direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body: body.into(), direction, pending_growth: false }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn has_pending_growth(&self) -> bool {
        self.pending_growth
    }

    pub fn advance(&mut self) -> Step {
        let old_head = self.head();
        let (dx, dy) = self.direction.delta();
        let new_head = (old_head.0 + dx, old_head.1 + dy);

        self.body.push_front(new_head);

        let old_tail = if self.pending_growth {
            self.pending_growth = false;
            None
        } else {
            self.body.pop_back()
        };

        Step { new_head, old_head, old_tail }
    }

    pub fn request_growth(&mut self) {
        self.pending_growth = true;
    }

    /// True if the head left the `width` x `height` grid or overlaps the rest of the body.
    pub fn detect_collision(&self, width: i32, height: i32) -> bool {
        let (x, y) = self.head();
        if x < 0 || y < 0 || x >= width || y >= height {
            return true;
        }

        self.body.iter().skip(1).any(|&cell| cell == (x, y))
    }

    /// Turns the snake, unless `new_direction` would reverse it onto its own neck.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction == self.direction.opposite() {
            tracing::trace!("ignoring reversal from {:?} to {:?}", self.direction, new_direction);
            return;
        }

        self.direction = new_direction;
    }

    pub fn head_char(&self) -> char {
        match self.direction() {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Direction; 4] = [Up, Down, Left, Right];

    #[test]
    fn opposite_deltas_negate() {
        for dir in ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dir.opposite().delta(), (-dx, -dy));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn starts_as_single_cell_heading_right() {
        let snake = Snake::new((20, 15));
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(20, 15)]);
        assert_eq!(snake.direction(), Right);
        assert!(!snake.has_pending_growth());
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::from_body(vec![(3, 2), (2, 2), (1, 2)], Right);

        let step = snake.advance();

        assert_eq!(step, Step { new_head: (4, 2), old_head: (3, 2), old_tail: Some((1, 2)) });
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(4, 2), (3, 2), (2, 2)]);
    }

    #[test]
    fn growth_applies_on_next_advance_only() {
        let mut snake = Snake::new((2, 2));
        snake.request_growth();
        snake.request_growth();
        assert_eq!(snake.len(), 1);

        let step = snake.advance();
        assert_eq!(step.old_tail, None);
        assert_eq!(snake.len(), 2);
        assert!(!snake.has_pending_growth());

        snake.advance();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(4, 2), (3, 2)]);
    }

    #[test]
    fn wall_collisions() {
        for (body, dir) in [
            (vec![(0, 2)], Left),
            (vec![(4, 2)], Right),
            (vec![(2, 0)], Up),
            (vec![(2, 4)], Down),
        ] {
            let mut snake = Snake::from_body(body, dir);
            assert!(!snake.detect_collision(5, 5));
            snake.advance();
            assert!(snake.detect_collision(5, 5), "heading {:?}", dir);
        }
    }

    #[test]
    fn self_collision_excludes_head() {
        let snake = Snake::from_body(vec![(2, 2), (2, 3), (3, 3)], Up);
        assert!(!snake.detect_collision(5, 5));

        // Head turns back into the body ring
        let mut snake = Snake::from_body(vec![(2, 2), (2, 3), (3, 3), (3, 2), (3, 1)], Right);
        snake.advance();
        assert!(snake.detect_collision(5, 5));
    }

    #[test]
    fn moving_into_vacated_tail_is_safe() {
        let mut snake = Snake::from_body(vec![(2, 2), (2, 3), (3, 3), (3, 2)], Right);
        snake.advance();
        assert_eq!(snake.head(), (3, 2));
        assert!(!snake.detect_collision(5, 5));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new((2, 2));
        snake.set_direction(Left);
        assert_eq!(snake.direction(), Right);

        snake.set_direction(Right);
        assert_eq!(snake.direction(), Right);

        snake.set_direction(Up);
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn last_accepted_turn_wins() {
        let mut snake = Snake::new((2, 2));
        snake.set_direction(Up);
        snake.set_direction(Left);
        snake.set_direction(Down);
        assert_eq!(snake.direction(), Down);

        snake.advance();
        assert_eq!(snake.head(), (2, 3));
    }

    #[test]
    fn head_char_follows_direction() {
        let mut snake = Snake::new((2, 2));
        assert_eq!(snake.head_char(), '>');
        snake.set_direction(Up);
        assert_eq!(snake.head_char(), '^');
    }
}
