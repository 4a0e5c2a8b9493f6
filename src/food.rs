use std::collections::HashSet;

use rand::Rng;

use crate::Cell;
use crate::config::GameConfig;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Picks a uniformly random free cell by rejection sampling.
    ///
    /// Returns `None` when `occupied` covers the whole grid, since no cell is left to sample.
    pub fn place<'a, I, R>(occupied: I, config: &GameConfig, rng: &mut R) -> Option<Food>
    where
        I: IntoIterator<Item = &'a Cell>,
        R: Rng,
    {
        let (width, height) = (config.grid_width, config.grid_height);
        let taken: HashSet<Cell> = occupied
            .into_iter()
            .copied()
            .filter(|&(x, y)| x >= 0 && y >= 0 && x < width && y < height)
            .collect();

        if taken.len() >= config.cell_count() {
            return None;
        }

        loop {
            let candidate = (rng.gen_range(0..width), rng.gen_range(0..height));
            if !taken.contains(&candidate) {
                return Some(Food { position: candidate });
            }
        }
    }

    #[cfg(test)]
    pub fn at(position: Cell) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const RNG_SEED: u64 = 0x5EED_F00D;

    fn config(width: i32, height: i32) -> GameConfig {
        GameConfig { grid_width: width, grid_height: height, ..GameConfig::default() }
    }

    #[test]
    fn never_lands_on_occupied_cells() {
        let config = config(5, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let occupied: Vec<Cell> = (0..5).flat_map(|x| (0..5).map(move |y| (x, y))).filter(|&c| c != (1, 3)).collect();

        for _ in 0..100 {
            let food = Food::place(&occupied, &config, &mut rng).unwrap();
            assert_eq!(food.position(), (1, 3));
        }
    }

    #[test]
    fn stays_inside_grid() {
        let config = config(7, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let occupied = vec![(3, 1)];

        for _ in 0..500 {
            let (x, y) = Food::place(&occupied, &config, &mut rng).unwrap().position();
            assert!((0..7).contains(&x) && (0..3).contains(&y));
            assert_ne!((x, y), (3, 1));
        }
    }

    #[test]
    fn full_board_yields_nothing() {
        let config = config(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let occupied = vec![(0, 0), (1, 0), (1, 1), (0, 1)];

        assert_eq!(Food::place(&occupied, &config, &mut rng), None);
    }

    #[test]
    fn out_of_bounds_cells_do_not_count_towards_full() {
        let config = config(2, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(RNG_SEED);
        let occupied = vec![(2, 0), (1, 0), (1, 1), (0, 1)];

        assert_eq!(Food::place(&occupied, &config, &mut rng), Some(Food::at((0, 0))));
    }
}
