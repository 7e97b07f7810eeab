use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement, the first reveal is not protected.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        let size = config.size();
        let mut grid = Grid::new(size);
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // rejection sampling, `GameConfig` guarantees a free cell so this ends
        let mut attempts: u64 = 0;
        while grid.mine_count() < config.mines() {
            let coords = (rng.random_range(0..size), rng.random_range(0..size));
            grid.place_mine(coords);
            attempts += 1;
        }

        grid.fill_adjacent_counts();
        log::debug!(
            "Generated {}x{} board with {} mines from seed {} after {} draws",
            size,
            size,
            grid.mine_count(),
            self.seed,
            attempts
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord, mines: CellCount, seed: u64) -> Grid {
        RandomBoardGenerator::new(seed).generate(GameConfig::new(size, mines).unwrap())
    }

    #[test]
    fn places_requested_mine_count() {
        for seed in 0..20 {
            let grid = generate(8, 10, seed);
            let mines = grid.iter().filter(|(_, cell)| cell.is_mine()).count();
            assert_eq!(mines, 10);
            assert_eq!(grid.mine_count(), 10);
        }
    }

    #[test]
    fn same_seed_same_board() {
        assert_eq!(generate(12, 20, 42), generate(12, 20, 42));
    }

    #[test]
    fn two_by_two_single_mine_touches_every_safe_cell() {
        for seed in 0..10 {
            let grid = generate(2, 1, seed);
            for (_, cell) in grid.iter().filter(|(_, cell)| !cell.is_mine()) {
                assert_eq!(cell.adjacent_mines(), 1);
            }
        }
    }

    #[test]
    fn nearly_full_board_terminates() {
        let grid = generate(3, 8, 7);
        assert_eq!(grid.mine_count(), 8);
        assert_eq!(grid.safe_cell_count(), 1);
        let (_, safe) = grid.iter().find(|(_, cell)| !cell.is_mine()).unwrap();
        assert!(safe.adjacent_mines() >= 3);
    }

    #[test]
    fn zero_mines_is_blank() {
        let grid = generate(5, 0, 1);
        assert!(grid.iter().all(|(_, cell)| !cell.is_mine() && cell.adjacent_mines() == 0));
    }
}
