use rand::Rng;

use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// Cell returned by [`spawn_position`] when the snake covers the whole board.
pub const FALLBACK_CELL: Cell = Cell::new(0, 0);

/// Random probes tried before falling back to enumerating free cells.
const MAX_SAMPLING_ATTEMPTS: usize = 32;

/// Spawns food on a free cell, or [`FALLBACK_CELL`] when none is left.
///
/// The fallback may itself be occupied; use [`try_spawn_position`] to tell a
/// full board apart.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: Grid, snake: &Snake) -> Cell {
    try_spawn_position(rng, grid, snake).unwrap_or(FALLBACK_CELL)
}

/// Picks a cell not occupied by the snake, uniformly among all free cells.
///
/// Sparse boards are served by rejection sampling; after
/// `MAX_SAMPLING_ATTEMPTS` misses the free cells are enumerated and one is
/// drawn from the list. Returns `None` when the snake fills the board.
#[must_use]
pub fn try_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
) -> Option<Cell> {
    let total = grid.total_cells();
    if snake.len() >= total {
        return None;
    }

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = grid.cell_at(rng.gen_range(0..total));
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }

    let candidates: Vec<Cell> = grid.cells().filter(|cell| !snake.occupies(*cell)).collect();
    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::grid::{Cell, Grid};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{FALLBACK_CELL, spawn_position, try_spawn_position};

    #[test]
    fn food_spawn_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
            Direction::Left,
        );

        for _ in 0..100 {
            let food = spawn_position(&mut rng, Grid::new(20, 8, 6), &snake);
            assert!(!snake.occupies(food));
        }
    }

    #[test]
    fn nearly_full_board_finds_the_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = Grid::new(10, 4, 4);
        let free = Cell::new(3, 3);
        let body: Vec<Cell> = grid.cells().filter(|cell| *cell != free).collect();
        let snake = Snake::from_segments(body, Direction::Right);

        for _ in 0..20 {
            assert_eq!(try_spawn_position(&mut rng, grid, &snake), Some(free));
        }
    }

    #[test]
    fn full_board_falls_back_to_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = Grid::new(20, 2, 1);
        let snake = Snake::from_segments(
            vec![Cell::new(1, 0), Cell::new(0, 0)],
            Direction::Right,
        );

        assert_eq!(try_spawn_position(&mut rng, grid, &snake), None);
        assert_eq!(spawn_position(&mut rng, grid, &snake), FALLBACK_CELL);
        assert_eq!(FALLBACK_CELL, Cell::new(0, 0));
    }

    #[test]
    fn every_free_cell_is_reachable() {
        let mut rng = StdRng::seed_from_u64(99);
        let grid = Grid::new(10, 3, 3);
        let snake = Snake::from_segments(
            vec![Cell::new(1, 1), Cell::new(1, 0), Cell::new(0, 0)],
            Direction::Down,
        );

        let mut hits: HashMap<Cell, usize> = HashMap::new();
        for _ in 0..3_000 {
            let cell = spawn_position(&mut rng, grid, &snake);
            *hits.entry(cell).or_default() += 1;
        }

        assert_eq!(hits.len(), 6);
        for count in hits.values() {
            assert!(*count > 300, "free cells should be drawn evenly: {hits:?}");
        }
    }
}
