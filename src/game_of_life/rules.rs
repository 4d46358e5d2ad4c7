//! Conway's B3/S23 rules on a toroidal grid

use super::Grid;
use rayon::prelude::*;

/// Grids with at least this many cells are stepped row-parallel
pub const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Generation stepper
pub struct LifeStepper;

impl LifeStepper {
    /// Evolve the grid one generation forward into a brand-new grid.
    ///
    /// Every next state is computed from the untouched input, so a cell
    /// visited later never sees a neighbor that has already advanced.
    pub fn step(current: &Grid) -> Grid {
        let next_cells: Vec<bool> = if current.cells.len() >= PARALLEL_THRESHOLD {
            (0..current.rows)
                .into_par_iter()
                .flat_map_iter(|row| (0..current.cols).map(move |col| Self::next_state(current, row, col)))
                .collect()
        } else {
            (0..current.rows)
                .flat_map(|row| (0..current.cols).map(move |col| Self::next_state(current, row, col)))
                .collect()
        };

        Grid {
            rows: current.rows,
            cols: current.cols,
            cells: next_cells,
        }
    }

    fn next_state(current: &Grid, row: usize, col: usize) -> bool {
        Self::should_be_alive(current.get(row, col), current.count_neighbors(row, col))
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid = Self::step(&grid);
        }
        grid
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        matches!((current_state, neighbor_count), (true, 2) | (true, 3) | (false, 3))
    }

    /// Smallest period `p` in `1..=max_period` after which the grid repeats exactly
    pub fn detect_period(grid: &Grid, max_period: usize) -> Option<usize> {
        let mut current = grid.clone();
        for period in 1..=max_period {
            current = Self::step(&current);
            if current == *grid {
                return Some(period);
            }
        }
        None
    }
}

/// Advance `grid` one generation; `rows`/`cols` must match the grid's own dimensions
pub fn step(grid: &Grid, rows: usize, cols: usize) -> Grid {
    debug_assert!(
        grid.rows == rows && grid.cols == cols,
        "step called with {}x{} for a {}x{} grid",
        rows,
        cols,
        grid.rows,
        grid.cols
    );
    LifeStepper::step(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{decode, seed};

    #[test]
    fn test_still_life_block() {
        for size in [4, 5, 8] {
            let grid = Grid::with_living(size, size, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
            let evolved = step(&grid, size, size);
            assert_eq!(grid, evolved, "block changed on {}x{}", size, size);
        }
    }

    #[test]
    fn test_isolated_cell_dies_across_wrap() {
        let grid = Grid::with_living(3, 3, &[(0, 0)]);
        let next = step(&grid, 3, 3);
        assert!(!next.get(0, 0));
        assert!(next.is_empty());
    }

    #[test]
    fn test_wrapped_birth() {
        // Three cells straddling the corner of a 5x5 torus give (0, 0) three neighbors
        let grid = Grid::with_living(5, 5, &[(4, 4), (4, 0), (0, 4)]);
        let next = LifeStepper::step(&grid);
        assert!(next.get(0, 0));
    }

    #[test]
    fn test_oscillator_blinker() {
        let grid = seed(&decode("3o!"), 8, 8);
        let once = LifeStepper::step(&grid);

        assert_ne!(grid, once);
        let mut vertical = once.living_cells();
        vertical.sort();
        // Horizontal at row 3 cols 2..=4 turns vertical through (3, 3)
        assert_eq!(vertical, vec![(2, 3), (3, 3), (4, 3)]);

        let twice = LifeStepper::step(&once);
        assert_eq!(grid.living_cells(), twice.living_cells());
    }

    #[test]
    fn test_pulsar_period_three() {
        let pulsar = "2b3o3b3o2b2$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o2b2$\
                      2b3o3b3o2b$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!";
        let grid = seed(&decode(pulsar), 30, 30);
        assert_eq!(grid.living_count(), 48);

        let evolved = LifeStepper::evolve_generations(grid.clone(), 3);
        assert_eq!(grid.living_cells(), evolved.living_cells());
        assert_eq!(LifeStepper::detect_period(&grid, 10), Some(3));
    }

    #[test]
    fn test_step_does_not_mutate_input() {
        let grid = seed(&decode("b3o$3o!"), 6, 6);
        let before = serde_json::to_string(&grid).unwrap();
        let _ = step(&grid, 6, 6);
        let after = serde_json::to_string(&grid).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_step_preserves_dimensions() {
        for (rows, cols) in [(1, 1), (1, 7), (3, 3), (5, 9), (40, 40), (64, 80)] {
            let grid = seed(&decode("b3o$3o!"), rows, cols);
            let next = step(&grid, rows, cols);
            assert_eq!((next.rows, next.cols), (rows, cols));
            assert_eq!(next.cells.len(), rows * cols);
        }
    }

    #[test]
    fn test_parallel_path_matches_sequential() {
        // 70x70 crosses the parallel threshold; compare against per-cell rule application
        let grid = seed(&decode("2bo4bo2b$2ob4ob2o$2bo4bo!"), 70, 70);
        let next = LifeStepper::step(&grid);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let expected =
                    LifeStepper::should_be_alive(grid.get(row, col), grid.count_neighbors(row, col));
                assert_eq!(next.get(row, col), expected);
            }
        }
    }

    #[test]
    fn test_rule_logic() {
        assert!(LifeStepper::should_be_alive(true, 2));
        assert!(LifeStepper::should_be_alive(true, 3));
        assert!(LifeStepper::should_be_alive(false, 3));
        assert!(!LifeStepper::should_be_alive(true, 1));
        assert!(!LifeStepper::should_be_alive(true, 4));
        assert!(!LifeStepper::should_be_alive(false, 2));
        assert!(!LifeStepper::should_be_alive(false, 4));
    }

    #[test]
    fn test_empty_grid_has_period_one() {
        let grid = Grid::new(4, 4);
        assert_eq!(LifeStepper::detect_period(&grid, 5), Some(1));
    }
}
