//! Grid representation and utilities for Game of Life

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size toroidal Game of Life grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a grid with the given cells alive; out-of-range coordinates are ignored
    pub fn with_living(rows: usize, cols: usize, living: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &(row, col) in living {
            grid.revive(row, col);
        }
        grid
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.rows && col < self.cols {
            self.cells[self.index(row, col)]
        } else {
            false // Out of bounds cells are considered dead
        }
    }

    /// Mark a cell alive, returning false if it lies outside the grid
    pub(crate) fn revive(&mut self, row: usize, col: usize) -> bool {
        if row < self.rows && col < self.cols {
            let idx = self.index(row, col);
            self.cells[idx] = true;
            true
        } else {
            false
        }
    }

    /// Count living neighbors of a cell, wrapping around both edges
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if self.is_neighbor_alive(row as isize + dr, col as isize + dc) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Toroidal lookup: offset by the dimension before the modulo so -1 maps to the last index
    fn is_neighbor_alive(&self, row: isize, col: isize) -> bool {
        let rows = self.rows as isize;
        let cols = self.cols as isize;
        let wrapped_row = ((row + rows) % rows) as usize;
        let wrapped_col = ((col + cols) % cols) as usize;
        self.cells[self.index(wrapped_row, wrapped_col)]
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if self.get(row, col) { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
