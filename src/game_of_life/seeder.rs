//! Placing a decoded pattern into a fresh grid

use super::{Grid, Pattern};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Nominal pattern extent used by the orb's fixed centering
pub const NOMINAL_PATTERN_SIZE: usize = 20;

/// How the seeder derives the placement offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum CenteringMode {
    /// Center the pattern's own bounding box
    #[default]
    PatternRelative,
    /// Center a square of `size` cells regardless of the pattern's extent
    FixedNominal { size: usize },
}

/// Seeds grids from patterns under a fixed centering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSeeder {
    pub centering: CenteringMode,
    /// Negative offsets become 0 when set
    pub clamp_offsets: bool,
    /// Side length of the block drawn for each pattern cell
    pub scale: usize,
}

impl Default for GridSeeder {
    fn default() -> Self {
        Self {
            centering: CenteringMode::PatternRelative,
            clamp_offsets: true,
            scale: 1,
        }
    }
}

impl GridSeeder {
    pub fn new(centering: CenteringMode, clamp_offsets: bool) -> Self {
        Self {
            centering,
            clamp_offsets,
            scale: 1,
        }
    }

    pub fn with_scale(mut self, scale: usize) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Top-left placement offset `(row, col)` for a pattern in a `rows x cols` grid
    pub fn offsets(&self, pattern: &Pattern, rows: usize, cols: usize) -> (isize, isize) {
        let scale = self.scale.max(1);
        let (extent_rows, extent_cols) = match self.centering {
            CenteringMode::PatternRelative => (
                pattern.height().saturating_mul(scale),
                pattern.width().saturating_mul(scale),
            ),
            CenteringMode::FixedNominal { size } => (size, size),
        };

        let row = centered_offset(rows, extent_rows);
        let col = centered_offset(cols, extent_cols);

        if self.clamp_offsets {
            (row.max(0), col.max(0))
        } else {
            (row, col)
        }
    }

    /// Produce an all-dead grid with the pattern overlaid; cells landing outside are dropped
    pub fn seed(&self, pattern: &Pattern, rows: usize, cols: usize) -> Grid {
        let mut grid = Grid::new(rows, cols);
        let scale = self.scale.max(1);
        let side = to_isize(scale);
        let (offset_row, offset_col) = self.offsets(pattern, rows, cols);
        let mut dropped = 0usize;

        for &(r, c) in pattern.cells() {
            let top = offset_row.saturating_add(to_isize(r).saturating_mul(side));
            let left = offset_col.saturating_add(to_isize(c).saturating_mul(side));
            let row_span = clip(top, side, rows);
            let col_span = clip(left, side, cols);

            for row in row_span.clone() {
                for col in col_span.clone() {
                    grid.revive(row, col);
                }
            }

            let placed = row_span.len() * col_span.len();
            dropped = dropped.saturating_add(scale.saturating_mul(scale) - placed);
        }

        if dropped > 0 {
            log::debug!(
                "Seeding dropped {} cell(s) outside the {}x{} grid",
                dropped,
                rows,
                cols
            );
        }

        grid
    }
}

/// `floor((available - extent) / 2)`, rounding toward negative infinity
fn centered_offset(available: usize, extent: usize) -> isize {
    to_isize(available).saturating_sub(to_isize(extent)).div_euclid(2)
}

fn to_isize(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

/// The part of `start..start + len` inside `0..limit`
fn clip(start: isize, len: isize, limit: usize) -> Range<usize> {
    let limit = to_isize(limit);
    let begin = start.clamp(0, limit) as usize;
    let end = start.saturating_add(len).clamp(0, limit) as usize;
    begin..end.max(begin)
}

/// Seed with pattern-relative, clamped centering
pub fn seed(pattern: &Pattern, rows: usize, cols: usize) -> Grid {
    GridSeeder::default().seed(pattern, rows, cols)
}
