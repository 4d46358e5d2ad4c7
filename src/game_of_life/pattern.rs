//! RLE pattern decoding
//!
//! The decoder is deliberately permissive: only digits, `b`, `o`, `$` and `!`
//! carry meaning in the run body, and anything else is skipped. Malformed input
//! degrades to a partial or empty pattern instead of failing, and every
//! irregularity is reported as a [`DecodeAnomaly`] alongside the result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound applied to any single run count
pub const MAX_RUN_LENGTH: usize = 4096;

/// A decoded Game of Life pattern: sparse live cells plus their bounding box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    cells: Vec<(usize, usize)>,
    height: usize,
    width: usize,
}

impl Pattern {
    /// Build a pattern from live-cell coordinates, deriving the bounding box
    pub fn from_cells(cells: Vec<(usize, usize)>) -> Self {
        let height = cells.iter().map(|&(row, _)| row + 1).max().unwrap_or(0);
        let width = cells.iter().map(|&(_, col)| col + 1).max().unwrap_or(0);
        Self { cells, height, width }
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// One plus the largest row holding a live cell, 0 when empty
    pub fn height(&self) -> usize {
        self.height
    }

    /// One plus the largest column holding a live cell, 0 when empty
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Irregularities met while decoding; none of them abort the decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeAnomaly {
    /// `offset` counts characters from the start of the decoder's input, header lines included
    #[error("unrecognized character {ch:?} at offset {offset}")]
    UnrecognizedChar { ch: char, offset: usize },
    #[error("run count {count} has no token to apply to")]
    DanglingCount { count: usize },
    #[error("pattern is not terminated by '!'")]
    Unterminated,
    #[error("run count {requested} clamped to {applied}")]
    RunClamped { requested: usize, applied: usize },
}

/// Result of a decode along with everything the decoder skipped or adjusted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    pub pattern: Pattern,
    pub anomalies: Vec<DecodeAnomaly>,
}

/// Which RLE framing the decoder expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RleDialect {
    /// `#` comment lines and the `x = .., y = ..` header line are dropped first
    #[default]
    Annotated,
    /// The whole input is the run body
    Bare,
}

/// Decoder for the simplified RLE dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDecoder {
    dialect: RleDialect,
}

impl PatternDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dialect(dialect: RleDialect) -> Self {
        Self { dialect }
    }

    /// Decode a pattern, discarding the anomaly report
    pub fn decode(&self, rle: &str) -> Pattern {
        self.decode_with_report(rle).pattern
    }

    /// Decode a pattern and collect every anomaly encountered
    pub fn decode_with_report(&self, rle: &str) -> DecodeReport {
        let mut scanner = RunScanner::default();
        let mut terminated = false;

        for (offset, ch) in body_chars(rle, self.dialect) {
            match ch {
                '0'..='9' => scanner.push_digit(ch),
                'b' => {
                    let n = scanner.take_count();
                    scanner.col = scanner.col.saturating_add(n);
                }
                'o' => {
                    let n = scanner.take_count();
                    for _ in 0..n {
                        scanner.cells.push((scanner.row, scanner.col));
                        scanner.col = scanner.col.saturating_add(1);
                    }
                }
                '$' => {
                    let n = scanner.take_count();
                    scanner.row = scanner.row.saturating_add(n);
                    scanner.col = 0;
                }
                '!' => {
                    terminated = true;
                    break;
                }
                ch if ch.is_whitespace() => {}
                _ => scanner
                    .anomalies
                    .push(DecodeAnomaly::UnrecognizedChar { ch, offset }),
            }
        }

        if let Some(count) = scanner.pending.take() {
            scanner.anomalies.push(DecodeAnomaly::DanglingCount { count });
        }
        if !terminated {
            scanner.anomalies.push(DecodeAnomaly::Unterminated);
        }

        for anomaly in &scanner.anomalies {
            log::debug!("RLE decode: {}", anomaly);
        }

        DecodeReport {
            pattern: Pattern::from_cells(scanner.cells),
            anomalies: scanner.anomalies,
        }
    }
}

/// Cursor state while walking the run body
#[derive(Default)]
struct RunScanner {
    row: usize,
    col: usize,
    pending: Option<usize>,
    cells: Vec<(usize, usize)>,
    anomalies: Vec<DecodeAnomaly>,
}

impl RunScanner {
    fn push_digit(&mut self, ch: char) {
        let digit = ch.to_digit(10).unwrap_or(0) as usize;
        let count = self.pending.unwrap_or(0);
        self.pending = Some(count.saturating_mul(10).saturating_add(digit));
    }

    /// Consume the pending count; absent means 1, an explicit 0 stays 0
    fn take_count(&mut self) -> usize {
        let requested = self.pending.take().unwrap_or(1);
        if requested > MAX_RUN_LENGTH {
            self.anomalies.push(DecodeAnomaly::RunClamped {
                requested,
                applied: MAX_RUN_LENGTH,
            });
            MAX_RUN_LENGTH
        } else {
            requested
        }
    }
}

/// Run-body characters paired with their offset in `rle`
///
/// The annotated dialect skips blank lines, lines starting with `#` in the
/// first column and the dimension line. An indented `#` line is body.
fn body_chars(rle: &str, dialect: RleDialect) -> Vec<(usize, char)> {
    let mut body = Vec::new();
    let mut offset = 0;

    for segment in rle.split_inclusive('\n') {
        let line = segment.trim_end_matches(&['\r', '\n'][..]);
        let keep = match dialect {
            RleDialect::Bare => true,
            RleDialect::Annotated => is_body_line(line),
        };
        let len = segment.chars().count();
        if keep {
            body.extend(segment.chars().enumerate().map(|(i, ch)| (offset + i, ch)));
        }
        offset += len;
    }

    body
}

fn is_body_line(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with('#') && !is_dimension_line(line)
}

/// Matches `x = <int>, y = <int>, rule = ...` by its leading `x =`, first column only
fn is_dimension_line(line: &str) -> bool {
    line.strip_prefix('x')
        .map(|rest| rest.trim_start().starts_with('='))
        .unwrap_or(false)
}

/// Decode with the default annotated dialect
pub fn decode(rle: &str) -> Pattern {
    PatternDecoder::default().decode(rle)
}
