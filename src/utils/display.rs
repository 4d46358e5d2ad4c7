//! Terminal and JSON renderers plus console formatting helpers

use crate::game_of_life::Grid;
use crate::orb::{Frame, Renderer, Rgb, Snapshot};
use anyhow::{Context, Result};
use std::io::Write;

/// Whether the cell at `(row, col)` has its center inside the grid's inscribed circle
pub fn inside_orb(row: usize, col: usize, rows: usize, cols: usize) -> bool {
    let radius = rows.min(cols) as f64 / 2.0;
    let dy = row as f64 + 0.5 - rows as f64 / 2.0;
    let dx = col as f64 + 0.5 - cols as f64 / 2.0;
    dy * dy + dx * dx <= radius * radius
}

/// How frames are drawn to a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalStyle {
    pub color: bool,
    pub orb_mask: bool,
    /// Move the cursor home before each frame instead of scrolling
    pub in_place: bool,
}

/// Render one frame as text, two columns per cell
pub fn format_frame(frame: &Frame<'_>, style: TerminalStyle) -> String {
    let grid = frame.grid;
    let background = frame.theme.background();
    let mut output = String::with_capacity(grid.rows * (grid.cols * 24 + 1));

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            if style.orb_mask && !inside_orb(row, col, grid.rows, grid.cols) {
                output.push_str("  ");
                continue;
            }
            let alive = grid.get(row, col);
            match (style.color, alive) {
                (true, true) => {
                    let rgb = frame.theme.color(row, col, frame.clock).to_rgb();
                    output.push_str(&paint(rgb, background, "██"));
                }
                (true, false) => output.push_str(&paint(background, background, "  ")),
                (false, true) => output.push_str("██"),
                (false, false) => output.push_str("··"),
            }
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "generation {} · {} live · {}\n",
        frame.generation,
        grid.living_count(),
        frame.theme
    ));
    output
}

fn paint(fg: Rgb, bg: Rgb, text: &str) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg.r, fg.g, fg.b, bg.r, bg.g, bg.b, text
    )
}

/// Draws frames to a terminal-like writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    style: TerminalStyle,
    frames: u64,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, style: TerminalStyle) -> Self {
        Self {
            out,
            style,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        if self.style.in_place {
            let prefix = if self.frames == 0 { "\x1b[2J\x1b[H" } else { "\x1b[H" };
            self.out.write_all(prefix.as_bytes())?;
        }
        self.out
            .write_all(format_frame(frame, self.style).as_bytes())
            .context("Failed to write frame")?;
        self.out.flush().context("Failed to flush frame")?;
        self.frames += 1;
        Ok(())
    }
}

/// Writes one JSON snapshot per frame, newline-delimited
pub struct SnapshotRenderer<W: Write> {
    out: W,
}

impl<W: Write> SnapshotRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for SnapshotRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.out, &Snapshot::from(frame))
            .context("Failed to serialize snapshot")?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Format a grid in compact form
pub fn format_grid_compact(grid: &Grid) -> String {
    let mut output = String::new();
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            output.push(if grid.get(row, col) { '█' } else { '·' });
        }
        output.push('\n');
    }
    output
}

/// Tone of a CLI status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Failed,
    Note,
}

impl Status {
    fn tint(self) -> Rgb {
        match self {
            Status::Ok => Rgb::new(0x5f, 0xd7, 0x87),
            Status::Warning => Rgb::new(0xff, 0xd7, 0x5f),
            Status::Failed => Rgb::new(0xff, 0x5f, 0x5f),
            Status::Note => Rgb::new(0x5f, 0xaf, 0xff),
        }
    }

    /// `text` in this status's tint, or unchanged when color is off
    pub fn label(self, text: &str) -> String {
        if color_enabled() {
            let tint = self.tint();
            format!("\x1b[1;38;2;{};{};{}m{}\x1b[0m", tint.r, tint.g, tint.b, text)
        } else {
            text.to_string()
        }
    }
}

/// Off under `NO_COLOR` or `TERM=dumb`
pub fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::env::var("TERM").map_or(true, |term| term != "dumb")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orb::Theme;

    fn plain(orb_mask: bool) -> TerminalStyle {
        TerminalStyle {
            color: false,
            orb_mask,
            in_place: false,
        }
    }

    #[test]
    fn test_orb_mask_corners() {
        assert!(!inside_orb(0, 0, 10, 10));
        assert!(!inside_orb(9, 9, 10, 10));
        assert!(inside_orb(5, 5, 10, 10));
        assert!(inside_orb(0, 4, 10, 10));
        assert!(inside_orb(4, 0, 10, 10));
    }

    #[test]
    fn test_plain_frame_layout() {
        let grid = Grid::with_living(2, 3, &[(0, 1), (1, 2)]);
        let frame = Frame {
            generation: 7,
            clock: 0,
            theme: Theme::Solid,
            grid: &grid,
        };
        let text = format_frame(&frame, plain(false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "··██··");
        assert_eq!(lines[1], "····██");
        assert_eq!(lines[2], "generation 7 · 2 live · solid");
    }

    #[test]
    fn test_masked_corners_are_blank() {
        let grid = Grid::with_living(10, 10, &[(0, 0), (5, 5)]);
        let frame = Frame {
            generation: 0,
            clock: 0,
            theme: Theme::Pastel,
            grid: &grid,
        };
        let text = format_frame(&frame, plain(true));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("  "));
        assert!(text.lines().nth(5).unwrap().contains("██"));
    }

    #[test]
    fn test_colored_frame_uses_theme() {
        let grid = Grid::with_living(1, 1, &[(0, 0)]);
        let frame = Frame {
            generation: 0,
            clock: 0,
            theme: Theme::Solid,
            grid: &grid,
        };
        let style = TerminalStyle {
            color: true,
            orb_mask: false,
            in_place: false,
        };
        let text = format_frame(&frame, style);
        let rgb = Theme::Solid.color(0, 0, 0).to_rgb();
        assert!(text.contains(&format!("38;2;{};{};{}m", rgb.r, rgb.g, rgb.b)));
    }

    #[test]
    fn test_terminal_renderer_writes_frames() {
        let grid = Grid::with_living(3, 3, &[(1, 1)]);
        let frame = Frame {
            generation: 0,
            clock: 0,
            theme: Theme::Neon,
            grid: &grid,
        };
        let style = TerminalStyle {
            in_place: true,
            ..plain(false)
        };
        let mut renderer = TerminalRenderer::new(Vec::new(), style);
        renderer.render(&frame).unwrap();
        renderer.render(&frame).unwrap();
        assert_eq!(renderer.frames(), 2);

        let written = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(written.starts_with("\x1b[2J\x1b[H"));
        assert_eq!(written.matches("\x1b[H").count(), 2);
    }

    #[test]
    fn test_snapshot_renderer_emits_json_lines() {
        let grid = Grid::with_living(4, 4, &[(1, 2)]);
        let frame = Frame {
            generation: 3,
            clock: 12,
            theme: Theme::Sunset,
            grid: &grid,
        };
        let mut renderer = SnapshotRenderer::new(Vec::new());
        renderer.render(&frame).unwrap();
        renderer.render(&frame).unwrap();

        let written = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        let snapshot: Snapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(snapshot.generation, 3);
        assert_eq!(snapshot.live, vec![(1, 2)]);
    }

    #[test]
    fn test_grid_compact() {
        let grid = Grid::with_living(2, 2, &[(0, 0)]);
        assert_eq!(format_grid_compact(&grid), "█·\n··\n");
    }

    #[test]
    fn test_status_label_keeps_text() {
        for status in [Status::Ok, Status::Warning, Status::Failed, Status::Note] {
            let label = status.label("3 anomalies");
            assert!(label.contains("3 anomalies"));
            if !color_enabled() {
                assert_eq!(label, "3 anomalies");
            }
        }
        assert_ne!(Status::Ok.tint(), Status::Failed.tint());
    }
}
