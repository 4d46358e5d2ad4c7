//! Orb color themes and the hue clock that drives them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0);
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = h / 60.0;
        let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

        Rgb {
            r: channel(r1),
            g: channel(g1),
            b: channel(b1),
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.0}, {:.0}%, {:.0}%)", self.h, self.s, self.l)
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Palette applied to live cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Pastel rainbow sweeping diagonally
    Pastel,
    /// Teal/purple swell
    Neon,
    Sunset,
    /// Single flat blue, as on the minimal spinner
    Solid,
}

impl Theme {
    /// Themes eligible for random selection
    pub const ANIMATED: [Theme; 3] = [Theme::Pastel, Theme::Neon, Theme::Sunset];

    pub const ALL: [Theme; 4] = [Theme::Pastel, Theme::Neon, Theme::Sunset, Theme::Solid];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Pastel => "pastel",
            Theme::Neon => "neon",
            Theme::Sunset => "sunset",
            Theme::Solid => "solid",
        }
    }

    pub fn background(self) -> Rgb {
        match self {
            Theme::Pastel => Rgb::new(0x0b, 0x0b, 0x10),
            Theme::Neon => Rgb::new(0x0a, 0x06, 0x15),
            Theme::Sunset => Rgb::new(0x0c, 0x0a, 0x12),
            Theme::Solid => Rgb::new(0, 0, 0),
        }
    }

    /// Color of the live cell at `(row, col)` when the clock reads `clock` degrees
    pub fn color(self, row: usize, col: usize, clock: u32) -> Hsl {
        let (i, j, t) = (row as u64, col as u64, clock as u64);
        match self {
            Theme::Pastel => Hsl::new(((i * 9 + j * 6 + t) % 360) as f64, 75.0, 65.0),
            Theme::Neon => {
                let swell = ((i + j + t) as f64 * 0.03).sin() * 40.0;
                Hsl::new((200.0 + swell) % 360.0, 85.0, 60.0)
            }
            Theme::Sunset => Hsl::new(
                (20 + (i * 3 + t) % 60) as f64,
                90.0,
                (55 + (j + t) % 10) as f64,
            ),
            Theme::Solid => Hsl::new(200.0, 80.0, 60.0),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme '{}'", s))
    }
}

/// Hue phase in degrees, advanced once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock {
    degrees: u32,
    step: u32,
}

impl AnimationClock {
    pub fn new(step: u32) -> Self {
        Self {
            degrees: 0,
            step: step % 360,
        }
    }

    pub fn degrees(&self) -> u32 {
        self.degrees
    }

    pub fn advance(&mut self) -> u32 {
        self.degrees = (self.degrees + self.step) % 360;
        self.degrees
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(4)
    }
}
