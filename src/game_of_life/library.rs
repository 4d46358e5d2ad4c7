//! Built-in oscillators the orb can start from

use super::pattern::{Pattern, PatternDecoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PULSAR_RLE: &str = "#N Pulsar
#O John Conway
#C A period 3 oscillator. Despite its size, this is the fourth most common oscillator (and by
#C far the most common of period greater than 2).
#C www.conwaylife.com/wiki/index.php?title=Pulsar
x = 13, y = 13, rule = B3/S23
2b3o3b3o2b2$o4bobo4bo$o4bobo4bo$o4bobo4bo$2b3o3b3o2b2$2b3o3b3o2b$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!";

/// The fixed set of starting patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinPattern {
    Pulsar,
    Pentadecathlon,
    Beacon,
    Toad,
    Blinker,
}

impl BuiltinPattern {
    pub const ALL: [BuiltinPattern; 5] = [
        BuiltinPattern::Pulsar,
        BuiltinPattern::Pentadecathlon,
        BuiltinPattern::Beacon,
        BuiltinPattern::Toad,
        BuiltinPattern::Blinker,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinPattern::Pulsar => "pulsar",
            BuiltinPattern::Pentadecathlon => "pentadecathlon",
            BuiltinPattern::Beacon => "beacon",
            BuiltinPattern::Toad => "toad",
            BuiltinPattern::Blinker => "blinker",
        }
    }

    /// RLE source; the pulsar keeps its comment and dimension header
    pub fn rle(self) -> &'static str {
        match self {
            BuiltinPattern::Pulsar => PULSAR_RLE,
            BuiltinPattern::Pentadecathlon => "2bo4bo2b$2ob4ob2o$2bo4bo!",
            BuiltinPattern::Beacon => "2o$2o$2b2o$2b2o!",
            BuiltinPattern::Toad => "b3o$3o!",
            BuiltinPattern::Blinker => "3o!",
        }
    }

    /// Oscillation period in generations
    pub fn period(self) -> usize {
        match self {
            BuiltinPattern::Pulsar => 3,
            BuiltinPattern::Pentadecathlon => 15,
            BuiltinPattern::Beacon | BuiltinPattern::Toad | BuiltinPattern::Blinker => 2,
        }
    }

    pub fn decode(self) -> Pattern {
        PatternDecoder::new().decode(self.rle())
    }
}

impl fmt::Display for BuiltinPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinPattern {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.name() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown pattern '{}' (expected one of: {})",
                    s,
                    itertools::join(Self::ALL.iter().map(|p| p.name()), ", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{seed, LifeStepper};

    #[test]
    fn test_every_builtin_decodes_cleanly() {
        for pattern in BuiltinPattern::ALL {
            let report = PatternDecoder::new().decode_with_report(pattern.rle());
            assert!(report.anomalies.is_empty(), "{}: {:?}", pattern, report.anomalies);
            assert!(!report.pattern.is_empty());
        }
    }

    #[test]
    fn test_pulsar_header_is_stripped() {
        let pulsar = BuiltinPattern::Pulsar.decode();
        assert_eq!(pulsar.population(), 48);
        assert_eq!(pulsar.height(), 13);
        assert_eq!(pulsar.width(), 13);
    }

    #[test]
    fn test_builtin_bounding_boxes() {
        let dims: Vec<_> = BuiltinPattern::ALL
            .iter()
            .map(|p| {
                let decoded = p.decode();
                (decoded.height(), decoded.width())
            })
            .collect();
        assert_eq!(dims, vec![(13, 13), (3, 10), (4, 4), (2, 4), (1, 3)]);
    }

    #[test]
    fn test_builtin_periods() {
        for pattern in BuiltinPattern::ALL {
            let grid = seed(&pattern.decode(), 40, 40);
            assert_eq!(
                LifeStepper::detect_period(&grid, 20),
                Some(pattern.period()),
                "{}",
                pattern
            );
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("pulsar".parse::<BuiltinPattern>().unwrap(), BuiltinPattern::Pulsar);
        assert_eq!(" Toad ".parse::<BuiltinPattern>().unwrap(), BuiltinPattern::Toad);
        assert!("glider".parse::<BuiltinPattern>().is_err());
    }
}
