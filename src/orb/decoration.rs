//! Theme and starting-pattern selection
//!
//! Randomness is confined to a [`DecorationSource`] handed in by the caller,
//! so the same source always yields the same orb.

use super::palette::Theme;
use crate::game_of_life::BuiltinPattern;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Supplies indices for picking among candidates
pub trait DecorationSource {
    /// An index in `0..len`; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Deterministic source that hashes a seed together with a draw counter
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    draws: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Seed from the wall clock, for callers that want a different orb each run
    pub fn from_clock() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(nanos)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DecorationSource for SeededSource {
    fn pick(&mut self, len: usize) -> usize {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        self.draws.hash(&mut hasher);
        self.draws += 1;
        (hasher.finish() % len as u64) as usize
    }
}

/// Always returns the same index (clamped into range)
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub usize);

impl DecorationSource for FixedSource {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// The look of one orb: its palette and the oscillator it starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub theme: Theme,
    pub pattern: BuiltinPattern,
}

impl Decoration {
    pub fn fixed(theme: Theme, pattern: BuiltinPattern) -> Self {
        Self { theme, pattern }
    }

    /// Draw a theme, then a pattern, from the given candidates
    pub fn choose<S: DecorationSource + ?Sized>(
        source: &mut S,
        themes: &[Theme],
        patterns: &[BuiltinPattern],
    ) -> Self {
        let theme = if themes.is_empty() {
            Theme::Solid
        } else {
            themes[source.pick(themes.len())]
        };
        let pattern = if patterns.is_empty() {
            BuiltinPattern::Pulsar
        } else {
            patterns[source.pick(patterns.len())]
        };
        log::debug!("Chose decoration: theme {}, pattern {}", theme, pattern);
        Self { theme, pattern }
    }

    /// Draw only what is not already pinned
    pub fn resolve<S: DecorationSource + ?Sized>(
        source: &mut S,
        theme: Option<Theme>,
        pattern: Option<BuiltinPattern>,
    ) -> Self {
        let themes: Vec<Theme> = match theme {
            Some(theme) => vec![theme],
            None => Theme::ANIMATED.to_vec(),
        };
        let patterns: Vec<BuiltinPattern> = match pattern {
            Some(pattern) => vec![pattern],
            None => BuiltinPattern::ALL.to_vec(),
        };
        Self::choose(source, &themes, &patterns)
    }
}
