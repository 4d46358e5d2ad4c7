//! The animated orb: decoration, palette and the loop that drives the engine

pub mod decoration;
pub mod driver;
pub mod palette;

pub use decoration::{Decoration, DecorationSource, FixedSource, SeededSource};
pub use driver::{AnimationDriver, Cadence, Frame, Renderer, Simulation, Snapshot};
pub use palette::{AnimationClock, Hsl, Rgb, Theme};

use crate::config::Settings;
use crate::game_of_life::{Pattern, PatternDecoder};
use anyhow::Result;
use std::time::Duration;

/// A ready-to-run orb assembled from settings
#[derive(Debug, Clone)]
pub struct Orb {
    pub decoration: Decoration,
    /// Name of the starting pattern, `custom` for inline RLE
    pub pattern_name: String,
    pub pattern: Pattern,
    pub simulation: Simulation,
    pub tick: Duration,
}

impl Orb {
    /// Resolve the decoration with `source`, decode the starting pattern and seed the grid
    pub fn from_settings<S: DecorationSource + ?Sized>(settings: &Settings, source: &mut S) -> Result<Self> {
        settings.validate()?;

        let decoration = Decoration::resolve(source, settings.decoration.theme, settings.decoration.pattern);

        let (pattern_name, pattern) = match settings.decoration.rle {
            Some(ref rle) => {
                let report = PatternDecoder::with_dialect(settings.decoration.dialect).decode_with_report(rle);
                for anomaly in &report.anomalies {
                    log::warn!("Custom pattern: {}", anomaly);
                }
                ("custom".to_string(), report.pattern)
            }
            None => (decoration.pattern.name().to_string(), decoration.pattern.decode()),
        };

        if pattern.is_empty() {
            log::warn!("Pattern '{}' has no live cells; the orb will stay dark", pattern_name);
        }

        let simulation = Simulation::seeded(
            &pattern,
            settings.simulation.rows,
            settings.simulation.cols,
            &settings.seeder(),
            settings.render.hue_step,
        );

        Ok(Self {
            decoration,
            pattern_name,
            pattern,
            simulation,
            tick: Duration::from_millis(settings.simulation.tick_ms),
        })
    }

    /// Hand the simulation to a driver bound to `renderer`
    pub fn into_driver<R: Renderer>(self, renderer: R) -> AnimationDriver<R> {
        AnimationDriver::new(self.simulation, self.decoration.theme, self.tick, renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::BuiltinPattern;

    #[test]
    fn test_spinner_preset_seeds_centered_pulsar() {
        let orb = Orb::from_settings(&Settings::spinner(), &mut SeededSource::new(1)).unwrap();
        assert_eq!(orb.decoration, Decoration::fixed(Theme::Solid, BuiltinPattern::Pulsar));
        assert_eq!(orb.pattern_name, "pulsar");
        assert_eq!(orb.simulation.grid().living_count(), 48);
        // floor((30-13)/2) = 8
        assert!(orb.simulation.grid().get(8, 10));
        assert_eq!(orb.tick, Duration::from_millis(400));
    }

    #[test]
    fn test_orb_preset_uses_nominal_centering() {
        let mut settings = Settings::orb();
        settings.decoration.pattern = Some(BuiltinPattern::Blinker);
        let orb = Orb::from_settings(&settings, &mut FixedSource(0)).unwrap();
        assert_eq!(orb.simulation.grid().living_cells(), vec![(10, 10), (10, 11), (10, 12)]);
        assert_eq!(orb.decoration.theme, Theme::Pastel);
    }

    #[test]
    fn test_custom_rle_overrides_pattern() {
        let mut settings = Settings::spinner();
        settings.decoration.rle = Some("#C glider\nbo$2bo$3o!".to_string());
        let orb = Orb::from_settings(&settings, &mut FixedSource(0)).unwrap();
        assert_eq!(orb.pattern_name, "custom");
        assert_eq!(orb.pattern.population(), 5);
        assert_eq!(orb.simulation.grid().living_count(), 5);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::orb();
        settings.simulation.cols = 0;
        assert!(Orb::from_settings(&settings, &mut FixedSource(0)).is_err());
    }

    #[test]
    fn test_into_driver_keeps_theme() {
        let orb = Orb::from_settings(&Settings::spinner(), &mut FixedSource(0)).unwrap();
        let driver = orb.into_driver(|_: &Frame<'_>| -> Result<()> { Ok(()) });
        assert_eq!(driver.theme(), Theme::Solid);
        assert_eq!(driver.simulation().generation(), 0);
    }
}
