//! Animation loop: owns the simulation and publishes each generation

use super::palette::{AnimationClock, Theme};
use crate::game_of_life::{Grid, GridSeeder, LifeStepper, Pattern};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The running automaton plus its hue clock
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    clock: AnimationClock,
}

impl Simulation {
    pub fn new(grid: Grid, hue_step: u32) -> Self {
        Self {
            grid,
            generation: 0,
            clock: AnimationClock::new(hue_step),
        }
    }

    pub fn seeded(pattern: &Pattern, rows: usize, cols: usize, seeder: &GridSeeder, hue_step: u32) -> Self {
        Self::new(seeder.seed(pattern, rows, cols), hue_step)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clock(&self) -> u32 {
        self.clock.degrees()
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.rows, self.grid.cols)
    }

    /// Replace the grid with its successor and advance the clock
    pub fn tick(&mut self) -> &Grid {
        self.grid = LifeStepper::step(&self.grid);
        self.generation += 1;
        self.clock.advance();
        &self.grid
    }

    /// Restart from a pattern; the grid keeps its dimensions
    pub fn reseed(&mut self, pattern: &Pattern, seeder: &GridSeeder) {
        let (rows, cols) = self.dimensions();
        self.grid = seeder.seed(pattern, rows, cols);
        self.generation = 0;
    }

    pub fn frame(&self, theme: Theme) -> Frame<'_> {
        Frame {
            generation: self.generation,
            clock: self.clock.degrees(),
            theme,
            grid: &self.grid,
        }
    }
}

/// Frame throttle: a tick is due once a full period has elapsed, and the
/// overshoot carries into the next period.
#[derive(Debug, Clone)]
pub struct Cadence {
    period: Duration,
    last: Instant,
}

impl Cadence {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            last: start,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a tick is due at `now`; consumes the period when it is
    pub fn poll(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.period {
            return false;
        }
        let residual = Duration::from_nanos((elapsed.as_nanos() % self.period.as_nanos()) as u64);
        self.last = now.checked_sub(residual).unwrap_or(now);
        true
    }

    /// Time left before the next tick is due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.period
            .saturating_sub(now.saturating_duration_since(self.last))
    }
}

/// A published generation, borrowed for the duration of one render call
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub generation: u64,
    pub clock: u32,
    pub theme: Theme,
    pub grid: &'a Grid,
}

/// Serializable copy of a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u64,
    pub clock: u32,
    pub theme: Theme,
    pub rows: usize,
    pub cols: usize,
    pub live: Vec<(usize, usize)>,
}

impl From<&Frame<'_>> for Snapshot {
    fn from(frame: &Frame<'_>) -> Self {
        Self {
            generation: frame.generation,
            clock: frame.clock,
            theme: frame.theme,
            rows: frame.grid.rows,
            cols: frame.grid.cols,
            live: frame.grid.living_cells(),
        }
    }
}

/// Consumer of published frames
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;
}

impl<F> Renderer for F
where
    F: FnMut(&Frame<'_>) -> Result<()>,
{
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self(frame)
    }
}

/// Steps a simulation at a fixed cadence and hands every grid to a renderer
pub struct AnimationDriver<R> {
    simulation: Simulation,
    theme: Theme,
    cadence: Cadence,
    renderer: R,
}

impl<R: Renderer> AnimationDriver<R> {
    pub fn new(simulation: Simulation, theme: Theme, tick: Duration, renderer: R) -> Self {
        Self {
            simulation,
            theme,
            cadence: Cadence::new(tick, Instant::now()),
            renderer,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Render the current state without stepping
    pub fn publish(&mut self) -> Result<()> {
        let frame = self.simulation.frame(self.theme);
        self.renderer
            .render(&frame)
            .with_context(|| format!("Failed to render generation {}", frame.generation))
    }

    /// Advance one generation and render it
    pub fn tick(&mut self) -> Result<()> {
        self.simulation.tick();
        log::trace!(
            "Generation {}: {} live cells",
            self.simulation.generation(),
            self.simulation.grid().living_count()
        );
        self.publish()
    }

    /// Paint the initial state, then tick at the cadence until `limit` ticks
    /// have run (forever when `None`). Stops at the first render failure.
    pub fn run(&mut self, limit: Option<u64>) -> Result<()> {
        let (rows, cols) = self.simulation.dimensions();
        log::info!(
            "Animating {}x{} orb every {}ms with theme {}",
            rows,
            cols,
            self.cadence.period().as_millis(),
            self.theme
        );

        self.publish()?;
        self.cadence = Cadence::new(self.cadence.period(), Instant::now());

        let mut ticks = 0u64;
        while limit.map_or(true, |limit| ticks < limit) {
            let now = Instant::now();
            if self.cadence.poll(now) {
                self.tick()?;
                ticks += 1;
            } else {
                std::thread::sleep(self.cadence.remaining(now));
            }
        }

        log::info!("Stopped after {} ticks", ticks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::{decode, BuiltinPattern};

    fn blinker_simulation() -> Simulation {
        Simulation::seeded(&decode("3o!"), 8, 8, &GridSeeder::default(), 4)
    }

    #[test]
    fn test_simulation_tick() {
        let mut simulation = blinker_simulation();
        let initial = simulation.grid().clone();

        simulation.tick();
        assert_eq!(simulation.generation(), 1);
        assert_eq!(simulation.clock(), 4);
        assert_ne!(simulation.grid(), &initial);

        simulation.tick();
        assert_eq!(simulation.grid(), &initial);
        assert_eq!(simulation.dimensions(), (8, 8));
    }

    #[test]
    fn test_reseed_keeps_dimensions() {
        let mut simulation = blinker_simulation();
        simulation.tick();
        simulation.reseed(&BuiltinPattern::Toad.decode(), &GridSeeder::default());
        assert_eq!(simulation.generation(), 0);
        assert_eq!(simulation.dimensions(), (8, 8));
        assert_eq!(simulation.grid().living_count(), 6);
    }

    #[test]
    fn test_cadence_throttles_and_carries_residual() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_millis(80), start);

        assert!(!cadence.poll(start + Duration::from_millis(79)));
        assert!(cadence.poll(start + Duration::from_millis(100)));
        // 20ms carried over, so the next tick is due at 160ms
        assert!(!cadence.poll(start + Duration::from_millis(159)));
        assert!(cadence.poll(start + Duration::from_millis(160)));
        assert_eq!(
            cadence.remaining(start + Duration::from_millis(170)),
            Duration::from_millis(70)
        );
    }

    #[test]
    fn test_driver_publishes_initial_and_each_tick() {
        let mut seen = Vec::new();
        {
            let renderer = |frame: &Frame<'_>| -> Result<()> {
                seen.push(Snapshot::from(frame));
                Ok(())
            };
            let mut driver =
                AnimationDriver::new(blinker_simulation(), Theme::Pastel, Duration::from_millis(1), renderer);
            driver.run(Some(3)).unwrap();
            assert_eq!(driver.simulation().generation(), 3);
        }

        let generations: Vec<u64> = seen.iter().map(|s| s.generation).collect();
        assert_eq!(generations, vec![0, 1, 2, 3]);
        assert_eq!(seen[0].live, seen[2].live);
        assert_ne!(seen[0].live, seen[1].live);
        assert!(seen.iter().all(|s| s.rows == 8 && s.cols == 8));
        assert_eq!(seen[3].clock, 12);
    }

    #[test]
    fn test_render_failure_stops_driver() {
        let mut calls = 0;
        let renderer = |frame: &Frame<'_>| -> Result<()> {
            calls += 1;
            if frame.generation == 1 {
                anyhow::bail!("canvas gone");
            }
            Ok(())
        };
        let mut driver =
            AnimationDriver::new(blinker_simulation(), Theme::Solid, Duration::from_millis(1), renderer);
        assert!(driver.run(Some(5)).is_err());
        assert_eq!(driver.simulation().generation(), 1);
        drop(driver);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_snapshot_json() {
        let simulation = blinker_simulation();
        let snapshot = Snapshot::from(&simulation.frame(Theme::Neon));
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"theme\":\"neon\""));
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
