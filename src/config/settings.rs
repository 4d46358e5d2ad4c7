//! Configuration settings for the orb

use crate::game_of_life::{BuiltinPattern, CenteringMode, GridSeeder, RleDialect, NOMINAL_PATTERN_SIZE};
use crate::orb::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub decoration: DecorationConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub tick_ms: u64,
    pub centering: CenteringMode,
    pub clamp_offsets: bool,
    #[serde(default = "default_scale")]
    pub scale: usize,
}

fn default_scale() -> usize {
    1
}

/// Pinned look of the orb; anything left unset is drawn at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationConfig {
    pub pattern: Option<BuiltinPattern>,
    pub theme: Option<Theme>,
    pub seed: Option<u64>,
    /// Inline RLE used instead of a built-in pattern
    pub rle: Option<String>,
    #[serde(default)]
    pub dialect: RleDialect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub orb_mask: bool,
    pub hue_step: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Truecolor cells, redrawn in place
    Ansi,
    /// Monochrome glyphs, one frame after another
    Plain,
    /// One JSON snapshot per line
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ansi" => Ok(OutputFormat::Ansi),
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("Unknown output format '{}' (expected ansi, plain or json)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Ansi,
            orb_mask: true,
            hue_step: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::orb()
    }
}

impl Settings {
    /// The animated orb: 40x40, 80ms ticks, fixed 20-cell centering, random look
    pub fn orb() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 40,
                cols: 40,
                tick_ms: 80,
                centering: CenteringMode::FixedNominal {
                    size: NOMINAL_PATTERN_SIZE,
                },
                clamp_offsets: false,
                scale: 1,
            },
            decoration: DecorationConfig::default(),
            render: RenderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// The minimal spinner: 30x30 pulsar, 400ms ticks, flat blue, square edges
    pub fn spinner() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 30,
                cols: 30,
                tick_ms: 400,
                centering: CenteringMode::PatternRelative,
                clamp_offsets: true,
                scale: 1,
            },
            decoration: DecorationConfig {
                pattern: Some(BuiltinPattern::Pulsar),
                theme: Some(Theme::Solid),
                ..DecorationConfig::default()
            },
            render: RenderConfig {
                orb_mask: false,
                ..RenderConfig::default()
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.rows == 0 || self.simulation.cols == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.simulation.rows,
                self.simulation.cols
            );
        }

        if self.simulation.tick_ms == 0 {
            anyhow::bail!("Tick cadence must be positive");
        }

        let shortest_side = self.simulation.rows.min(self.simulation.cols);
        if self.simulation.scale == 0 || self.simulation.scale > shortest_side {
            anyhow::bail!(
                "Pattern scale must be between 1 and {}, got {}",
                shortest_side,
                self.simulation.scale
            );
        }

        if let CenteringMode::FixedNominal { size: 0 } = self.simulation.centering {
            anyhow::bail!("Nominal pattern size must be positive");
        }

        self.log_level()?;
        Ok(())
    }

    pub fn seeder(&self) -> GridSeeder {
        GridSeeder::new(self.simulation.centering, self.simulation.clamp_offsets)
            .with_scale(self.simulation.scale)
    }

    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", self.logging.level))
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.simulation.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.simulation.cols = cols;
        }
        if let Some(tick_ms) = cli_overrides.tick_ms {
            self.simulation.tick_ms = tick_ms;
        }
        if let Some(pattern) = cli_overrides.pattern {
            self.decoration.pattern = Some(pattern);
            self.decoration.rle = None;
        }
        if let Some(ref rle) = cli_overrides.rle {
            self.decoration.rle = Some(rle.clone());
        }
        if let Some(theme) = cli_overrides.theme {
            self.decoration.theme = Some(theme);
        }
        if let Some(seed) = cli_overrides.seed {
            self.decoration.seed = Some(seed);
        }
        if let Some(format) = cli_overrides.format {
            self.render.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub tick_ms: Option<u64>,
    pub pattern: Option<BuiltinPattern>,
    pub rle: Option<String>,
    pub theme: Option<Theme>,
    pub seed: Option<u64>,
    pub format: Option<OutputFormat>,
}
