//! Configuration management for the orb

pub mod settings;

pub use settings::{
    CliOverrides, DecorationConfig, LoggingConfig, OutputFormat, RenderConfig, Settings,
    SimulationConfig,
};
