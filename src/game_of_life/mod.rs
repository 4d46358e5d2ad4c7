//! Game of Life core: RLE decoding, seeding and stepping

pub mod grid;
pub mod library;
pub mod pattern;
pub mod rules;
pub mod seeder;

pub use grid::Grid;
pub use library::BuiltinPattern;
pub use pattern::{decode, DecodeAnomaly, DecodeReport, Pattern, PatternDecoder, RleDialect};
pub use rules::{step, LifeStepper};
pub use seeder::{seed, CenteringMode, GridSeeder, NOMINAL_PATTERN_SIZE};
