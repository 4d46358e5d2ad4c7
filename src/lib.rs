//! Game of Life loading orb
//!
//! A decorative loading indicator whose pixels are a Conway's Game of Life
//! simulation: an oscillator decoded from RLE is centered on a small toroidal
//! grid and stepped on a timer, then painted through a hue palette.
//!
//! The engine is three total functions over plain data:
//!
//! ```
//! use life_orb::{decode, seed, step};
//!
//! let pattern = decode("3o!");
//! let grid = seed(&pattern, 10, 10);
//! let next = step(&grid, 10, 10);
//! assert_eq!(next.living_count(), 3);
//! ```

pub mod config;
pub mod game_of_life;
pub mod orb;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{decode, seed, step, Grid, Pattern};
pub use orb::{AnimationDriver, Orb};
