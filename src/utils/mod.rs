//! Output helpers

pub mod display;

pub use display::{
    color_enabled, format_frame, format_grid_compact, inside_orb, SnapshotRenderer, Status,
    TerminalRenderer, TerminalStyle,
};
