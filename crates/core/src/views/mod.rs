pub mod day_grid;
pub mod event_blocks;
pub mod grid_body;
pub mod lane_header;
pub mod now_indicator;
pub mod time_gutter;

pub use day_grid::{DayGridView, ScrollState, body_rect, render_config_error};

/// Width of the fixed time gutter on the left.
pub const GUTTER_WIDTH: f64 = 56.0;
/// Height of the fixed lane-title row on top.
pub const HEADER_HEIGHT: f64 = 32.0;
/// Rough advance of one proportional glyph, used to pre-truncate text.
pub const APPROX_CHAR_WIDTH: f64 = 7.0;
