pub mod day_schedule;
pub mod layout_config;

pub use day_schedule::{DayScheduleParseError, parse_day_schedule};
pub use layout_config::{LayoutConfigParseError, parse_layout_config};
