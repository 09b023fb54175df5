pub mod config;
pub mod lane;

pub use config::LayoutConfig;
pub use lane::{Lane, LaneSet};
