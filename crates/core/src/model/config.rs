use serde::{Deserialize, Serialize};

/// Pixel/time resolution of the grid.
///
/// Event placement uses `event_calc_unit_minutes` and
/// `height_per_calc_unit_px`; gridlines and labels use
/// `visual_grid_interval_minutes`. The two are independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub event_calc_unit_minutes: u32,
    pub height_per_calc_unit_px: f64,
    pub visual_grid_interval_minutes: u32,
    pub min_lane_width_px: f64,
}

impl LayoutConfig {
    /// Vertical pixels covered by `minutes` of schedule time.
    pub fn minutes_to_px(&self, minutes: f64) -> f64 {
        minutes / f64::from(self.event_calc_unit_minutes) * self.height_per_calc_unit_px
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            event_calc_unit_minutes: 15,
            height_per_calc_unit_px: 20.0,
            visual_grid_interval_minutes: 30,
            min_lane_width_px: 150.0,
        }
    }
}
