//! Maps pointer positions on the grid body back to schedule terms.

use salon_schedule_protocol::{DaySchedule, Point, ScheduleEvent};
use serde::{Deserialize, Serialize};

use crate::layout::{EventPlacement, GridLayout};
use crate::time::minutes_to_hhmm;

/// A click on the grid body plus the body's rendered geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickGeometry {
    /// Horizontal position relative to the visible body's left edge.
    pub offset_x: f64,
    /// Vertical position relative to the top of the grid content, so it
    /// already includes the vertical scroll.
    pub offset_y: f64,
    pub scroll_left: f64,
    /// Full width of all lanes, including the part scrolled out of view.
    pub content_width: f64,
    pub content_height: f64,
}

/// An empty-slot click resolved to a snapped time and (maybe) a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotClick {
    pub minute: u32,
    pub time: String,
    /// `None` when the click fell outside every lane.
    pub lane: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridClick<'a> {
    /// An event block was hit; this wins over the background.
    Event(&'a ScheduleEvent),
    Slot(SlotClick),
}

/// Outbound contract with the owning screen.
///
/// The grid only reports what was clicked; creating or opening an
/// appointment is the implementor's business.
pub trait GridCallbacks {
    fn on_grid_click(&mut self, time: &str, lane: Option<usize>);
    fn on_appointment_click(&mut self, event: &ScheduleEvent);
}

/// Snap an absolute minute to the nearest visual interval counted from the
/// window start, keeping the result inside `[day_start, day_end - 1]`.
pub fn snap_minute(layout: &GridLayout, minute: u32) -> u32 {
    let interval = layout.config.visual_grid_interval_minutes;
    let last = layout.day_end - 1;
    let relative = minute.clamp(layout.day_start, last) - layout.day_start;

    let mut snapped = (f64::from(relative) / f64::from(interval)).round() as u32 * interval;
    // Rounding up can reach the window end; the previous line is still a
    // multiple and still in range.
    while layout.day_start + snapped > last && snapped >= interval {
        snapped -= interval;
    }
    layout.day_start + snapped
}

/// Resolve an empty-slot click to a snapped time and a lane index.
pub fn slot_at(layout: &GridLayout, geometry: &ClickGeometry) -> SlotClick {
    let total = f64::from(layout.total_minutes());
    let height = geometry.content_height;
    let proportion = if height > 0.0 {
        geometry.offset_y.clamp(0.0, (height - 1.0).max(0.0)) / height
    } else {
        0.0
    };
    let minute_in_day = (proportion * total).floor() as u32;
    let minute = snap_minute(layout, layout.day_start + minute_in_day);

    SlotClick {
        minute,
        time: minutes_to_hhmm(minute),
        lane: lane_at(layout, geometry),
    }
}

fn lane_at(layout: &GridLayout, geometry: &ClickGeometry) -> Option<usize> {
    let lane_count = layout.lanes.len();
    if geometry.content_width <= 0.0 || lane_count == 0 {
        return None;
    }
    let lane_width = geometry.content_width / lane_count as f64;
    let index = ((geometry.offset_x + geometry.scroll_left) / lane_width).floor();
    if !index.is_finite() || index < 0.0 || index >= lane_count as f64 {
        return None;
    }
    Some(index as usize)
}

/// Topmost event block under a point in body content coordinates.
pub fn event_at(layout: &GridLayout, lane_width: f64, point: Point) -> Option<&EventPlacement> {
    // Later placements are drawn on top.
    layout
        .placements
        .iter()
        .rev()
        .find(|p| p.rect(lane_width).contains(point))
}

/// Resolve a body click, giving event blocks priority over the empty slot
/// underneath them.
pub fn resolve_click<'a>(
    schedule: &'a DaySchedule,
    layout: &GridLayout,
    geometry: &ClickGeometry,
) -> GridClick<'a> {
    let lane_width = geometry.content_width / layout.lanes.len() as f64;
    let point = Point::new(geometry.offset_x + geometry.scroll_left, geometry.offset_y);
    if let Some(placement) = event_at(layout, lane_width, point)
        && let Some(event) = schedule.events.get(placement.event_index)
    {
        return GridClick::Event(event);
    }
    GridClick::Slot(slot_at(layout, geometry))
}

/// Deliver a resolved click to the owning screen.
pub fn dispatch(click: &GridClick<'_>, callbacks: &mut impl GridCallbacks) {
    match click {
        GridClick::Event(event) => callbacks.on_appointment_click(event),
        GridClick::Slot(slot) => callbacks.on_grid_click(&slot.time, slot.lane),
    }
}
