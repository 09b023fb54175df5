//! Time-axis layout: grid height, time labels, current-time offset and
//! per-event placement.

use salon_schedule_protocol::{DaySchedule, Rect, ScheduleEvent};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{LaneSet, LayoutConfig};
use crate::time::{minutes_to_hhmm, time_to_minutes};

/// Vertical gap left between back-to-back blocks.
const EVENT_GAP_PX: f64 = 2.0;
/// Shortest block, as a fraction of one calc unit, so tiny events stay clickable.
const MIN_EVENT_HEIGHT_UNITS: f64 = 0.8;
/// Horizontal inset of a block inside its lane.
pub const EVENT_INSET_PX: f64 = 2.0;
/// Blocks taller than this many minutes' worth of pixels list their services.
const SERVICES_DENSITY_MINUTES: f64 = 20.0;
/// Blocks taller than this many minutes' worth of pixels show their time range.
const TIME_RANGE_DENSITY_MINUTES: f64 = 30.0;

/// Caller programming errors. Rendered as a static message, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("day window {start}-{end} is empty: end must be after start")]
    EmptyWindow { start: String, end: String },
    #[error("layout setting `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        let checks = [
            (
                "eventCalcUnitMinutes",
                f64::from(self.event_calc_unit_minutes),
            ),
            ("heightPerCalcUnitPx", self.height_per_calc_unit_px),
            (
                "visualGridIntervalMinutes",
                f64::from(self.visual_grid_interval_minutes),
            ),
            ("minLaneWidthPx", self.min_lane_width_px),
        ];
        for (field, value) in checks {
            // NaN fails this comparison too
            if !(value > 0.0 && value.is_finite()) {
                return Err(LayoutError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

/// A horizontal gridline with its time label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeLabel {
    pub minute: u32,
    pub text: String,
    pub offset_px: f64,
    /// Hour boundaries get heavier lines and bold labels.
    pub is_hour: bool,
}

/// Where one event block lands on the grid, in body content coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPlacement {
    /// Index into `DaySchedule::events`.
    pub event_index: usize,
    pub lane: usize,
    /// Clipped start/end, minutes since midnight.
    pub start: u32,
    pub end: u32,
    pub top: f64,
    pub height: f64,
    pub show_services: bool,
    pub show_time_range: bool,
}

impl EventPlacement {
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    /// The block's rectangle in body content coordinates.
    pub fn rect(&self, lane_width: f64) -> Rect {
        let x = self.lane as f64 * lane_width + EVENT_INSET_PX;
        let w = (lane_width - 2.0 * EVENT_INSET_PX).max(1.0);
        Rect::new(x, self.top, w, self.height)
    }
}

/// Fully derived layout for one schedule + config pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub config: LayoutConfig,
    pub day_start: u32,
    pub day_end: u32,
    pub grid_height: f64,
    pub lanes: LaneSet,
    pub labels: Vec<TimeLabel>,
    pub placements: Vec<EventPlacement>,
}

impl GridLayout {
    pub fn compute(schedule: &DaySchedule, config: &LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;

        let day_start = time_to_minutes(&schedule.window.day_start_time);
        let day_end = time_to_minutes(&schedule.window.day_end_time);
        if day_end <= day_start {
            return Err(LayoutError::EmptyWindow {
                start: schedule.window.day_start_time.clone(),
                end: schedule.window.day_end_time.clone(),
            });
        }

        let total_minutes = day_end - day_start;
        let grid_height = config.minutes_to_px(f64::from(total_minutes));
        let lanes = LaneSet::from_staff(&schedule.staff);
        let labels = time_labels(config, day_start, day_end, grid_height);

        let placements: Vec<EventPlacement> = schedule
            .events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| place_event(config, &lanes, day_start, day_end, index, event))
            .collect();

        tracing::debug!(
            day_start,
            day_end,
            grid_height,
            lanes = lanes.len(),
            placed = placements.len(),
            skipped = schedule.events.len() - placements.len(),
            "computed grid layout"
        );

        Ok(Self {
            config: *config,
            day_start,
            day_end,
            grid_height,
            lanes,
            labels,
            placements,
        })
    }

    pub fn total_minutes(&self) -> u32 {
        self.day_end - self.day_start
    }

    /// Vertical offset of the current-time line, or `None` outside the window.
    pub fn now_offset(&self, now_minutes: u32) -> Option<f64> {
        if now_minutes < self.day_start || now_minutes >= self.day_end {
            return None;
        }
        Some(self.config.minutes_to_px(f64::from(now_minutes - self.day_start)))
    }

    /// Lane width for a body `available_width` pixels wide; lanes never
    /// shrink below `min_lane_width_px` and overflow scrolls instead.
    pub fn lane_width(&self, available_width: f64) -> f64 {
        let share = available_width / self.lanes.len() as f64;
        share.max(self.config.min_lane_width_px)
    }

    pub fn content_width(&self, available_width: f64) -> f64 {
        self.lane_width(available_width) * self.lanes.len() as f64
    }
}

fn time_labels(config: &LayoutConfig, day_start: u32, day_end: u32, grid_height: f64) -> Vec<TimeLabel> {
    let interval = config.visual_grid_interval_minutes;
    let slot_px = f64::from(interval) / f64::from(config.event_calc_unit_minutes)
        * config.height_per_calc_unit_px;

    let slots = (day_end - day_start).div_ceil(interval);
    let mut labels = Vec::with_capacity(slots as usize + 1);
    for slot in 0..slots {
        let minute = day_start + slot * interval;
        labels.push(TimeLabel {
            minute,
            text: minutes_to_hhmm(minute),
            offset_px: f64::from(slot) * slot_px,
            is_hour: minute % 60 == 0,
        });
    }
    // Closing line at the bottom edge, even when the window is not a whole
    // number of intervals.
    labels.push(TimeLabel {
        minute: day_end,
        text: minutes_to_hhmm(day_end),
        offset_px: grid_height,
        is_hour: day_end % 60 == 0,
    });
    labels
}

fn place_event(
    config: &LayoutConfig,
    lanes: &LaneSet,
    day_start: u32,
    day_end: u32,
    event_index: usize,
    event: &ScheduleEvent,
) -> Option<EventPlacement> {
    let event_start = time_to_minutes(&event.start_time);
    let event_end = time_to_minutes(&event.end_time);

    let start = event_start.max(day_start);
    let end = event_end.min(day_end);
    if end <= start {
        return None;
    }

    let top = config.minutes_to_px(f64::from(start - day_start));
    let full_height = config.minutes_to_px(f64::from(end - start)) - EVENT_GAP_PX;
    let height = full_height.max(MIN_EVENT_HEIGHT_UNITS * config.height_per_calc_unit_px);

    Some(EventPlacement {
        event_index,
        lane: lanes.lane_for(event.staff_id.as_deref()),
        start,
        end,
        top,
        height,
        show_services: height > config.minutes_to_px(SERVICES_DENSITY_MINUTES),
        show_time_range: height > config.minutes_to_px(TIME_RANGE_DENSITY_MINUTES),
    })
}
