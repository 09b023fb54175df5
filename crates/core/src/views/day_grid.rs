//! The composed day schedule grid: fixed corner, lane header and time
//! gutter around a scrolling body.
//!
//! ```text
//!   ┌────────┬──────────────────────────────┐
//!   │ corner │ header   (scrolls with x)    │
//!   ├────────┼──────────────────────────────┤
//!   │ gutter │ body     (scrolls with x, y) │
//!   │ (y)    │                              │
//!   └────────┴──────────────────────────────┘
//! ```
//!
//! Only the body owns scroll state. The header and gutter are translated
//! by the body's offsets, so they cannot drift out of sync.

use std::time::Instant;

use salon_schedule_protocol::{
    DaySchedule, Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken, Viewport,
};
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, NowTicker};
use crate::interaction::{ClickGeometry, GridCallbacks, GridClick, dispatch, resolve_click};
use crate::layout::{GridLayout, LayoutError};
use crate::model::LayoutConfig;
use crate::time::minutes_to_hhmm;

use super::{
    GUTTER_WIDTH, HEADER_HEIGHT, event_blocks, grid_body, lane_header, now_indicator, time_gutter,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    pub left: f64,
    pub top: f64,
}

/// The scrolling region of a viewport.
pub fn body_rect(viewport: &Viewport) -> Rect {
    Rect::new(
        GUTTER_WIDTH,
        HEADER_HEIGHT,
        (viewport.width - GUTTER_WIDTH).max(0.0),
        (viewport.height - HEADER_HEIGHT).max(0.0),
    )
}

/// Day schedule grid state: props in, render commands and callbacks out.
///
/// Everything except the scroll position and the current-time minute is
/// derived from the schedule and config on change.
#[derive(Debug, Clone)]
pub struct DayGridView {
    schedule: DaySchedule,
    config: LayoutConfig,
    layout: Result<GridLayout, LayoutError>,
    scroll: ScrollState,
    ticker: NowTicker,
    now_minutes: Option<u32>,
}

impl DayGridView {
    pub fn new(schedule: DaySchedule, config: LayoutConfig) -> Self {
        let layout = GridLayout::compute(&schedule, &config);
        if let Err(err) = &layout {
            tracing::warn!(%err, "day grid configuration rejected");
        }
        Self {
            schedule,
            config,
            layout,
            scroll: ScrollState::default(),
            ticker: NowTicker::default(),
            now_minutes: None,
        }
    }

    pub fn schedule(&self) -> &DaySchedule {
        &self.schedule
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(&self) -> Result<&GridLayout, &LayoutError> {
        self.layout.as_ref()
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn set_schedule(&mut self, schedule: DaySchedule) {
        self.schedule = schedule;
        self.recompute();
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.layout = GridLayout::compute(&self.schedule, &self.config);
        if let Err(err) = &self.layout {
            tracing::warn!(%err, "day grid configuration rejected");
        }
    }

    /// Refresh the current-time minute when the ticker is due. Returns true
    /// when a refresh happened and the host should redraw.
    pub fn tick(&mut self, now: Instant, clock: &impl Clock) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.now_minutes = Some(clock.now_minutes());
        true
    }

    pub fn ticker(&self) -> &NowTicker {
        &self.ticker
    }

    /// Pin the current time directly (static exports, browser hosts that run
    /// their own timer).
    pub fn set_now(&mut self, minutes: Option<u32>) {
        self.now_minutes = minutes;
    }

    /// Current-time offset into the body, if now falls inside the window.
    pub fn now_offset(&self) -> Option<f64> {
        let layout = self.layout.as_ref().ok()?;
        layout.now_offset(self.now_minutes?)
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64, viewport: &Viewport) {
        let ScrollState { left, top } = self.scroll;
        self.scroll_to(left + dx, top + dy, viewport);
    }

    /// Scroll the body, clamped so content never scrolls past its edges.
    pub fn scroll_to(&mut self, left: f64, top: f64, viewport: &Viewport) {
        self.scroll = self.clamped(ScrollState { left, top }, viewport);
    }

    /// `scroll` limited to what `viewport` can show. Render and hit testing
    /// go through this too, so a resize never exposes stale offsets.
    fn clamped(&self, scroll: ScrollState, viewport: &Viewport) -> ScrollState {
        let Ok(layout) = &self.layout else {
            return ScrollState::default();
        };
        let body = body_rect(viewport);
        let max_left = (layout.content_width(body.w) - body.w).max(0.0);
        let max_top = (layout.grid_height - body.h).max(0.0);
        ScrollState {
            left: scroll.left.clamp(0.0, max_left),
            top: scroll.top.clamp(0.0, max_top),
        }
    }

    /// Scroll vertically so `minute` sits at the top of the body.
    pub fn scroll_to_minute(&mut self, minute: u32, viewport: &Viewport) {
        let Ok(layout) = &self.layout else {
            return;
        };
        let top = layout
            .config
            .minutes_to_px(f64::from(minute.saturating_sub(layout.day_start)));
        let left = self.scroll.left;
        self.scroll_to(left, top, viewport);
    }

    pub fn render(&self, viewport: &Viewport) -> Vec<RenderCommand> {
        match &self.layout {
            Ok(layout) => self.render_grid(layout, viewport),
            Err(err) => render_config_error(viewport, err),
        }
    }

    fn render_grid(&self, layout: &GridLayout, viewport: &Viewport) -> Vec<RenderCommand> {
        let body = body_rect(viewport);
        let lane_width = layout.lane_width(body.w);
        let content_width = layout.content_width(body.w);
        let ScrollState { left, top } = self.clamped(self.scroll, viewport);
        let now_offset = self.now_offset();

        let mut commands = Vec::with_capacity(64 + layout.placements.len() * 4);
        commands.push(RenderCommand::BeginGroup {
            id: "day-grid".into(),
            label: self.schedule.date.as_deref().map(SharedStr::from),
        });
        commands.push(RenderCommand::DrawRect {
            rect: viewport.rect(),
            color: ThemeToken::Background,
            border_color: None,
            label: None,
            event_id: None,
        });

        // Body: scrolls on both axes.
        commands.push(RenderCommand::BeginGroup {
            id: "body".into(),
            label: None,
        });
        commands.push(RenderCommand::SetClip { rect: body });
        commands.push(RenderCommand::translate(body.x - left, body.y - top));
        commands.extend(grid_body::render_grid_body(layout, lane_width));
        commands.extend(event_blocks::render_event_blocks(
            &self.schedule,
            layout,
            lane_width,
        ));
        if let Some(offset) = now_offset {
            commands.extend(now_indicator::render_now_indicator(offset, content_width));
        }
        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::ClearClip);
        commands.push(RenderCommand::EndGroup);

        // Header: follows the body horizontally only.
        commands.push(RenderCommand::BeginGroup {
            id: "header".into(),
            label: Some("Staff".into()),
        });
        commands.push(RenderCommand::SetClip {
            rect: Rect::new(body.x, 0.0, body.w, HEADER_HEIGHT),
        });
        commands.push(RenderCommand::translate(body.x - left, 0.0));
        commands.extend(lane_header::render_lane_header(layout, lane_width));
        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::ClearClip);
        commands.push(RenderCommand::EndGroup);

        // Gutter: follows the body vertically only.
        commands.push(RenderCommand::BeginGroup {
            id: "gutter".into(),
            label: Some("Time".into()),
        });
        commands.push(RenderCommand::SetClip {
            rect: Rect::new(0.0, body.y, GUTTER_WIDTH, body.h),
        });
        commands.push(RenderCommand::translate(0.0, body.y - top));
        commands.extend(time_gutter::render_time_gutter(layout));
        if let (Some(offset), Some(minutes)) = (now_offset, self.now_minutes) {
            commands.push(now_indicator::render_now_label(
                offset,
                GUTTER_WIDTH,
                &minutes_to_hhmm(minutes),
            ));
        }
        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::ClearClip);
        commands.push(RenderCommand::EndGroup);

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(0.0, 0.0, GUTTER_WIDTH, HEADER_HEIGHT),
            color: ThemeToken::LaneHeaderBackground,
            border_color: Some(ThemeToken::LaneBorder),
            label: None,
            event_id: None,
        });

        commands.push(RenderCommand::EndGroup);
        commands
    }

    /// Resolve a viewport-local click. `None` outside the body or when the
    /// grid is showing its configuration error.
    pub fn hit(&self, x: f64, y: f64, viewport: &Viewport) -> Option<GridClick<'_>> {
        let layout = self.layout.as_ref().ok()?;
        let body = body_rect(viewport);
        if !body.contains(Point::new(x, y)) {
            return None;
        }
        let scroll = self.clamped(self.scroll, viewport);
        let geometry = ClickGeometry {
            offset_x: x - body.x,
            offset_y: y - body.y + scroll.top,
            scroll_left: scroll.left,
            content_width: layout.content_width(body.w),
            content_height: layout.grid_height,
        };
        Some(resolve_click(&self.schedule, layout, &geometry))
    }

    /// Resolve a click and hand it to the owning screen. Returns whether a
    /// callback fired.
    pub fn click(
        &self,
        x: f64,
        y: f64,
        viewport: &Viewport,
        callbacks: &mut impl GridCallbacks,
    ) -> bool {
        match self.hit(x, y, viewport) {
            Some(click) => {
                dispatch(&click, callbacks);
                true
            }
            None => false,
        }
    }
}

/// Static, non-retryable surface shown instead of the grid when the window
/// or layout settings are invalid.
pub fn render_config_error(viewport: &Viewport, err: &LayoutError) -> Vec<RenderCommand> {
    let center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
    vec![
        RenderCommand::BeginGroup {
            id: "config-error".into(),
            label: Some("Schedule unavailable".into()),
        },
        RenderCommand::DrawRect {
            rect: viewport.rect(),
            color: ThemeToken::ErrorBackground,
            border_color: Some(ThemeToken::Border),
            label: None,
            event_id: None,
        },
        RenderCommand::DrawText {
            position: Point::new(center.x, center.y - 10.0),
            text: "Schedule cannot be displayed".into(),
            color: ThemeToken::ErrorText,
            font_size: 14.0,
            bold: true,
            align: TextAlign::Center,
        },
        RenderCommand::DrawText {
            position: Point::new(center.x, center.y + 10.0),
            text: SharedStr::from(err.to_string()),
            color: ThemeToken::TextSecondary,
            font_size: 11.0,
            bold: false,
            align: TextAlign::Center,
        },
        RenderCommand::EndGroup,
    ]
}
