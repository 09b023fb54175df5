use salon_schedule_protocol::{Point, Rect, RenderCommand, ThemeToken};

use crate::layout::GridLayout;

/// Lane backgrounds, horizontal gridlines and lane separators for the
/// scrolling body, in content coordinates.
pub fn render_grid_body(layout: &GridLayout, lane_width: f64) -> Vec<RenderCommand> {
    let lane_count = layout.lanes.len();
    let content_width = lane_width * lane_count as f64;
    let mut commands = Vec::with_capacity(lane_count * 2 + layout.labels.len());

    for index in 0..lane_count {
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(index as f64 * lane_width, 0.0, lane_width, layout.grid_height),
            color: if index == 0 {
                ThemeToken::UnassignedLaneBackground
            } else {
                ThemeToken::GridBackground
            },
            border_color: None,
            label: None,
            event_id: None,
        });
    }

    for label in &layout.labels {
        commands.push(RenderCommand::DrawLine {
            from: Point::new(0.0, label.offset_px),
            to: Point::new(content_width, label.offset_px),
            color: if label.is_hour {
                ThemeToken::GridLineHour
            } else {
                ThemeToken::GridLineMinor
            },
            width: if label.is_hour { 1.0 } else { 0.5 },
        });
    }

    for index in 1..=lane_count {
        let x = index as f64 * lane_width;
        commands.push(RenderCommand::DrawLine {
            from: Point::new(x, 0.0),
            to: Point::new(x, layout.grid_height),
            color: ThemeToken::LaneBorder,
            width: 1.0,
        });
    }

    commands
}
