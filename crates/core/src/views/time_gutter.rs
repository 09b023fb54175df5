use salon_schedule_protocol::{Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken};

use crate::layout::GridLayout;

use super::GUTTER_WIDTH;

const HOUR_FONT_SIZE: f64 = 11.0;
const MINOR_FONT_SIZE: f64 = 9.0;
const HOUR_TICK_WIDTH: f64 = 10.0;
const MINOR_TICK_WIDTH: f64 = 5.0;
const LABEL_PADDING: f64 = 4.0;

/// Render the fixed time gutter: one label per visual grid interval.
///
/// Coordinates are gutter-local with y = 0 at the window start; the caller
/// applies the vertical scroll.
pub fn render_time_gutter(layout: &GridLayout) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(layout.labels.len() * 2 + 1);

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, GUTTER_WIDTH, layout.grid_height),
        color: ThemeToken::GutterBackground,
        border_color: Some(ThemeToken::LaneBorder),
        label: None,
        event_id: None,
    });

    for label in &layout.labels {
        let (tick, font_size) = if label.is_hour {
            (HOUR_TICK_WIDTH, HOUR_FONT_SIZE)
        } else {
            (MINOR_TICK_WIDTH, MINOR_FONT_SIZE)
        };

        commands.push(RenderCommand::DrawLine {
            from: Point::new(GUTTER_WIDTH - tick, label.offset_px),
            to: Point::new(GUTTER_WIDTH, label.offset_px),
            color: if label.is_hour {
                ThemeToken::GridLineHour
            } else {
                ThemeToken::GridLineMinor
            },
            width: if label.is_hour { 1.0 } else { 0.5 },
        });

        commands.push(RenderCommand::DrawText {
            position: Point::new(GUTTER_WIDTH - HOUR_TICK_WIDTH - LABEL_PADDING, label.offset_px),
            text: SharedStr::from(label.text.as_str()),
            color: if label.is_hour {
                ThemeToken::GutterText
            } else {
                ThemeToken::TextMuted
            },
            font_size,
            bold: label.is_hour,
            align: TextAlign::Right,
        });
    }

    commands
}
