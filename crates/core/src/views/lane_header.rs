use salon_schedule_protocol::{Point, Rect, RenderCommand, SharedStr, TextAlign, ThemeToken};

use crate::layout::GridLayout;
use crate::model::Lane;

use super::{APPROX_CHAR_WIDTH, HEADER_HEIGHT};

const FONT_SIZE: f64 = 12.0;
const PADDING: f64 = 6.0;

/// Render the fixed lane title row. Coordinates are header-local with
/// x = 0 at the first lane; the caller applies the horizontal scroll.
pub fn render_lane_header(layout: &GridLayout, lane_width: f64) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(layout.lanes.len() * 2);
    let max_chars = ((lane_width - 2.0 * PADDING) / APPROX_CHAR_WIDTH).max(0.0) as usize;

    for (index, lane) in layout.lanes.iter().enumerate() {
        let x = index as f64 * lane_width;
        let title = SharedStr::from(lane.title());

        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, 0.0, lane_width, HEADER_HEIGHT),
            color: ThemeToken::LaneHeaderBackground,
            border_color: Some(ThemeToken::LaneBorder),
            label: Some(title.clone()),
            event_id: None,
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(x + lane_width / 2.0, HEADER_HEIGHT / 2.0),
            text: title.truncated(max_chars),
            color: match lane {
                Lane::Unassigned => ThemeToken::TextSecondary,
                Lane::Staff { .. } => ThemeToken::LaneHeaderText,
            },
            font_size: FONT_SIZE,
            bold: true,
            align: TextAlign::Center,
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutConfig;
    use salon_schedule_protocol::{DaySchedule, DayWindow, StaffMember};

    #[test]
    fn titles_in_lane_order() {
        let day = DaySchedule {
            date: None,
            window: DayWindow::default(),
            staff: vec![StaffMember {
                id: "s1".into(),
                name: "Alexandria-Marguerite".into(),
            }],
            events: vec![],
        };
        let layout = GridLayout::compute(&day, &LayoutConfig::default()).expect("layout");
        let cmds = render_lane_header(&layout, 100.0);
        let titles: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.to_string()),
                _ => None,
            })
            .collect();
        // 88 px of room fits 12 chars
        assert_eq!(titles, vec!["Unassigned", "Alexandria-…"]);
    }
}
