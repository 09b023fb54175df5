use salon_schedule_protocol::{
    DaySchedule, EventStatus, Point, RenderCommand, SharedStr, TextAlign, ThemeToken,
};

use crate::layout::GridLayout;
use crate::time::minutes_to_hhmm;

use super::APPROX_CHAR_WIDTH;

const FONT_SIZE: f64 = 10.0;
const LINE_HEIGHT: f64 = 12.0;
const TEXT_PADDING: f64 = 4.0;

pub fn status_color(status: EventStatus) -> ThemeToken {
    match status {
        EventStatus::Booked => ThemeToken::StatusBooked,
        EventStatus::Completed => ThemeToken::StatusCompleted,
        EventStatus::InProgress => ThemeToken::StatusInProgress,
        EventStatus::Cancelled => ThemeToken::StatusCancelled,
        EventStatus::Enquiry => ThemeToken::StatusEnquiry,
        EventStatus::Default => ThemeToken::StatusDefault,
    }
}

/// Render one block per placed event, in body content coordinates.
///
/// Inner text is emitted line by line (customer, time range, services) and
/// stops at the first line that would overflow the block.
pub fn render_event_blocks(
    schedule: &DaySchedule,
    layout: &GridLayout,
    lane_width: f64,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(layout.placements.len() * 3);

    for placement in &layout.placements {
        let Some(event) = schedule.events.get(placement.event_index) else {
            continue;
        };
        let rect = placement.rect(lane_width);
        let customer = SharedStr::from(event.customer_name.as_str());

        commands.push(RenderCommand::DrawRect {
            rect,
            color: status_color(event.status),
            border_color: Some(ThemeToken::EventBorder),
            label: Some(customer.clone()),
            event_id: Some(SharedStr::from(event.id.as_str())),
        });

        let mut lines: Vec<SharedStr> = Vec::with_capacity(2 + event.services.len());
        lines.push(match &event.contact_no {
            Some(contact) if !contact.is_empty() => {
                SharedStr::from(format!("{} · {contact}", event.customer_name))
            }
            _ => customer,
        });
        if placement.show_time_range {
            lines.push(SharedStr::from(format!(
                "{} - {}",
                minutes_to_hhmm(placement.start),
                minutes_to_hhmm(placement.end)
            )));
        }
        if placement.show_services {
            lines.extend(event.services.iter().map(|s| SharedStr::from(s.display())));
        }

        let max_chars = ((rect.w - 2.0 * TEXT_PADDING) / APPROX_CHAR_WIDTH).max(0.0) as usize;
        let fitting = ((rect.h - TEXT_PADDING) / LINE_HEIGHT).floor().max(0.0) as usize;

        for (row, line) in lines.iter().take(fitting).enumerate() {
            commands.push(RenderCommand::DrawText {
                position: Point::new(
                    rect.x + TEXT_PADDING,
                    rect.y + TEXT_PADDING + row as f64 * LINE_HEIGHT + LINE_HEIGHT / 2.0,
                ),
                text: line.truncated(max_chars),
                color: ThemeToken::EventText,
                font_size: FONT_SIZE,
                bold: row == 0,
                align: TextAlign::Left,
            });
        }
    }

    commands
}
