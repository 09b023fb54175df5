//! Integration test: load a day file, lay it out, render it, and click on it
//! the way a front end would.

use salon_schedule_core::interaction::{ClickGeometry, GridCallbacks, slot_at};
use salon_schedule_core::parsers::parse_day_schedule;
use salon_schedule_core::svg::render_svg;
use salon_schedule_core::time::{minutes_to_hhmm, time_to_minutes};
use salon_schedule_core::views::body_rect;
use salon_schedule_core::{DayGridView, GridLayout, LayoutConfig};
use salon_schedule_protocol::{
    DaySchedule, EventStatus, RenderCommand, ScheduleEvent, Viewport,
};

fn fixture() -> DaySchedule {
    parse_day_schedule(include_bytes!("fixtures/day-2026-10-16.json"))
        .expect("fixture should parse")
}

fn placement_for<'a>(
    layout: &'a GridLayout,
    schedule: &DaySchedule,
    id: &str,
) -> Option<&'a salon_schedule_core::EventPlacement> {
    layout
        .placements
        .iter()
        .find(|p| schedule.events[p.event_index].id == id)
}

#[derive(Default)]
struct Recorder {
    slots: Vec<(String, Option<usize>)>,
    appointments: Vec<String>,
}

impl GridCallbacks for Recorder {
    fn on_grid_click(&mut self, time: &str, lane: Option<usize>) {
        self.slots.push((time.to_string(), lane));
    }

    fn on_appointment_click(&mut self, event: &ScheduleEvent) {
        self.appointments.push(event.id.clone());
    }
}

#[test]
fn fixture_loads_with_unknown_status_as_default() {
    let schedule = fixture();
    assert_eq!(schedule.date.as_deref(), Some("2026-10-16"));
    assert_eq!(schedule.staff.len(), 2);
    let broken = schedule.event("a-broken").expect("event present");
    assert_eq!(broken.status, EventStatus::Default);
}

#[test]
fn event_straddling_window_start_keeps_only_overlap() {
    let schedule = fixture();
    let layout = GridLayout::compute(&schedule, &LayoutConfig::default()).expect("valid layout");

    let early = placement_for(&layout, &schedule, "a-early").expect("partially visible");
    assert_eq!(early.start, 9 * 60);
    assert_eq!(early.end, 9 * 60 + 30);
    assert_eq!(early.duration(), 30);
    assert_eq!(early.top, 0.0);
}

#[test]
fn events_outside_window_are_not_placed() {
    let schedule = fixture();
    let layout = GridLayout::compute(&schedule, &LayoutConfig::default()).expect("valid layout");
    assert!(placement_for(&layout, &schedule, "a-late").is_none());
    // "9" degrades to 00:00 and the visible part starts at the window.
    let broken = placement_for(&layout, &schedule, "a-broken").expect("clipped into view");
    assert_eq!(broken.start, 9 * 60);
    assert_eq!(broken.end, 9 * 60 + 45);
}

#[test]
fn lanes_follow_staff_order_with_unassigned_first() {
    let schedule = fixture();
    let layout = GridLayout::compute(&schedule, &LayoutConfig::default()).expect("valid layout");
    assert_eq!(layout.lanes.len(), 3);

    let lane_of = |id| placement_for(&layout, &schedule, id).map(|p| p.lane);
    assert_eq!(lane_of("a-early"), Some(1));
    assert_eq!(lane_of("a-colour"), Some(2));
    assert_eq!(lane_of("a-walkin"), Some(0));
}

#[test]
fn click_between_intervals_snaps_to_neighbouring_line() {
    let schedule = fixture();
    let config = LayoutConfig {
        visual_grid_interval_minutes: 15,
        ..LayoutConfig::default()
    };
    let layout = GridLayout::compute(&schedule, &config).expect("valid layout");
    let seven_past = config.minutes_to_px(7.0);

    let slot = slot_at(
        &layout,
        &ClickGeometry {
            offset_x: 10.0,
            offset_y: seven_past,
            scroll_left: 0.0,
            content_width: layout.content_width(600.0),
            content_height: layout.grid_height,
        },
    );
    assert!(slot.time == "09:00" || slot.time == "09:15", "got {}", slot.time);
    assert_eq!(slot.lane, Some(0));
}

#[test]
fn snapped_times_stay_on_grid_and_inside_window() {
    let schedule = fixture();
    let config = LayoutConfig::default();
    let layout = GridLayout::compute(&schedule, &config).expect("valid layout");
    let interval = config.visual_grid_interval_minutes;

    let mut y = -50.0;
    while y < layout.grid_height + 50.0 {
        let slot = slot_at(
            &layout,
            &ClickGeometry {
                offset_x: 0.0,
                offset_y: y,
                scroll_left: 0.0,
                content_width: 450.0,
                content_height: layout.grid_height,
            },
        );
        assert_eq!((slot.minute - layout.day_start) % interval, 0, "y = {y}");
        assert!(slot.minute >= layout.day_start && slot.minute < layout.day_end);
        assert_eq!(slot.time, minutes_to_hhmm(slot.minute));
        y += 7.5;
    }
}

#[test]
fn malformed_time_degrades_to_midnight() {
    assert_eq!(time_to_minutes("9"), 0);
    assert_eq!(minutes_to_hhmm(time_to_minutes("17:05")), "17:05");
}

#[test]
fn view_routes_block_and_slot_clicks() {
    let schedule = fixture();
    let viewport = Viewport::new(800.0, 600.0);
    let view = DayGridView::new(schedule, LayoutConfig::default());
    let layout = view.layout().expect("valid layout");
    let body = body_rect(&viewport);
    let lane_width = layout.lane_width(body.w);

    let colour = placement_for(layout, view.schedule(), "a-colour")
        .expect("placed")
        .rect(lane_width);
    // 10:00 is 80 px down, inside a 600 px viewport without scrolling.
    let mut recorder = Recorder::default();
    assert!(view.click(
        body.x + colour.x + colour.w / 2.0,
        body.y + colour.y + colour.h / 2.0,
        &viewport,
        &mut recorder,
    ));
    assert_eq!(recorder.appointments, vec!["a-colour".to_string()]);

    // Empty area in the Marco lane at the bottom of the first screen.
    assert!(view.click(
        body.x + 2.0 * lane_width + 10.0,
        body.y + body.h - 1.0,
        &viewport,
        &mut recorder,
    ));
    assert_eq!(recorder.slots.len(), 1);
    assert_eq!(recorder.slots[0].1, Some(2));

    // Header and gutter are not click targets.
    assert!(!view.click(body.x + 10.0, 5.0, &viewport, &mut recorder));
    assert!(!view.click(5.0, body.y + 10.0, &viewport, &mut recorder));
}

#[test]
fn now_line_only_inside_window() {
    let mut view = DayGridView::new(fixture(), LayoutConfig::default());
    let viewport = Viewport::new(800.0, 600.0);

    view.set_now(Some(8 * 60 + 59));
    assert_eq!(view.now_offset(), None);
    view.set_now(Some(12 * 60));
    assert!(view.now_offset().is_some());
    view.set_now(Some(21 * 60));
    assert_eq!(view.now_offset(), None);

    view.set_now(Some(12 * 60));
    let commands = view.render(&viewport);
    let balance = commands.iter().fold(0i32, |depth, cmd| match cmd {
        RenderCommand::PushTransform { .. } => depth + 1,
        RenderCommand::PopTransform => depth - 1,
        _ => depth,
    });
    assert_eq!(balance, 0);
}

#[test]
fn fixture_exports_to_svg() {
    let mut view = DayGridView::new(fixture(), LayoutConfig::default());
    view.set_now(Some(10 * 60 + 30));
    let commands = view.render(&Viewport::new(900.0, 700.0));
    let svg = render_svg(&commands, 900.0, 700.0, false);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("data-event-id=\"a-colour\""));
    assert!(svg.contains("Priya"));
    assert!(!svg.contains("a-late"));
}
