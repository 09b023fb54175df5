use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use salon_schedule_core::parsers::parse_day_schedule;
use salon_schedule_core::views::ScrollState;
use salon_schedule_core::{DayGridView, GridClick, LayoutConfig};
use salon_schedule_protocol::{DaySchedule, RenderCommand, Viewport};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Loaded days by handle. Handles are never reused.
static SCHEDULES: Mutex<BTreeMap<usize, DaySchedule>> = Mutex::new(BTreeMap::new());
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(0);

fn schedules() -> Result<MutexGuard<'static, BTreeMap<usize, DaySchedule>>, String> {
    SCHEDULES
        .lock()
        .map_err(|_| "schedule store poisoned".to_string())
}

/// Build a view for a stored schedule with the host's config and scroll.
/// Invalid config values still produce a view; it renders its error surface.
fn view_for(
    handle: usize,
    config_json: &str,
    viewport: &Viewport,
    scroll_left: f64,
    scroll_top: f64,
) -> Result<DayGridView, String> {
    let config = if config_json.trim().is_empty() {
        LayoutConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(|e| format!("invalid layout config: {e}"))?
    };
    let schedule = schedules()?
        .get(&handle)
        .cloned()
        .ok_or_else(|| "invalid schedule handle".to_string())?;
    let mut view = DayGridView::new(schedule, config);
    view.scroll_to(scroll_left, scroll_top, viewport);
    Ok(view)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderedGrid {
    commands: Vec<RenderCommand>,
    /// Scroll after clamping; the host should adopt it.
    scroll: ScrollState,
    content_width: f64,
    content_height: f64,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ClickOutcome {
    #[serde(rename_all = "camelCase")]
    Appointment { event_id: String },
    Slot { time: String, lane: Option<usize> },
    None,
}

fn load(data: &[u8]) -> Result<usize, String> {
    let schedule = parse_day_schedule(data).map_err(|e| e.to_string())?;
    let handle = NEXT_HANDLE.fetch_add(1, Ordering::Relaxed);
    schedules()?.insert(handle, schedule);
    Ok(handle)
}

fn unload(handle: usize) -> Result<(), String> {
    schedules()?
        .remove(&handle)
        .map(drop)
        .ok_or_else(|| "invalid schedule handle".to_string())
}

#[allow(clippy::too_many_arguments)]
fn render(
    handle: usize,
    config_json: &str,
    width: f64,
    height: f64,
    scroll_left: f64,
    scroll_top: f64,
    now_minutes: Option<u32>,
) -> Result<String, String> {
    let viewport = Viewport::new(width, height);
    let mut view = view_for(handle, config_json, &viewport, scroll_left, scroll_top)?;
    view.set_now(now_minutes);

    let body_width = salon_schedule_core::views::body_rect(&viewport).w;
    let (content_width, content_height) = match view.layout() {
        Ok(layout) => (layout.content_width(body_width), layout.grid_height),
        Err(_) => (0.0, 0.0),
    };
    let rendered = RenderedGrid {
        commands: view.render(&viewport),
        scroll: view.scroll(),
        content_width,
        content_height,
    };
    serde_json::to_string(&rendered).map_err(|e| e.to_string())
}

#[allow(clippy::too_many_arguments)]
fn map_click(
    handle: usize,
    config_json: &str,
    width: f64,
    height: f64,
    scroll_left: f64,
    scroll_top: f64,
    x: f64,
    y: f64,
) -> Result<String, String> {
    let viewport = Viewport::new(width, height);
    let view = view_for(handle, config_json, &viewport, scroll_left, scroll_top)?;
    let outcome = match view.hit(x, y, &viewport) {
        Some(GridClick::Event(event)) => ClickOutcome::Appointment {
            event_id: event.id.clone(),
        },
        Some(GridClick::Slot(slot)) => ClickOutcome::Slot {
            time: slot.time,
            lane: slot.lane,
        },
        None => ClickOutcome::None,
    };
    serde_json::to_string(&outcome).map_err(|e| e.to_string())
}

/// Parse a day schedule (JSON bytes). Returns a handle for later calls.
#[wasm_bindgen]
pub fn load_schedule(data: &[u8]) -> Result<usize, JsError> {
    load(data).map_err(|e| JsError::new(&e))
}

/// Release a loaded schedule; its handle becomes invalid.
#[wasm_bindgen]
pub fn unload_schedule(handle: usize) -> Result<(), JsError> {
    unload(handle).map_err(|e| JsError::new(&e))
}

/// Render the day grid, returning `{ commands, scroll, contentWidth,
/// contentHeight }` as JSON. An empty `config_json` uses the defaults.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_day_grid(
    handle: usize,
    config_json: &str,
    width: f64,
    height: f64,
    scroll_left: f64,
    scroll_top: f64,
    now_minutes: Option<u32>,
) -> Result<String, JsError> {
    render(
        handle,
        config_json,
        width,
        height,
        scroll_left,
        scroll_top,
        now_minutes,
    )
    .map_err(|e| JsError::new(&e))
}

/// Map a viewport click to `{"kind":"appointment","eventId":..}`,
/// `{"kind":"slot","time":..,"lane":..}` or `{"kind":"none"}`.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn map_grid_click(
    handle: usize,
    config_json: &str,
    width: f64,
    height: f64,
    scroll_left: f64,
    scroll_top: f64,
    x: f64,
    y: f64,
) -> Result<String, JsError> {
    map_click(
        handle,
        config_json,
        width,
        height,
        scroll_left,
        scroll_top,
        x,
        y,
    )
    .map_err(|e| JsError::new(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: &str = r#"{
        "date": "2026-10-16",
        "dayStartTime": "09:00",
        "dayEndTime": "18:00",
        "staff": [{ "id": "s1", "name": "Priya" }],
        "events": [
            { "id": "a1", "staffId": "s1", "startTime": "09:00", "endTime": "10:00",
              "status": "booked", "customerName": "Dana" }
        ]
    }"#;

    #[test]
    fn render_reports_clamped_scroll() {
        let handle = load(DAY.as_bytes()).expect("valid day");
        let json = render(handle, "", 800.0, 600.0, -40.0, 1e9, Some(600)).expect("renders");
        let value: serde_json::Value = serde_json::from_str(&json).expect("json");
        assert_eq!(value["scroll"]["left"], 0.0);
        // 9 hours at 80 px/hour, minus a 568 px body.
        assert_eq!(value["scroll"]["top"], 720.0 - 568.0);
        assert_eq!(value["contentHeight"], 720.0);
        assert!(json.contains("a1"));
    }

    #[test]
    fn invalid_config_values_render_error_surface() {
        let handle = load(DAY.as_bytes()).expect("valid day");
        let json = render(
            handle,
            r#"{"eventCalcUnitMinutes": 0}"#,
            400.0,
            300.0,
            0.0,
            0.0,
            None,
        )
        .expect("renders");
        assert!(json.contains("config-error"));
        assert!(render(handle, "{not json", 400.0, 300.0, 0.0, 0.0, None).is_err());
    }

    #[test]
    fn clicks_map_to_appointment_slot_or_nothing() {
        let handle = load(DAY.as_bytes()).expect("valid day");
        // Body starts at (56, 32); two lanes of 372 px; a1 covers 09:00-10:00 in lane 1.
        let hit = |x, y| map_click(handle, "", 800.0, 600.0, 0.0, 0.0, x, y).expect("maps");

        assert_eq!(hit(56.0 + 372.0 + 100.0, 32.0 + 40.0), r#"{"kind":"appointment","eventId":"a1"}"#);
        assert_eq!(hit(56.0 + 100.0, 32.0 + 80.0), r#"{"kind":"slot","time":"10:00","lane":0}"#);
        assert_eq!(hit(10.0, 10.0), r#"{"kind":"none"}"#);
    }

    #[test]
    fn unloaded_handle_is_released() {
        let handle = load(DAY.as_bytes()).expect("valid day");
        unload(handle).expect("loaded");
        assert!(render(handle, "", 100.0, 100.0, 0.0, 0.0, None).is_err());
        assert!(unload(handle).is_err());
    }

    #[test]
    fn unknown_handle_is_an_error() {
        assert!(render(usize::MAX, "", 100.0, 100.0, 0.0, 0.0, None).is_err());
    }
}
