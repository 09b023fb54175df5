use chrono::NaiveDate;
use salon_schedule_protocol::DaySchedule;
use thiserror::Error;

use crate::time::parse_hhmm;

#[derive(Debug, Error)]
pub enum DayScheduleParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parse one day's schedule from the backend's JSON shape.
///
/// Structural problems are errors. Malformed time strings are not: they are
/// logged here and later degrade to `00:00` during layout.
pub fn parse_day_schedule(data: &[u8]) -> Result<DaySchedule, DayScheduleParseError> {
    let schedule: DaySchedule = serde_json::from_slice(data)?;

    if let Some(date) = &schedule.date {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| DayScheduleParseError::InvalidDate(date.clone()))?;
    }

    for event in &schedule.events {
        for (field, value) in [("startTime", &event.start_time), ("endTime", &event.end_time)] {
            if let Err(err) = parse_hhmm(value) {
                tracing::warn!(event = %event.id, field, %err, "event time will degrade to 00:00");
            }
        }
    }

    tracing::debug!(
        date = schedule.date.as_deref().unwrap_or("-"),
        staff = schedule.staff.len(),
        events = schedule.events.len(),
        "parsed day schedule"
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn parses_minimal_day() {
        let day = parse_day_schedule(br#"{ "dayStartTime": "08:00", "dayEndTime": "18:00" }"#)
            .expect("minimal day");
        assert_eq!(day.window.day_start_time, "08:00");
        assert!(day.staff.is_empty());
        assert!(day.events.is_empty());
        assert!(day.date.is_none());
    }

    #[test]
    fn rejects_bad_date() {
        let err = parse_day_schedule(
            br#"{ "date": "16/10/2026", "dayStartTime": "08:00", "dayEndTime": "18:00" }"#,
        )
        .expect_err("bad date");
        assert!(matches!(err, DayScheduleParseError::InvalidDate(_)));
    }

    #[test]
    fn rejects_missing_window() {
        let err = parse_day_schedule(br#"{ "events": [] }"#).expect_err("no window");
        assert!(matches!(err, DayScheduleParseError::Json(_)));
    }

    #[test]
    #[traced_test]
    fn malformed_event_time_is_logged_not_rejected() {
        let day = parse_day_schedule(
            br#"{
                "dayStartTime": "09:00",
                "dayEndTime": "21:00",
                "events": [{ "id": "a1", "startTime": "9", "endTime": "10:00" }]
            }"#,
        )
        .expect("still parses");
        assert_eq!(day.events.len(), 1);
        assert!(logs_contain("event time will degrade"));
    }
}
