//! `HH:MM` <-> minutes-since-midnight conversions.

use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("missing ':' separator in {0:?}")]
    MissingSeparator(String),
    #[error("non-numeric component in {0:?}")]
    NotNumeric(String),
    #[error("hour {0} outside 0-23")]
    HourOutOfRange(u32),
    #[error("minute {0} outside 0-59")]
    MinuteOutOfRange(u32),
}

/// Strictly parse `HH:MM` (one- or two-digit hour) into minutes since midnight.
pub fn parse_hhmm(s: &str) -> Result<u32, TimeParseError> {
    let trimmed = s.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| TimeParseError::MissingSeparator(s.to_string()))?;

    let parse = |part: &str| -> Result<u32, TimeParseError> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeParseError::NotNumeric(s.to_string()));
        }
        part.parse::<u32>()
            .map_err(|_| TimeParseError::NotNumeric(s.to_string()))
    };

    let h = parse(hours)?;
    let m = parse(minutes)?;
    if h > 23 {
        return Err(TimeParseError::HourOutOfRange(h));
    }
    if m > 59 {
        return Err(TimeParseError::MinuteOutOfRange(m));
    }
    Ok(h * 60 + m)
}

/// Lenient conversion used throughout layout.
///
/// Malformed input yields `0` and a warning instead of an error, so callers
/// must read `0` as "degraded" unless midnight was actually meant.
pub fn time_to_minutes(s: &str) -> u32 {
    match parse_hhmm(s) {
        Ok(minutes) => minutes,
        Err(err) => {
            tracing::warn!(input = s, %err, "malformed time string, defaulting to 00:00");
            0
        }
    }
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Values past the end of the day wrap.
pub fn minutes_to_hhmm(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn parses_padded_and_unpadded_hours() {
        assert_eq!(parse_hhmm("09:30"), Ok(570));
        assert_eq!(parse_hhmm("9:30"), Ok(570));
        assert_eq!(parse_hhmm("00:00"), Ok(0));
        assert_eq!(parse_hhmm("23:59"), Ok(1439));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(parse_hhmm("9"), Err(TimeParseError::MissingSeparator(_))));
        assert!(matches!(parse_hhmm("ab:30"), Err(TimeParseError::NotNumeric(_))));
        assert!(matches!(parse_hhmm("10:"), Err(TimeParseError::NotNumeric(_))));
        assert!(matches!(parse_hhmm("-1:30"), Err(TimeParseError::NotNumeric(_))));
        assert_eq!(parse_hhmm("24:00"), Err(TimeParseError::HourOutOfRange(24)));
        assert_eq!(parse_hhmm("12:60"), Err(TimeParseError::MinuteOutOfRange(60)));
    }

    #[test]
    #[traced_test]
    fn malformed_time_degrades_to_midnight_with_warning() {
        assert_eq!(time_to_minutes("9"), 0);
        assert!(logs_contain("malformed time string"));
    }

    #[test]
    #[traced_test]
    fn valid_time_does_not_warn() {
        assert_eq!(time_to_minutes("21:00"), 1260);
        assert!(!logs_contain("malformed time string"));
    }

    #[test]
    fn formatting_pads_both_components() {
        assert_eq!(minutes_to_hhmm(5), "00:05");
        assert_eq!(minutes_to_hhmm(545), "09:05");
        assert_eq!(minutes_to_hhmm(1439), "23:59");
        assert_eq!(minutes_to_hhmm(1440), "00:00");
    }

    #[test]
    fn every_valid_time_round_trips() {
        for minutes in 0..MINUTES_PER_DAY {
            let s = minutes_to_hhmm(minutes);
            assert_eq!(minutes_to_hhmm(time_to_minutes(&s)), s);
        }
    }
}
