//! Where the terminal grid gets its days from: a single file, or a
//! directory of `YYYY-MM-DD.json` files browsed by date.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use salon_schedule_core::parsers::parse_day_schedule;
use salon_schedule_protocol::DaySchedule;

#[derive(Debug, Clone)]
pub enum DaySource {
    File(PathBuf),
    Directory { dir: PathBuf, date: NaiveDate },
}

impl DaySource {
    pub fn new(path: PathBuf, date: NaiveDate) -> Self {
        if path.is_dir() {
            Self::Directory { dir: path, date }
        } else {
            Self::File(path)
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::File(_) => None,
            Self::Directory { date, .. } => Some(*date),
        }
    }

    /// Move a directory source by `days`. File sources have one day only.
    pub fn step(&mut self, days: i64) -> bool {
        let Self::Directory { date, .. } = self else {
            return false;
        };
        match date.checked_add_signed(chrono::Duration::days(days)) {
            Some(next) => {
                *date = next;
                true
            }
            None => false,
        }
    }

    pub fn path(&self) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Directory { dir, date } => day_path(dir, *date),
        }
    }

    pub fn load(&self) -> Result<DaySchedule> {
        load_day(&self.path())
    }
}

pub fn day_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("{}.json", date.format("%Y-%m-%d")))
}

pub fn load_day(path: &Path) -> Result<DaySchedule> {
    let data = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let schedule =
        parse_day_schedule(&data).with_context(|| format!("invalid day file {}", path.display()))?;
    tracing::debug!(path = %path.display(), events = schedule.events.len(), "loaded day");
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).expect("valid date")
    }

    #[test]
    fn directory_steps_by_day() {
        let mut source = DaySource::Directory {
            dir: PathBuf::from("days"),
            date: date(31),
        };
        assert!(source.step(1));
        assert_eq!(source.path(), PathBuf::from("days").join("2026-11-01.json"));
        assert!(source.step(-2));
        assert_eq!(source.date(), Some(date(30)));
    }

    #[test]
    fn file_source_does_not_step() {
        let mut source = DaySource::File(PathBuf::from("day.json"));
        assert!(!source.step(1));
        assert_eq!(source.date(), None);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_day(Path::new("definitely/not/here.json")).expect_err("missing");
        assert!(err.to_string().contains("here.json"));
    }
}
