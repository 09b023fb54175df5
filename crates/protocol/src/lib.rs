pub mod commands;
pub mod schedule;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use schedule::{DaySchedule, DayWindow, EventStatus, ScheduleEvent, ServiceLine, StaffMember};
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Point, Rect, Viewport};
