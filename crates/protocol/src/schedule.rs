use serde::{Deserialize, Serialize};

/// One day's input to the schedule grid, as delivered by the owning screen.
///
/// Field names follow the backend's camelCase JSON so payloads can be
/// deserialized without an intermediate mapping layer.
///
/// ```text
///   backend JSON ──▶ DaySchedule ──▶ GridLayout ──▶ RenderCommand[] ──▶ Renderer
///                      (this)        (placement,      (DrawRect,        (SVG,
///                                     labels, lanes)   DrawText…)        terminal,
///                                                                        canvas)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Calendar date (`YYYY-MM-DD`) the schedule belongs to, if known.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(flatten)]
    pub window: DayWindow,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub events: Vec<ScheduleEvent>,
}

impl DaySchedule {
    pub fn event(&self, id: &str) -> Option<&ScheduleEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// The visible vertical extent of the grid. Same-day only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWindow {
    pub day_start_time: String,
    pub day_end_time: String,
}

impl DayWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day_start_time: start.into(),
            day_end_time: end.into(),
        }
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::new("09:00", "21:00")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
}

/// An appointment, booking or enquiry occupying a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: String,
    /// `None` (or an id matching no staff member) lands in the Unassigned lane.
    #[serde(default)]
    pub staff_id: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLine {
    pub name: String,
    /// Duration in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
}

impl ServiceLine {
    /// Text shown inside an event block, e.g. `Haircut (45m)`.
    pub fn display(&self) -> String {
        match self.duration {
            Some(minutes) => format!("{} ({minutes}m)", self.name),
            None => self.name.clone(),
        }
    }
}

/// Appointment status; drives block colour only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventStatus {
    Booked,
    Completed,
    InProgress,
    Cancelled,
    Enquiry,
    /// Also the landing spot for status strings the grid does not know.
    #[default]
    #[serde(other)]
    Default,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Booked => write!(f, "Booked"),
            Self::Completed => write!(f, "Completed"),
            Self::InProgress => write!(f, "In progress"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Enquiry => write!(f, "Enquiry"),
            Self::Default => write!(f, "Scheduled"),
        }
    }
}
