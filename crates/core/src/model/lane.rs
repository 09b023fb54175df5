use salon_schedule_protocol::{SharedStr, StaffMember};
use serde::{Deserialize, Serialize};

pub const UNASSIGNED_TITLE: &str = "Unassigned";

/// A vertical column of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lane {
    /// Events with no staff member, or one the grid does not know.
    Unassigned,
    Staff { id: SharedStr, name: SharedStr },
}

impl Lane {
    pub fn title(&self) -> &str {
        match self {
            Lane::Unassigned => UNASSIGNED_TITLE,
            Lane::Staff { name, .. } => name,
        }
    }

    pub fn staff_id(&self) -> Option<&str> {
        match self {
            Lane::Unassigned => None,
            Lane::Staff { id, .. } => Some(id),
        }
    }
}

/// The ordered lanes of one render. Index 0 is always [`Lane::Unassigned`],
/// index `i + 1` is `staff[i]`.
///
/// Both placement and click mapping index into this one list, so they cannot
/// disagree about the reserved column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneSet {
    lanes: Vec<Lane>,
}

impl LaneSet {
    pub fn from_staff(staff: &[StaffMember]) -> Self {
        let mut lanes = Vec::with_capacity(staff.len() + 1);
        lanes.push(Lane::Unassigned);
        lanes.extend(staff.iter().map(|s| Lane::Staff {
            id: SharedStr::from(s.id.as_str()),
            name: SharedStr::from(s.name.as_str()),
        }));
        Self { lanes }
    }

    /// Lane index for an event's `staffId`; unmatched or absent ids map to 0.
    pub fn lane_for(&self, staff_id: Option<&str>) -> usize {
        let Some(staff_id) = staff_id else {
            return 0;
        };
        self.lanes
            .iter()
            .position(|lane| lane.staff_id() == Some(staff_id))
            .unwrap_or(0)
    }

    pub fn get(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Never true: the Unassigned lane is always present.
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.iter()
    }
}
