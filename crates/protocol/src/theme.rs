use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Event blocks, one per appointment status
    StatusBooked,
    StatusCompleted,
    StatusInProgress,
    StatusCancelled,
    StatusEnquiry,
    StatusDefault,
    EventBorder,
    EventText,

    // Grid body
    GridBackground,
    GridLineHour,
    GridLineMinor,
    LaneBorder,
    UnassignedLaneBackground,

    // Fixed header and time gutter
    LaneHeaderBackground,
    LaneHeaderText,
    GutterBackground,
    GutterText,

    NowIndicator,

    TextPrimary,
    TextSecondary,
    TextMuted,

    ErrorBackground,
    ErrorText,

    Background,
    Border,
}
