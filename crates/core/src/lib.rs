//! Day schedule grid for salon appointments: time arithmetic, lane model,
//! layout, click mapping, and the composed grid view.
//!
//! Everything here is pure and synchronous. Views produce
//! [`RenderCommand`](salon_schedule_protocol::RenderCommand) lists that any
//! renderer can draw; the grid itself never performs I/O.

pub mod clock;
pub mod fetch;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod parsers;
pub mod session;
pub mod svg;
pub mod time;
pub mod views;

pub use interaction::{GridCallbacks, GridClick, SlotClick};
pub use layout::{EventPlacement, GridLayout, LayoutError, TimeLabel};
pub use model::{Lane, LaneSet, LayoutConfig};
pub use views::DayGridView;
