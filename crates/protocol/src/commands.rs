use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// Views emit a `Vec<RenderCommand>` per frame and renderers (SVG, terminal,
/// browser canvas) consume it in order. Every command carries all the data
/// it needs; the only renderer-side state is the clip and transform stacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally with a tooltip label and the id of
    /// the schedule event it represents (for hit-testing by the host).
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        label: Option<SharedStr>,
        event_id: Option<SharedStr>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: SharedStr,
        color: ThemeToken,
        font_size: f64,
        bold: bool,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the most recent clip region.
    ClearClip,

    /// Push an affine transform, applied to all subsequent commands until
    /// the matching `PopTransform`. Scroll offsets are expressed this way.
    PushTransform { translate: Point, scale: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Begin a logical group (header, gutter, body, a lane).
    BeginGroup {
        id: SharedStr,
        label: Option<SharedStr>,
    },

    /// End the current group.
    EndGroup,
}

impl RenderCommand {
    /// Translate-only transform, the common case for scroll offsets.
    pub fn translate(x: f64, y: f64) -> Self {
        RenderCommand::PushTransform {
            translate: Point::new(x, y),
            scale: Point::new(1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_externally_tagged_json() {
        let cmd = RenderCommand::DrawRect {
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            color: ThemeToken::StatusBooked,
            border_color: None,
            label: Some("Ada".into()),
            event_id: Some("a-1".into()),
        };
        let json = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(json["DrawRect"]["color"], "StatusBooked");
        assert_eq!(json["DrawRect"]["event_id"], "a-1");

        let back: RenderCommand = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, cmd);
    }

    #[test]
    fn translate_has_unit_scale() {
        let RenderCommand::PushTransform { translate, scale } = RenderCommand::translate(5.0, -7.0)
        else {
            unreachable!("translate always builds a PushTransform");
        };
        assert_eq!(translate, Point::new(5.0, -7.0));
        assert_eq!(scale, Point::new(1.0, 1.0));
    }
}
