use salon_schedule_protocol::{Point, Rect, RenderCommand, TextAlign, ThemeToken};

const DOT_SIZE: f64 = 6.0;

/// Current-time line across all lanes at `offset` pixels into the body.
pub fn render_now_indicator(offset: f64, content_width: f64) -> Vec<RenderCommand> {
    vec![
        RenderCommand::DrawLine {
            from: Point::new(0.0, offset),
            to: Point::new(content_width, offset),
            color: ThemeToken::NowIndicator,
            width: 2.0,
        },
        RenderCommand::DrawRect {
            rect: Rect::new(0.0, offset - DOT_SIZE / 2.0, DOT_SIZE, DOT_SIZE),
            color: ThemeToken::NowIndicator,
            border_color: None,
            label: None,
            event_id: None,
        },
    ]
}

/// The matching marker in the time gutter.
pub fn render_now_label(offset: f64, gutter_width: f64, text: &str) -> RenderCommand {
    RenderCommand::DrawText {
        position: Point::new(gutter_width - 2.0, offset),
        text: text.into(),
        color: ThemeToken::NowIndicator,
        font_size: 9.0,
        bold: true,
        align: TextAlign::Right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_spans_content_width() {
        let cmds = render_now_indicator(120.0, 450.0);
        let Some(RenderCommand::DrawLine { from, to, .. }) = cmds.first() else {
            unreachable!("indicator starts with its line");
        };
        assert_eq!(*from, Point::new(0.0, 120.0));
        assert_eq!(*to, Point::new(450.0, 120.0));
    }
}
