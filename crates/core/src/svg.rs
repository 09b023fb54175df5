//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use std::fmt::Write;

use salon_schedule_protocol::{RenderCommand, TextAlign, ThemeToken};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    );

    let bg = resolve_color(ThemeToken::Background, dark);
    let _ = write!(svg, r#"<rect width="{width}" height="{height}" fill="{bg}"/>"#);

    // Each clip opens a <g clip-path>; ClearClip closes the innermost one.
    let mut clip_id = 0usize;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                label,
                event_id,
            } => {
                let fill = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" rx="2""#,
                    rect.x, rect.y, rect.w, rect.h,
                );
                if let Some(border) = border_color {
                    let _ = write!(
                        svg,
                        r#" stroke="{}" stroke-width="0.5""#,
                        resolve_color(*border, dark)
                    );
                }
                if let Some(id) = event_id {
                    let _ = write!(svg, r#" data-event-id="{}""#, escape_xml(id));
                }
                svg.push('>');
                if let Some(label) = label {
                    let _ = write!(svg, "<title>{}</title>", escape_xml(label));
                }
                svg.push_str("</rect>");
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                let stroke = resolve_color(*color, dark);
                let _ = write!(
                    svg,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{line_width}"/>"#,
                    from.x, from.y, to.x, to.y,
                );
            }
            RenderCommand::DrawText {
                text,
                position,
                color,
                font_size,
                bold,
                align,
            } => {
                let fill = resolve_color(*color, dark);
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let weight = if *bold { "bold" } else { "normal" };
                let _ = write!(
                    svg,
                    r#"<text x="{}" y="{}" fill="{fill}" font-size="{font_size}" font-weight="{weight}" text-anchor="{anchor}" dominant-baseline="middle">{}</text>"#,
                    position.x,
                    position.y,
                    escape_xml(text),
                );
            }
            RenderCommand::SetClip { rect } => {
                clip_id += 1;
                let _ = write!(
                    svg,
                    r#"<clipPath id="clip{clip_id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clip_id})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                );
            }
            RenderCommand::PushTransform { translate, scale } => {
                let _ = write!(
                    svg,
                    r#"<g transform="translate({} {}) scale({} {})">"#,
                    translate.x, translate.y, scale.x, scale.y,
                );
            }
            RenderCommand::ClearClip | RenderCommand::PopTransform => svg.push_str("</g>"),
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    svg.push_str("</svg>");
    svg
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::StatusBooked => "#3d7bd9",
            ThemeToken::StatusCompleted => "#3f9e5a",
            ThemeToken::StatusInProgress => "#d9932b",
            ThemeToken::StatusCancelled => "#a14545",
            ThemeToken::StatusEnquiry => "#8a5cc7",
            ThemeToken::StatusDefault => "#5c6370",
            ThemeToken::EventBorder => "#10131a",
            ThemeToken::EventText | ThemeToken::TextPrimary | ThemeToken::LaneHeaderText => {
                "#ececec"
            }
            ThemeToken::GridBackground | ThemeToken::Background => "#181818",
            ThemeToken::UnassignedLaneBackground => "#202028",
            ThemeToken::GridLineHour => "#3a3a3a",
            ThemeToken::GridLineMinor => "#262626",
            ThemeToken::LaneBorder | ThemeToken::Border => "#303030",
            ThemeToken::LaneHeaderBackground | ThemeToken::GutterBackground => "#1f1f1f",
            ThemeToken::GutterText => "#cfcfcf",
            ThemeToken::NowIndicator => "#ff5252",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#9e9e9e",
            ThemeToken::ErrorBackground => "#2b1414",
            ThemeToken::ErrorText => "#ff8a80",
        }
    } else {
        match token {
            ThemeToken::StatusBooked => "#cfe2ff",
            ThemeToken::StatusCompleted => "#d1e7dd",
            ThemeToken::StatusInProgress => "#fff3cd",
            ThemeToken::StatusCancelled => "#f8d7da",
            ThemeToken::StatusEnquiry => "#e2d9f3",
            ThemeToken::StatusDefault => "#e9ecef",
            ThemeToken::EventBorder => "#adb5bd",
            ThemeToken::EventText | ThemeToken::TextPrimary | ThemeToken::LaneHeaderText => {
                "#1a1a2e"
            }
            ThemeToken::GridBackground | ThemeToken::Background => "#ffffff",
            ThemeToken::UnassignedLaneBackground => "#f8f9fa",
            ThemeToken::GridLineHour => "#ced4da",
            ThemeToken::GridLineMinor => "#eef0f2",
            ThemeToken::LaneBorder | ThemeToken::Border => "#dee2e6",
            ThemeToken::LaneHeaderBackground | ThemeToken::GutterBackground => "#f1f3f5",
            ThemeToken::GutterText => "#343a40",
            ThemeToken::NowIndicator => "#e03131",
            ThemeToken::TextSecondary | ThemeToken::TextMuted => "#666677",
            ThemeToken::ErrorBackground => "#fff5f5",
            ThemeToken::ErrorText => "#c92a2a",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
