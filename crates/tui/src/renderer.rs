use std::io::stdout;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};
use salon_schedule_core::clock::{Clock, SystemClock};
use salon_schedule_core::fetch::{DayQuery, LatestOnly, Ticket};
use salon_schedule_core::interaction::GridCallbacks;
use salon_schedule_core::{DayGridView, LaneSet, LayoutConfig};
use salon_schedule_protocol::{
    DaySchedule, DayWindow, Point, Rect as PxRect, RenderCommand, ScheduleEvent, TextAlign,
    ThemeToken, Viewport,
};

use crate::source::{DaySource, day_path, load_day};

/// Logical pixels per terminal cell.
pub const CELL_W: f64 = 8.0;
pub const CELL_H: f64 = 16.0;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::StatusBooked => Color::Rgb(61, 123, 217),
        ThemeToken::StatusCompleted => Color::Rgb(63, 158, 90),
        ThemeToken::StatusInProgress => Color::Rgb(217, 147, 43),
        ThemeToken::StatusCancelled => Color::Rgb(161, 69, 69),
        ThemeToken::StatusEnquiry => Color::Rgb(138, 92, 199),
        ThemeToken::StatusDefault => Color::Rgb(92, 99, 112),
        ThemeToken::EventBorder => Color::Black,
        ThemeToken::EventText => Color::White,
        ThemeToken::GridBackground => Color::Black,
        ThemeToken::GridLineHour => Color::DarkGray,
        ThemeToken::GridLineMinor => Color::Rgb(38, 38, 38),
        ThemeToken::LaneBorder => Color::DarkGray,
        ThemeToken::UnassignedLaneBackground => Color::Rgb(24, 24, 32),
        ThemeToken::LaneHeaderBackground => Color::Rgb(31, 31, 31),
        ThemeToken::LaneHeaderText => Color::White,
        ThemeToken::GutterBackground => Color::Rgb(31, 31, 31),
        ThemeToken::GutterText => Color::Gray,
        ThemeToken::NowIndicator => Color::LightRed,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::ErrorBackground => Color::Rgb(43, 20, 20),
        ThemeToken::ErrorText => Color::LightRed,
        ThemeToken::Background => Color::Black,
        ThemeToken::Border => Color::DarkGray,
    }
}

/// Rasterizes render commands onto terminal cells, honouring the transform
/// and clip stacks the grid view emits.
struct Painter<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    offsets: Vec<Point>,
    clips: Vec<PxRect>,
}

impl<'a> Painter<'a> {
    fn new(buf: &'a mut Buffer, area: Rect) -> Self {
        let full = PxRect::new(
            0.0,
            0.0,
            f64::from(area.width) * CELL_W,
            f64::from(area.height) * CELL_H,
        );
        Self {
            buf,
            area,
            offsets: vec![Point::new(0.0, 0.0)],
            clips: vec![full],
        }
    }

    fn offset(&self) -> Point {
        self.offsets.last().copied().unwrap_or(Point::new(0.0, 0.0))
    }

    fn clip(&self) -> Option<PxRect> {
        self.clips.last().copied()
    }

    fn to_absolute(&self, rect: &PxRect) -> PxRect {
        let o = self.offset();
        PxRect::new(rect.x + o.x, rect.y + o.y, rect.w, rect.h)
    }

    fn apply(&mut self, cmd: &RenderCommand) {
        match cmd {
            RenderCommand::DrawRect { rect, color, .. } => {
                let abs = self.to_absolute(rect);
                self.fill(abs, theme_to_color(*color));
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                bold,
                align,
                ..
            } => {
                let o = self.offset();
                self.text(
                    Point::new(position.x + o.x, position.y + o.y),
                    text,
                    theme_to_color(*color),
                    *bold,
                    *align,
                );
            }
            RenderCommand::DrawLine {
                from, to, color, ..
            } => {
                let o = self.offset();
                self.line(
                    Point::new(from.x + o.x, from.y + o.y),
                    Point::new(to.x + o.x, to.y + o.y),
                    theme_to_color(*color),
                );
            }
            RenderCommand::SetClip { rect } => {
                let abs = self.to_absolute(rect);
                let clip = match self.clip() {
                    Some(outer) => intersect(&outer, &abs),
                    None => abs,
                };
                self.clips.push(clip);
            }
            RenderCommand::ClearClip => {
                // The root clip is the terminal itself.
                if self.clips.len() > 1 {
                    self.clips.pop();
                }
            }
            RenderCommand::PushTransform { translate, .. } => {
                let o = self.offset();
                self.offsets
                    .push(Point::new(o.x + translate.x, o.y + translate.y));
            }
            RenderCommand::PopTransform => {
                if self.offsets.len() > 1 {
                    self.offsets.pop();
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    fn cell_visible(&self, col: i64, row: i64) -> Option<(u16, u16)> {
        let clip = self.clip()?;
        let center = Point::new(
            (col as f64 + 0.5) * CELL_W,
            (row as f64 + 0.5) * CELL_H,
        );
        if !clip.contains(center) {
            return None;
        }
        let x = u16::try_from(col).ok()?;
        let y = u16::try_from(row).ok()?;
        if x >= self.area.width || y >= self.area.height {
            return None;
        }
        Some((self.area.x + x, self.area.y + y))
    }

    fn fill(&mut self, rect: PxRect, bg: Color) {
        let c0 = (rect.x / CELL_W).round() as i64;
        let r0 = (rect.y / CELL_H).round() as i64;
        // Anything with area covers at least one cell.
        let c1 = ((rect.right() / CELL_W).round() as i64).max(c0 + 1);
        let r1 = ((rect.bottom() / CELL_H).round() as i64).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                if let Some(pos) = self.cell_visible(col, row) {
                    self.buf[pos].set_char(' ').set_bg(bg);
                }
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, fg: Color) {
        if (from.y - to.y).abs() < f64::EPSILON {
            let row = (from.y / CELL_H).floor() as i64;
            let c0 = (from.x.min(to.x) / CELL_W).floor() as i64;
            let c1 = (from.x.max(to.x) / CELL_W).ceil() as i64;
            for col in c0..c1 {
                if let Some(pos) = self.cell_visible(col, row) {
                    self.buf[pos].set_char('─').set_fg(fg);
                }
            }
        } else if (from.x - to.x).abs() < f64::EPSILON {
            let col = (from.x / CELL_W).floor() as i64;
            let r0 = (from.y.min(to.y) / CELL_H).floor() as i64;
            let r1 = (from.y.max(to.y) / CELL_H).ceil() as i64;
            for row in r0..r1 {
                if let Some(pos) = self.cell_visible(col, row) {
                    self.buf[pos].set_char('│').set_fg(fg);
                }
            }
        }
    }

    fn text(&mut self, at: Point, text: &str, fg: Color, bold: bool, align: TextAlign) {
        let len = text.chars().count() as i64;
        let anchor = (at.x / CELL_W).floor() as i64;
        let start = match align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - len / 2,
            TextAlign::Right => anchor - len,
        };
        let row = (at.y / CELL_H).floor() as i64;
        let modifier = if bold {
            Modifier::BOLD
        } else {
            Modifier::empty()
        };
        for (i, ch) in text.chars().enumerate() {
            if let Some(pos) = self.cell_visible(start + i as i64, row) {
                self.buf[pos]
                    .set_char(ch)
                    .set_fg(fg)
                    .set_style(Style::default().add_modifier(modifier));
            }
        }
    }
}

fn intersect(a: &PxRect, b: &PxRect) -> PxRect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = a.right().min(b.right());
    let bottom = a.bottom().min(b.bottom());
    PxRect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
}

pub fn paint(commands: &[RenderCommand], buf: &mut Buffer, area: Rect) {
    let mut painter = Painter::new(buf, area);
    for cmd in commands {
        painter.apply(cmd);
    }
}

fn grid_viewport(area: Rect) -> Viewport {
    Viewport::new(
        f64::from(area.width) * CELL_W,
        f64::from(area.height) * CELL_H,
    )
}

/// Turns grid callbacks into a status-line message.
struct StatusRecorder<'a> {
    lanes: Option<&'a LaneSet>,
    message: Option<String>,
}

impl GridCallbacks for StatusRecorder<'_> {
    fn on_grid_click(&mut self, time: &str, lane: Option<usize>) {
        let lane = lane
            .and_then(|index| self.lanes?.get(index))
            .map_or("outside lanes", |lane| lane.title());
        self.message = Some(format!("new appointment at {time} · {lane}"));
    }

    fn on_appointment_click(&mut self, event: &ScheduleEvent) {
        self.message = Some(format!(
            "{} · {}-{} · {}",
            event.customer_name, event.start_time, event.end_time, event.status
        ));
    }
}

type LoadResult = (Ticket<DayQuery>, Result<DaySchedule>);

/// Loads directory days on worker threads. Only the most recently requested
/// day is ever applied, however the loads finish.
struct DayLoader {
    guard: LatestOnly<DayQuery>,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl DayLoader {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            guard: LatestOnly::new(),
            tx,
            rx,
        }
    }

    fn request(&mut self, dir: PathBuf, date: NaiveDate) {
        let ticket = self.guard.issue(DayQuery::new(date));
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = load_day(&day_path(&dir, date));
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send((ticket, result));
        });
    }

    /// The freshest accepted result, if one arrived.
    fn drain(&mut self) -> Option<(NaiveDate, Result<DaySchedule>)> {
        let mut latest = None;
        while let Ok((ticket, result)) = self.rx.try_recv() {
            let date = ticket.key().date;
            if let Some(result) = self.guard.accept(&ticket, result) {
                latest = Some((date, result));
            }
        }
        latest
    }

    fn pending(&self) -> Option<NaiveDate> {
        self.guard.pending().map(|query| query.date)
    }
}

fn empty_day(date: NaiveDate) -> DaySchedule {
    DaySchedule {
        date: Some(date.format("%Y-%m-%d").to_string()),
        window: DayWindow::default(),
        staff: Vec::new(),
        events: Vec::new(),
    }
}

struct App {
    view: DayGridView,
    source: DaySource,
    loader: DayLoader,
    status: String,
}

impl App {
    fn new(source: DaySource, config: LayoutConfig) -> Result<Self> {
        let schedule = match source.date() {
            None => source.load()?,
            Some(date) => empty_day(date),
        };
        let mut app = Self {
            view: DayGridView::new(schedule, config),
            source,
            loader: DayLoader::new(),
            status: "click a slot or appointment".into(),
        };
        if let DaySource::Directory { dir, date } = &app.source {
            app.loader.request(dir.clone(), *date);
        }
        Ok(app)
    }

    fn step_day(&mut self, days: i64) {
        if !self.source.step(days) {
            return;
        }
        if let DaySource::Directory { dir, date } = &self.source {
            self.loader.request(dir.clone(), *date);
        }
    }

    fn receive(&mut self) -> bool {
        let Some((date, result)) = self.loader.drain() else {
            return false;
        };
        match result {
            Ok(schedule) => {
                self.status = format!("{} appointments", schedule.events.len());
                self.view.set_schedule(schedule);
            }
            Err(err) => {
                tracing::warn!(%date, error = %err, "day unavailable");
                self.status = format!("no schedule for {date}");
                self.view.set_schedule(empty_day(date));
            }
        }
        true
    }

    fn title(&self) -> String {
        let day = self
            .view
            .schedule()
            .date
            .clone()
            .unwrap_or_else(|| self.source.path().display().to_string());
        let loading = if self.loader.pending().is_some() {
            " (loading…)"
        } else {
            ""
        };
        format!(
            " {day}{loading} | {} | arrows scroll | [ ] day | n now | q quit ",
            self.status
        )
    }

    fn click(&mut self, column: u16, row: u16, viewport: &Viewport) {
        let x = f64::from(column) * CELL_W + CELL_W / 2.0;
        let y = f64::from(row) * CELL_H + CELL_H / 2.0;
        let mut recorder = StatusRecorder {
            lanes: self.view.layout().ok().map(|layout| &layout.lanes),
            message: None,
        };
        self.view.click(x, y, viewport, &mut recorder);
        if let Some(message) = recorder.message {
            self.status = message;
        }
    }

    fn scroll_to_now(&mut self, viewport: &Viewport) {
        let now = SystemClock.now_minutes();
        // Leave an hour of context above the line.
        self.view.scroll_to_minute(now.saturating_sub(60), viewport);
    }
}

pub fn run(source: DaySource, config: LayoutConfig) -> Result<()> {
    let mut app = App::new(source, config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        let grid_area = Rect::new(0, 1, size.width, size.height.saturating_sub(1));
        let viewport = grid_viewport(grid_area);
        // Keep the stored offsets valid after a terminal resize.
        app.view.scroll_by(0.0, 0.0, &viewport);

        app.view.tick(Instant::now(), &SystemClock);
        app.receive();

        let commands = app.view.render(&viewport);
        let title = app.title();
        terminal.draw(|frame| {
            let area = frame.area();
            let header = Paragraph::new(title)
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(header, Rect::new(0, 0, area.width, 1));
            paint(&commands, frame.buffer_mut(), grid_area.intersection(area));
        })?;

        let timeout = POLL_INTERVAL.min(app.view.ticker().until_due(Instant::now()));
        if !event::poll(timeout)? {
            continue;
        }
        let step_x = CELL_W * 4.0;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Left => app.view.scroll_by(-step_x, 0.0, &viewport),
                KeyCode::Right => app.view.scroll_by(step_x, 0.0, &viewport),
                KeyCode::Up => app.view.scroll_by(0.0, -CELL_H, &viewport),
                KeyCode::Down => app.view.scroll_by(0.0, CELL_H, &viewport),
                KeyCode::PageUp => app.view.scroll_by(0.0, -viewport.height, &viewport),
                KeyCode::PageDown => app.view.scroll_by(0.0, viewport.height, &viewport),
                KeyCode::Char('n') => app.scroll_to_now(&viewport),
                KeyCode::Char('[') => app.step_day(-1),
                KeyCode::Char(']') => app.step_day(1),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.view.scroll_by(0.0, CELL_H * 2.0, &viewport),
                MouseEventKind::ScrollUp => app.view.scroll_by(0.0, -CELL_H * 2.0, &viewport),
                MouseEventKind::ScrollLeft => app.view.scroll_by(-step_x, 0.0, &viewport),
                MouseEventKind::ScrollRight => app.view.scroll_by(step_x, 0.0, &viewport),
                MouseEventKind::Down(MouseButton::Left) if mouse.row >= grid_area.y => {
                    app.click(mouse.column, mouse.row - grid_area.y, &viewport);
                }
                _ => {}
            },
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_schedule_protocol::SharedStr;

    fn symbol(buf: &Buffer, x: u16, y: u16) -> &str {
        buf[(x, y)].symbol()
    }

    fn text(x: f64, y: f64, s: &str) -> RenderCommand {
        RenderCommand::DrawText {
            position: Point::new(x, y),
            text: SharedStr::from(s),
            color: ThemeToken::TextPrimary,
            font_size: 12.0,
            bold: false,
            align: TextAlign::Left,
        }
    }

    #[test]
    fn text_follows_translation() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        paint(
            &[
                RenderCommand::translate(CELL_W * 3.0, CELL_H),
                text(0.0, 0.0, "09:00"),
                RenderCommand::PopTransform,
                text(0.0, 0.0, "x"),
            ],
            &mut buf,
            area,
        );
        assert_eq!(symbol(&buf, 3, 1), "0");
        assert_eq!(symbol(&buf, 7, 1), "0");
        assert_eq!(symbol(&buf, 0, 0), "x");
    }

    #[test]
    fn clip_hides_text_outside_region() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        paint(
            &[
                RenderCommand::SetClip {
                    rect: PxRect::new(0.0, 0.0, CELL_W * 2.0, CELL_H),
                },
                text(0.0, 0.0, "Priya"),
                RenderCommand::ClearClip,
                text(0.0, CELL_H, "Marco"),
            ],
            &mut buf,
            area,
        );
        assert_eq!(symbol(&buf, 1, 0), "r");
        assert_eq!(symbol(&buf, 2, 0), " ");
        assert_eq!(symbol(&buf, 4, 1), "o");
    }

    #[test]
    fn small_rect_still_covers_a_cell() {
        let area = Rect::new(0, 0, 4, 4);
        let mut buf = Buffer::empty(area);
        paint(
            &[RenderCommand::DrawRect {
                rect: PxRect::new(CELL_W, CELL_H, 3.0, 3.0),
                color: ThemeToken::StatusBooked,
                border_color: None,
                label: None,
                event_id: None,
            }],
            &mut buf,
            area,
        );
        assert_eq!(buf[(1, 1)].bg, theme_to_color(ThemeToken::StatusBooked));
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }

    #[test]
    fn grid_view_paints_into_a_small_terminal() {
        let schedule = empty_day(NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date"));
        let view = DayGridView::new(schedule, LayoutConfig::default());
        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        paint(&view.render(&grid_viewport(area)), &mut buf, area);
        // The header is two cells tall; titles sit on its second row.
        let title_row: String = (0..area.width).map(|x| symbol(&buf, x, 1)).collect();
        assert!(title_row.contains("Unassigned"), "row was {title_row:?}");
    }

    #[test]
    fn stale_day_result_is_dropped() {
        let mut loader = DayLoader::new();
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).expect("valid date");
        let tuesday = NaiveDate::from_ymd_opt(2026, 10, 13).expect("valid date");
        let old = loader.guard.issue(DayQuery::new(monday));
        let new = loader.guard.issue(DayQuery::new(tuesday));

        loader.tx.send((new, Ok(empty_day(tuesday)))).expect("send");
        loader.tx.send((old, Ok(empty_day(monday)))).expect("send");

        let (date, result) = loader.drain().expect("fresh result");
        assert_eq!(date, tuesday);
        assert_eq!(
            result.expect("loaded").date.as_deref(),
            Some("2026-10-13")
        );
        assert!(loader.pending().is_none());
    }

    #[test]
    fn status_recorder_names_the_lane() {
        let lanes = LaneSet::from_staff(&[salon_schedule_protocol::StaffMember {
            id: "s1".into(),
            name: "Priya".into(),
        }]);
        let mut recorder = StatusRecorder {
            lanes: Some(&lanes),
            message: None,
        };
        recorder.on_grid_click("10:30", Some(1));
        assert_eq!(recorder.message.as_deref(), Some("new appointment at 10:30 · Priya"));
        recorder.on_grid_click("10:30", None);
        assert_eq!(
            recorder.message.as_deref(),
            Some("new appointment at 10:30 · outside lanes")
        );
    }
}
