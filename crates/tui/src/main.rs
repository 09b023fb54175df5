mod renderer;
mod source;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use salon_schedule_core::clock::{Clock, SystemClock};
use salon_schedule_core::parsers::parse_layout_config;
use salon_schedule_core::svg::render_svg;
use salon_schedule_core::views::{GUTTER_WIDTH, HEADER_HEIGHT};
use salon_schedule_core::{DayGridView, LayoutConfig};
use salon_schedule_protocol::Viewport;
use tracing_subscriber::EnvFilter;

use crate::source::DaySource;

const USAGE: &str = "Usage: salon-schedule <day.json | dir> [--config layout.json] [--date YYYY-MM-DD] [--svg out.svg] [--log file]";
const LOG_ENV: &str = "SALON_SCHEDULE_LOG";
/// Width of exported SVGs; the height follows the grid.
const SVG_WIDTH: f64 = 1200.0;

#[derive(Debug, Default)]
struct Args {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    date: Option<NaiveDate>,
    svg: Option<PathBuf>,
    log: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--config" => parsed.config = Some(value("--config")?.into()),
            "--svg" => parsed.svg = Some(value("--svg")?.into()),
            "--log" => parsed.log = Some(value("--log")?.into()),
            "--date" => {
                let raw = value("--date")?;
                let date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .with_context(|| format!("--date expects YYYY-MM-DD, got {raw:?}"))?;
                parsed.date = Some(date);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}\n{USAGE}"),
            _ if parsed.input.is_none() => parsed.input = Some(PathBuf::from(&arg)),
            _ => bail!("unexpected argument {arg:?}\n{USAGE}"),
        }
    }
    Ok(parsed)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Logs go to stderr for one-shot exports. The interactive grid owns the
/// terminal, so there they go to `--log` or nowhere.
fn init_logging(interactive: bool, log: Option<&Path>) -> Result<()> {
    match (interactive, log) {
        (_, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (false, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        (true, None) => {}
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let data =
        std::fs::read(path).with_context(|| format!("cannot read config {}", path.display()))?;
    let config = parse_layout_config(&data)
        .with_context(|| format!("invalid layout config {}", path.display()))?;
    Ok(config)
}

fn export_svg(source: &DaySource, config: LayoutConfig, out: &Path) -> Result<()> {
    let schedule = source.load()?;
    let mut view = DayGridView::new(schedule, config);
    view.set_now(Some(SystemClock.now_minutes()));

    let height = match view.layout() {
        Ok(layout) => HEADER_HEIGHT + layout.grid_height,
        Err(_) => 200.0,
    };
    let viewport = Viewport::new(SVG_WIDTH.max(GUTTER_WIDTH), height);
    let commands = view.render(&viewport);
    std::fs::write(out, render_svg(&commands, viewport.width, viewport.height, false))
        .with_context(|| format!("cannot write {}", out.display()))?;
    tracing::info!(path = %out.display(), commands = commands.len(), "exported svg");
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let Some(input) = args.input.clone() else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    init_logging(args.svg.is_none(), args.log.as_deref())?;
    let config = load_config(args.config.as_deref())?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let source = DaySource::new(input, date);

    match &args.svg {
        Some(out) => export_svg(&source, config, out),
        None => renderer::run(source, config),
    }
}
