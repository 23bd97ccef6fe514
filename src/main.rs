mod widget;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use sixsides::config::Args;
use sixsides::CubeView;
use std::fs::File;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use widget::CubeWidget;

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Raw mode, alternate screen and mouse capture, restored on drop
struct TerminalSession;

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        // From here on Drop puts the terminal back, even if the rest fails
        let session = TerminalSession;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)
            .context("preparing the terminal")?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Logs go to a file when one is given; stdout belongs to the renderer.
///
/// Writes happen on a background thread so the frame loop never waits on
/// the file. The returned guard flushes it on drop.
fn init_logging(args: &Args) -> Result<Option<WorkerGuard>> {
    let Some(path) = &args.log_file else {
        return Ok(None);
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .with_context(|| format!("invalid log filter `{}`", args.log_level))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

fn terminal_size() -> (u16, u16) {
    termsize::get()
        .map(|size| (size.cols, size.rows))
        .filter(|&(cols, rows)| cols > 0 && rows > 0)
        .unwrap_or(FALLBACK_SIZE)
}

/// Polls input until each frame deadline, then ticks the view and paints
fn run(view: &mut CubeView, widget: &mut CubeWidget, frame_interval: Duration) -> Result<()> {
    let mut stdout = io::stdout();
    let mut next_frame = Instant::now();

    loop {
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout).context("polling terminal events")? {
            let event = event::read().context("reading terminal event")?;
            if !widget.event(&event, view) {
                return Ok(());
            }
        }

        let now = Instant::now();
        if now < next_frame {
            continue;
        }
        if !widget.is_paused() {
            view.on_frame();
        }
        widget.paint(&mut stdout, view).context("drawing frame")?;
        stdout.flush().context("drawing frame")?;

        next_frame += frame_interval;
        if next_frame < now {
            // Fell behind; don't replay the missed frames
            next_frame = now + frame_interval;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging(&args)?;

    let (columns, rows) = terminal_size();
    info!(columns, rows, fps = args.fps, "starting");

    let mut view = CubeView::new();
    let mut widget = CubeWidget::new(&args, columns, rows);

    let session = TerminalSession::enter()?;
    view.setup();
    let result = run(&mut view, &mut widget, args.frame_interval());
    view.teardown();
    drop(session);

    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}
