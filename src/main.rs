//! Terminal system monitor overlay
//!
//! Shows live CPU and memory usage with rolling history graphs, the process
//! and service lists with live search, and per-interface network counters.
//! On Windows the data comes from raw Win32 calls via the `windows` crate.
//!
//! Controls:
//! - q: Quit
//! - Tab / 1-4: Switch tab (Performance, Processes, Services, Network)
//! - /: Search process and service names
//! - Esc: Clear search
//! - Enter: Action menu for the selected process
//! - k: End selected process (with confirmation)
//! - [: Slow down sampling
//! - ]: Speed up sampling
//! - ↑/↓: Navigate list
//! - PgUp/PgDown: Scroll by page
//! - Home/End: Jump to start/end

mod app;
mod constants;
#[cfg(windows)]
mod ffi;
mod system;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::{App, Args, Config, KeyAction, OverlayState};
use system::OsControl;
use ui::render;

/// Puts the terminal into dashboard mode and restores it on drop,
/// including when the loop exits with an error.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, DisableLineWrap, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, EnableLineWrap, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Sends log output to a file; the terminal belongs to the dashboard.
fn init_logging(config: &Config) -> anyhow::Result<WorkerGuard> {
    let path = config.log_file.as_path();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file path {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level '{}'", config.log_level))?,
    };

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("failed to install log subscriber")?;

    Ok(guard)
}

/// Frame loop: sample when due, draw, wait up to one frame for a key.
fn run(app: &mut App, frame: Duration) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    let _terminal = TerminalGuard::enter().context("failed to set up terminal")?;

    loop {
        app.tick(Instant::now());
        render(&mut stdout, app).context("render failed")?;

        if event::poll(frame)? {
            if let Event::Key(key_event) = event::read()? {
                // Only handle key PRESS events, ignore Release and Repeat
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }

                app.status_message = None;

                if app.handle_key(key_event.code, key_event.modifiers) == KeyAction::Exit {
                    return Ok(());
                }
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::resolve(Args::parse()).context("invalid configuration")?;
    let _log_guard = init_logging(&config)?;

    info!(
        interval_ms = config.interval_ms,
        history = config.history_capacity,
        frame_ms = config.frame_ms,
        "starting"
    );

    let source = system::init_host_source().context("failed to initialize sample source")?;
    let overlay = OverlayState::new(config.overlay(), source, OsControl::new());
    let mut app = App::new(overlay);

    let result = run(&mut app, config.frame_interval());
    if let Err(ref e) = result {
        error!(error = %e, "ui loop ended with error");
    }

    let App { overlay, .. } = app;
    overlay.shutdown();
    result
}
