//! Header, tab bar, search bar, column headers, and footer components

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::{App, Tab};
use crate::constants::DISPLAY_NAME;
use crate::system::{ProcessControl, SampleSource};

use super::utils::{fit, truncate_string, usage_color};

/// Renders the title bar with the current CPU/RAM reading and interval.
pub fn render_header<W, S, C>(out: &mut W, app: &App<S, C>, width: usize) -> io::Result<()>
where
    W: Write,
    S: SampleSource,
    C: ProcessControl,
{
    let cpu = app.overlay.cpu_history().last().unwrap_or(0.0);
    let ram = app.overlay.ram_history().last().unwrap_or(0.0);
    let title = format!(" {}", DISPLAY_NAME);
    let stats = format!(
        "CPU {:5.1}%  RAM {:5.1}%  every {} ",
        cpu,
        ram,
        app.overlay.sample_interval_label()
    );
    let spacing = width.saturating_sub(title.chars().count() + stats.chars().count());

    execute!(
        out,
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(&title),
        Print(format!("{:spacing$}", "", spacing = spacing)),
        Print(&stats),
        ResetColor,
        Print("\r\n")
    )
}

/// Renders the tab bar, highlighting the active tab.
pub fn render_tabs<W: Write>(out: &mut W, active: Tab, width: usize) -> io::Result<()> {
    let mut used = 0;
    for tab in Tab::ALL {
        let label = format!(" {}:{} ", tab.index() + 1, tab.title());
        used += label.chars().count() + 1;
        if tab == active {
            execute!(
                out,
                SetBackgroundColor(Color::DarkCyan),
                SetForegroundColor(Color::White),
                Print(&label),
                ResetColor,
                Print(" ")
            )?;
        } else {
            execute!(
                out,
                SetForegroundColor(Color::Grey),
                Print(&label),
                ResetColor,
                Print(" ")
            )?;
        }
    }
    execute!(
        out,
        Print(format!("{:w$}\r\n", "", w = width.saturating_sub(used)))
    )
}

/// Renders the search bar: an input field while typing, otherwise the
/// active term, otherwise a blank line.
pub fn render_search_bar<W, S, C>(out: &mut W, app: &App<S, C>, width: usize) -> io::Result<()>
where
    W: Write,
    S: SampleSource,
    C: ProcessControl,
{
    let term = app.overlay.search_term();
    if app.view_mode.is_search_input() {
        execute!(
            out,
            SetBackgroundColor(Color::DarkYellow),
            SetForegroundColor(Color::Black),
            Print(fit(&format!(" Search: {}█", term), width)),
            ResetColor,
            Print("\r\n")
        )
    } else if !term.is_empty() {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(fit(
                &format!(" Search: \"{}\" (press / to edit, Esc to clear)", term),
                width
            )),
            ResetColor,
            Print("\r\n")
        )
    } else {
        execute!(out, Print(format!("{:w$}\r\n", "", w = width)))
    }
}

/// Renders a column header line.
pub fn render_column_headers<W: Write>(out: &mut W, header: &str, width: usize) -> io::Result<()> {
    execute!(
        out,
        SetBackgroundColor(Color::DarkGrey),
        SetForegroundColor(Color::White),
        Print(fit(header, width)),
        ResetColor,
        Print("\r\n")
    )
}

/// Renders a labelled percentage with its usage color.
pub fn render_percent<W: Write>(out: &mut W, label: &str, value: f32) -> io::Result<()> {
    execute!(
        out,
        Print(format!(" {:<5}", label)),
        SetForegroundColor(usage_color(value)),
        Print(format!("{:6.1}%", value)),
        ResetColor
    )
}

/// Renders the footer: status or confirmation line, then the key hints.
pub fn render_footer<W, S, C>(out: &mut W, app: &App<S, C>, width: usize) -> io::Result<()>
where
    W: Write,
    S: SampleSource,
    C: ProcessControl,
{
    if app.view_mode.is_confirm_kill() {
        let prompt = app
            .pending_target
            .as_ref()
            .map(|t| format!(" End {}? [Y/N]", t.describe()))
            .unwrap_or_default();
        execute!(
            out,
            SetBackgroundColor(Color::DarkRed),
            SetForegroundColor(Color::White),
            Print(fit(&prompt, width)),
            ResetColor,
            Print("\r\n")
        )?;
    } else if let Some(ref msg) = app.status_message {
        execute!(
            out,
            SetForegroundColor(Color::Yellow),
            Print(fit(&format!(" {}", msg), width)),
            ResetColor,
            Print("\r\n")
        )?;
    } else {
        let counts = format!(
            " Processes: {}/{}  Services: {}/{}",
            app.overlay.filtered().processes.len(),
            app.overlay.snapshot().processes.len(),
            app.overlay.filtered().services.len(),
            app.overlay.snapshot().services.len(),
        );
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(fit(&counts, width)),
            ResetColor,
            Print("\r\n")
        )?;
    }

    let (help_line, bg, fg) = if app.view_mode.is_confirm_kill() {
        (" Y:Confirm | N/Esc:Cancel", Color::DarkRed, Color::White)
    } else if app.view_mode.is_search_input() {
        (" Type to search | Enter:Keep | Esc:Clear", Color::DarkYellow, Color::Black)
    } else if app.view_mode.is_action_menu() {
        (" Up/Down:Choose | Enter:Run | Esc:Close", Color::DarkBlue, Color::White)
    } else {
        (
            " q:Quit | Tab/1-4:Tabs | /:Search | Enter:Actions | k:End task | [/]:Interval",
            Color::DarkBlue,
            Color::White,
        )
    };
    execute!(
        out,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(fit(&truncate_string(help_line, width), width)),
        ResetColor,
    )
}
