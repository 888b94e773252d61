//! Scrollable tables for the Processes and Services tabs

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::{ProcessRecord, ServiceRecord};
use crate::system::ServiceStatus;

use super::utils::{fit, format_mb, truncate_string};

pub const PROCESS_HEADER: &str = " PID      Memory        Type         Name";
pub const SERVICE_HEADER: &str = " Status            Name                      Display Name";

/// Writes one row, highlighted when selected.
fn render_row<W: Write>(
    out: &mut W,
    text: &str,
    accent: Color,
    is_selected: bool,
    width: usize,
) -> io::Result<()> {
    if is_selected {
        execute!(
            out,
            SetBackgroundColor(Color::DarkCyan),
            SetForegroundColor(Color::White),
            Print(fit(text, width)),
            ResetColor,
            Print("\r\n")
        )
    } else {
        execute!(
            out,
            SetForegroundColor(accent),
            Print(fit(text, width)),
            ResetColor,
            Print("\r\n")
        )
    }
}

/// Pads the remaining table area with blank lines.
fn fill_blank<W: Write>(out: &mut W, drawn: usize, visible_rows: usize, width: usize) -> io::Result<()> {
    for _ in drawn..visible_rows {
        execute!(out, Print(format!("{:width$}\r\n", "", width = width)))?;
    }
    Ok(())
}

/// Renders the visible window of the process table.
pub fn render_process_list<W: Write>(
    out: &mut W,
    processes: &[ProcessRecord],
    selected_index: usize,
    scroll_offset: usize,
    visible_rows: usize,
    width: usize,
) -> io::Result<()> {
    let name_space = width.saturating_sub(40);
    let mut drawn = 0;
    for (i, entry) in processes
        .iter()
        .skip(scroll_offset)
        .take(visible_rows)
        .enumerate()
    {
        let row = format!(
            " {:>7}  {:>12}  {:<11}  {}",
            entry.pid,
            format_mb(entry.working_set_bytes),
            entry.kind_label(),
            truncate_string(&entry.name, name_space)
        );
        let accent = if entry.is_service {
            Color::Cyan
        } else {
            Color::Reset
        };
        render_row(out, &row, accent, scroll_offset + i == selected_index, width)?;
        drawn += 1;
    }
    fill_blank(out, drawn, visible_rows, width)
}

fn status_color(status: ServiceStatus) -> Color {
    match status {
        ServiceStatus::Running => Color::Green,
        ServiceStatus::Stopped => Color::DarkGrey,
        ServiceStatus::Paused => Color::Yellow,
        _ => Color::Cyan,
    }
}

/// Renders the visible window of the service table.
pub fn render_service_list<W: Write>(
    out: &mut W,
    services: &[ServiceRecord],
    selected_index: usize,
    scroll_offset: usize,
    visible_rows: usize,
    width: usize,
) -> io::Result<()> {
    let display_space = width.saturating_sub(46);
    let mut drawn = 0;
    for (i, entry) in services
        .iter()
        .skip(scroll_offset)
        .take(visible_rows)
        .enumerate()
    {
        let row = format!(
            " {:<16}  {:<24}  {}",
            entry.status.name(),
            truncate_string(&entry.name, 24),
            truncate_string(&entry.display_name, display_space)
        );
        render_row(
            out,
            &row,
            status_color(entry.status),
            scroll_offset + i == selected_index,
            width,
        )?;
        drawn += 1;
    }
    fill_blank(out, drawn, visible_rows, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, name: &str, is_service: bool) -> ProcessRecord {
        ProcessRecord {
            pid,
            name: name.to_string(),
            working_set_bytes: 13_107_200,
            is_service,
        }
    }

    #[test]
    fn test_process_rows_show_mb_and_type() {
        let rows = vec![record(4242, "svchost", true), record(7, "notepad", false)];
        let mut out = Vec::new();
        render_process_list(&mut out, &rows, 0, 0, 5, 80).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("4242"));
        assert!(text.contains("12.50 MB"));
        assert!(text.contains("Service"));
        assert!(text.contains("Application"));
        assert_eq!(text.matches("\r\n").count(), 5);
    }

    #[test]
    fn test_scroll_offset_skips_rows() {
        let rows = vec![record(1, "first", false), record(2, "second", false)];
        let mut out = Vec::new();
        render_process_list(&mut out, &rows, 1, 1, 1, 80).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(!text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    fn test_service_rows() {
        let rows = vec![ServiceRecord {
            name: "Spooler".into(),
            display_name: "Print Spooler".into(),
            status: ServiceStatus::Running,
        }];
        let mut out = Vec::new();
        render_service_list(&mut out, &rows, 0, 0, 2, 80).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Running"));
        assert!(text.contains("Print Spooler"));
    }
}
