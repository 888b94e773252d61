//! Performance tab: current CPU/RAM readings and their history graphs

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::app::RollingHistory;

use super::components::render_percent;
use super::utils::{clamp_percent, sparkline, usage_color};

/// Draws one metric: label, latest value, and a sparkline of the history.
fn render_metric<W: Write>(
    out: &mut W,
    label: &str,
    history: &RollingHistory,
    width: usize,
) -> io::Result<usize> {
    let latest = history.last().unwrap_or(0.0);
    render_percent(out, label, latest)?;
    execute!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(format!(
            "   {} of {} samples\r\n",
            history.len(),
            history.capacity()
        )),
        ResetColor
    )?;

    if history.is_empty() {
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(" waiting for first sample\r\n\r\n"),
            ResetColor
        )?;
        return Ok(4);
    }

    // Only the graph is clamped; the reading above is shown as sampled
    let graph_width = width.saturating_sub(2);
    execute!(
        out,
        Print(" "),
        SetForegroundColor(usage_color(clamp_percent(latest))),
        Print(sparkline(history.values(), graph_width)),
        ResetColor,
        Print("\r\n\r\n")
    )?;
    Ok(4)
}

/// Renders the performance tab and returns the number of lines used.
pub fn render_performance<W: Write>(
    out: &mut W,
    cpu: &RollingHistory,
    ram: &RollingHistory,
    width: usize,
) -> io::Result<usize> {
    execute!(out, Print("\r\n"))?;
    let mut lines = 1;
    lines += render_metric(out, "CPU", cpu, width)?;
    lines += render_metric(out, "RAM", ram, width)?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_latest_and_graph() {
        let mut cpu = RollingHistory::new(4);
        for v in [10.0, 20.0, 150.0] {
            cpu.append(v);
        }
        let ram = RollingHistory::new(4);

        let mut out = Vec::new();
        let lines = render_performance(&mut out, &cpu, &ram, 20).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert_eq!(lines, 9);
        assert!(text.contains("150.0%"));
        assert!(!text.contains("100.0%"));
        assert!(text.contains("3 of 4 samples"));
        assert!(text.contains("0 of 4 samples"));
        assert!(text.contains('█'));
        assert!(text.contains("waiting for first sample"));
    }

    #[test]
    fn test_negative_reading_shown_verbatim() {
        let mut cpu = RollingHistory::new(2);
        cpu.append(-5.0);
        let ram = RollingHistory::new(2);

        let mut out = Vec::new();
        render_performance(&mut out, &cpu, &ram, 20).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("-5.0%"));
    }
}
