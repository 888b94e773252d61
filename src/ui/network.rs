//! Network tab: per-interface cumulative counters

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::system::{format_bytes, NetworkInterfaceSnapshot, OperStatus};

use super::utils::{fit, truncate_string};

pub const NETWORK_HEADER: &str = " Interface                       Type      Status      Sent        Received";

/// Renders the visible window of the interface table.
pub fn render_network<W: Write>(
    out: &mut W,
    interfaces: &[NetworkInterfaceSnapshot],
    selected_index: usize,
    scroll_offset: usize,
    visible_rows: usize,
    width: usize,
) -> io::Result<()> {
    let mut drawn = 0;
    for (i, iface) in interfaces
        .iter()
        .skip(scroll_offset)
        .take(visible_rows)
        .enumerate()
    {
        let row = format!(
            " {:<30}  {:<8}  {:<10}  {:>10}  {:>10}",
            truncate_string(&iface.name, 30),
            iface.kind.name(),
            iface.status.name(),
            format_bytes(iface.bytes_sent),
            format_bytes(iface.bytes_received),
        );
        let fg = if iface.status == OperStatus::Up {
            Color::Green
        } else {
            Color::DarkGrey
        };

        if scroll_offset + i == selected_index {
            execute!(
                out,
                SetBackgroundColor(Color::DarkCyan),
                SetForegroundColor(Color::White),
                Print(fit(&row, width)),
                ResetColor,
                Print("\r\n")
            )?;
        } else {
            execute!(
                out,
                SetForegroundColor(fg),
                Print(fit(&row, width)),
                ResetColor,
                Print("\r\n")
            )?;
        }
        drawn += 1;
    }

    if interfaces.is_empty() && visible_rows > 0 {
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(fit(" No active interfaces", width)),
            ResetColor,
            Print("\r\n")
        )?;
        drawn += 1;
    }

    for _ in drawn..visible_rows {
        execute!(out, Print(format!("{:width$}\r\n", "", width = width)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::InterfaceKind;

    #[test]
    fn test_interface_row() {
        let iface = NetworkInterfaceSnapshot {
            name: "Ethernet".into(),
            kind: InterfaceKind::Ethernet,
            status: OperStatus::Up,
            bytes_sent: 1536,
            bytes_received: 500,
        };
        let mut out = Vec::new();
        render_network(&mut out, &[iface], 0, 0, 3, 90).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Ethernet"));
        assert!(text.contains("1.5KB"));
        assert!(text.contains("500.0B"));
        assert_eq!(text.matches("\r\n").count(), 3);
    }

    #[test]
    fn test_empty_table_message() {
        let mut out = Vec::new();
        render_network(&mut out, &[], 0, 0, 2, 40).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("No active interfaces"));
    }
}
