//! Action menu dialog drawn over the current tab

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::app::{ActionTarget, ProcessAction};

use super::utils::fit;

const BOX_WIDTH: usize = 44;

/// Renders a centered box listing `actions` for `target`.
pub fn render_action_menu<W: Write>(
    out: &mut W,
    target: &ActionTarget,
    actions: &[ProcessAction],
    menu_index: usize,
    width: usize,
    height: usize,
) -> io::Result<()> {
    let box_width = BOX_WIDTH.min(width);
    let inner_width = box_width.saturating_sub(2);
    let box_height = actions.len() + 4;
    let start_x = width.saturating_sub(box_width) / 2;
    let start_y = height.saturating_sub(box_height) / 2;

    let draw_line = |out: &mut W, y: usize, content: &str, bg: Color, fg: Color| -> io::Result<()> {
        execute!(
            out,
            MoveTo(start_x as u16, y as u16),
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Color::White),
            Print("│"),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(fit(content, inner_width)),
            SetBackgroundColor(Color::DarkBlue),
            SetForegroundColor(Color::White),
            Print("│"),
            ResetColor
        )
    };

    execute!(
        out,
        MoveTo(start_x as u16, start_y as u16),
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(format!("┌{}┐", "─".repeat(inner_width))),
        ResetColor
    )?;

    draw_line(
        out,
        start_y + 1,
        &format!(" {}", target.describe()),
        Color::DarkBlue,
        Color::Yellow,
    )?;

    for (i, action) in actions.iter().enumerate() {
        let label = format!("  [{}] {}", action.hotkey(), action.label());
        let (bg, fg) = if i == menu_index {
            (Color::DarkCyan, Color::White)
        } else {
            (Color::DarkBlue, Color::White)
        };
        draw_line(out, start_y + 2 + i, &label, bg, fg)?;
    }

    draw_line(
        out,
        start_y + 2 + actions.len(),
        " Enter:Run  Esc:Close",
        Color::DarkBlue,
        Color::DarkGrey,
    )?;

    execute!(
        out,
        MoveTo(start_x as u16, (start_y + 3 + actions.len()) as u16),
        SetBackgroundColor(Color::DarkBlue),
        SetForegroundColor(Color::White),
        Print(format!("└{}┘", "─".repeat(inner_width))),
        ResetColor
    )
}
