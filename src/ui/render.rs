//! Terminal rendering entry point

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    style::Print,
    terminal::{self, Clear, ClearType},
};

use crate::app::{App, Tab};
use crate::constants::VISIBLE_ROWS_OVERHEAD;
use crate::system::{ProcessControl, SampleSource};

use super::components::{
    render_column_headers, render_footer, render_header, render_search_bar, render_tabs,
};
use super::menu::render_action_menu;
use super::network::{render_network, NETWORK_HEADER};
use super::performance::render_performance;
use super::process_list::{
    render_process_list, render_service_list, PROCESS_HEADER, SERVICE_HEADER,
};

/// Renders the UI to the terminal
pub fn render<W, S, C>(out: &mut W, app: &mut App<S, C>) -> io::Result<()>
where
    W: Write,
    S: SampleSource,
    C: ProcessControl,
{
    let (width, height) = terminal::size()?;
    draw(out, app, width as usize, height as usize)
}

/// Draws one full frame at the given terminal size.
pub fn draw<W, S, C>(out: &mut W, app: &mut App<S, C>, width: usize, height: usize) -> io::Result<()>
where
    W: Write,
    S: SampleSource,
    C: ProcessControl,
{
    execute!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    // === HEADER ===
    render_header(out, app, width)?;
    render_tabs(out, app.tab, width)?;
    render_search_bar(out, app, width)?;

    // === BODY ===
    let visible_rows = height.saturating_sub(VISIBLE_ROWS_OVERHEAD);
    app.visible_rows = visible_rows;
    app.adjust_scroll();

    match app.tab {
        Tab::Performance => {
            let used = render_performance(
                out,
                app.overlay.cpu_history(),
                app.overlay.ram_history(),
                width,
            )?;
            // Column header line is unused on this tab
            for _ in used..visible_rows + 1 {
                execute!(out, Print("\r\n"))?;
            }
        }
        Tab::Processes => {
            render_column_headers(out, PROCESS_HEADER, width)?;
            render_process_list(
                out,
                &app.overlay.filtered().processes,
                app.selected_index,
                app.scroll_offset,
                visible_rows,
                width,
            )?;
        }
        Tab::Services => {
            render_column_headers(out, SERVICE_HEADER, width)?;
            render_service_list(
                out,
                &app.overlay.filtered().services,
                app.selected_index,
                app.scroll_offset,
                visible_rows,
                width,
            )?;
        }
        Tab::Network => {
            render_column_headers(out, NETWORK_HEADER, width)?;
            render_network(
                out,
                app.overlay.interfaces(),
                app.selected_index,
                app.scroll_offset,
                visible_rows,
                width,
            )?;
        }
    }

    // === FOOTER ===
    render_footer(out, app, width)?;

    if app.view_mode.is_action_menu() {
        if let Some(target) = &app.pending_target {
            render_action_menu(
                out,
                target,
                &app.menu_actions(),
                app.menu_index,
                width,
                height,
            )?;
        }
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{sampled_app, FakeControl, FakeSource};

    fn frame(app: &mut App<FakeSource, FakeControl>) -> String {
        let mut out = Vec::new();
        draw(&mut out, app, 100, 30).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn test_each_tab_draws() {
        let mut app = sampled_app(FakeControl::default());
        assert!(frame(&mut app).contains("CPU"));

        app.select_tab(Tab::Processes);
        let text = frame(&mut app);
        assert!(text.contains("svchost"));
        assert_eq!(app.visible_rows, 30 - VISIBLE_ROWS_OVERHEAD);

        app.select_tab(Tab::Services);
        assert!(frame(&mut app).contains("Print Spooler"));

        app.select_tab(Tab::Network);
        let text = frame(&mut app);
        assert!(text.contains("Ethernet"));
        assert!(!text.contains("Loopback Pseudo"));
    }

    #[test]
    fn test_action_menu_overlay() {
        let mut app = sampled_app(FakeControl::default());
        app.select_tab(Tab::Processes);
        app.open_action_menu();
        assert!(frame(&mut app).contains("Open file location"));
    }
}
