//! Keyboard event handling
//!
//! One handler per input mode:
//! - Normal mode (tab browsing and navigation)
//! - Search mode (editing the search term)
//! - Action menu (choosing a process action)
//! - Confirm kill mode (Y/N confirmation)

use crossterm::event::{KeyCode, KeyModifiers};

use super::actions::ProcessAction;
use super::state::App;
use super::view_mode::{Tab, ViewMode};
use crate::system::{ProcessControl, SampleSource};

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue running the application
    Continue,
    /// Exit the application
    Exit,
}

impl<S: SampleSource, C: ProcessControl> App<S, C> {
    /// Routes a key press to the handler for the current mode.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return KeyAction::Exit;
        }

        match self.view_mode {
            ViewMode::ConfirmKill => self.handle_confirm_kill_key(code),
            ViewMode::ActionMenu => self.handle_action_menu_key(code),
            ViewMode::SearchInput => self.handle_search_key(code),
            ViewMode::Normal => self.handle_normal_key(code),
        }
    }

    /// Handles key events in confirm kill mode
    pub fn handle_confirm_kill_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_kill(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.status_message = None;
                self.close_pending();
            }
            _ => {}
        }
        KeyAction::Continue
    }

    /// Handles key events while the action menu is open
    pub fn handle_action_menu_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.close_pending(),
            KeyCode::Up => self.menu_up(),
            KeyCode::Down => self.menu_down(),
            KeyCode::Enter => self.run_menu_selection(),
            KeyCode::Char(c) => {
                let hotkey = c.to_ascii_lowercase();
                if let Some(action) = self
                    .menu_actions()
                    .into_iter()
                    .find(|a: &ProcessAction| a.hotkey() == hotkey)
                {
                    self.run_menu_action(action);
                }
            }
            _ => {}
        }
        KeyAction::Continue
    }

    /// Handles key events in search mode. Every edit refilters immediately.
    pub fn handle_search_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Esc => {
                self.clear_search();
                self.view_mode = ViewMode::Normal;
            }
            KeyCode::Enter => {
                self.view_mode = ViewMode::Normal;
            }
            KeyCode::Backspace => self.pop_search_char(),
            KeyCode::Char(c) => self.push_search_char(c),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            _ => {}
        }
        KeyAction::Continue
    }

    /// Handles key events in normal mode.
    /// Returns `KeyAction::Exit` if the application should quit.
    pub fn handle_normal_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return KeyAction::Exit,
            KeyCode::Tab => self.select_tab(self.tab.next()),
            KeyCode::BackTab => self.select_tab(self.tab.prev()),
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_digit(c) {
                    self.select_tab(tab);
                }
            }
            KeyCode::Char('/') => self.start_search(),
            KeyCode::Char('k') | KeyCode::Char('K') => self.request_kill(),
            KeyCode::Char('[') => self.slow_down_sampling(),
            KeyCode::Char(']') => self.speed_up_sampling(),
            KeyCode::Esc => self.clear_search(),
            KeyCode::Enter => self.open_action_menu(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.jump_to_start(),
            KeyCode::End => self.jump_to_end(),
            _ => {}
        }
        KeyAction::Continue
    }
}
