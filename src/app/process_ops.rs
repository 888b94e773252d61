//! Process actions from the UI: kill confirmation and the action menu

use super::actions::{ActionTarget, ProcessAction};
use super::state::App;
use super::view_mode::ViewMode;
use crate::system::{ProcessControl, SampleSource};

impl<S: SampleSource, C: ProcessControl> App<S, C> {
    /// Asks for confirmation before terminating the selected process
    pub fn request_kill(&mut self) {
        let Some(target) = self.selected_target() else {
            return;
        };
        if !target.capabilities().contains(ProcessAction::Terminate) {
            self.status_message = Some(format!("No actions available for {}", target.describe()));
            return;
        }

        self.status_message = Some(format!(
            "End {}? Press Y to confirm, N to cancel",
            target.describe()
        ));
        self.pending_target = Some(target);
        self.view_mode = ViewMode::ConfirmKill;
    }

    /// Terminates the pending target and reports the outcome
    pub fn confirm_kill(&mut self) {
        if let Some(target) = self.pending_target.clone() {
            self.run_action(ProcessAction::Terminate, &target);
        }
        self.close_pending();
    }

    /// Drops the pending target and returns to browsing
    pub fn close_pending(&mut self) {
        self.view_mode = ViewMode::Normal;
        self.pending_target = None;
        self.menu_index = 0;
    }

    /// Opens the action menu for the selected row
    pub fn open_action_menu(&mut self) {
        let Some(target) = self.selected_target() else {
            return;
        };
        if target.capabilities().is_empty() {
            self.status_message = Some(format!("No actions available for {}", target.describe()));
            return;
        }
        self.pending_target = Some(target);
        self.menu_index = 0;
        self.view_mode = ViewMode::ActionMenu;
    }

    /// Actions offered by the open menu, in display order
    pub fn menu_actions(&self) -> Vec<ProcessAction> {
        self.pending_target
            .as_ref()
            .map(|t| t.capabilities().actions())
            .unwrap_or_default()
    }

    pub fn menu_up(&mut self) {
        self.menu_index = self.menu_index.saturating_sub(1);
    }

    pub fn menu_down(&mut self) {
        if self.menu_index + 1 < self.menu_actions().len() {
            self.menu_index += 1;
        }
    }

    /// Runs the highlighted menu entry. Terminate goes through the Y/N dialog.
    pub fn run_menu_selection(&mut self) {
        let Some(action) = self.menu_actions().get(self.menu_index).copied() else {
            self.close_pending();
            return;
        };
        self.run_menu_action(action);
    }

    pub fn run_menu_action(&mut self, action: ProcessAction) {
        let Some(target) = self.pending_target.clone() else {
            self.close_pending();
            return;
        };

        if action == ProcessAction::Terminate {
            self.status_message = Some(format!(
                "End {}? Press Y to confirm, N to cancel",
                target.describe()
            ));
            self.view_mode = ViewMode::ConfirmKill;
            return;
        }

        self.run_action(action, &target);
        self.close_pending();
    }

    fn run_action(&mut self, action: ProcessAction, target: &ActionTarget) {
        self.status_message = Some(match self.overlay.perform(action, target) {
            Ok(()) => match action {
                ProcessAction::Terminate => format!("Ended {}", target.describe()),
                ProcessAction::OpenLocation => format!("Opened file location of {}", target.describe()),
                ProcessAction::ShowProperties => format!("Opened properties of {}", target.describe()),
            },
            Err(e) => format!("Failed to {} {}: {}", action.name(), target.describe(), e),
        });
    }
}
