//! Action targets and what each of them supports

use crate::system::{ActionError, ActionResult, ProcessControl};

/// A side-effecting command offered in the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessAction {
    Terminate,
    OpenLocation,
    ShowProperties,
}

impl ProcessAction {
    pub const ALL: [ProcessAction; 3] = [
        ProcessAction::Terminate,
        ProcessAction::OpenLocation,
        ProcessAction::ShowProperties,
    ];

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            ProcessAction::Terminate => "End task",
            ProcessAction::OpenLocation => "Open file location",
            ProcessAction::ShowProperties => "Properties",
        }
    }

    /// Name used in log lines and error messages
    pub fn name(&self) -> &'static str {
        match self {
            ProcessAction::Terminate => "terminate",
            ProcessAction::OpenLocation => "open location",
            ProcessAction::ShowProperties => "show properties",
        }
    }

    /// Single-key shortcut inside the action menu
    pub fn hotkey(&self) -> char {
        match self {
            ProcessAction::Terminate => 'e',
            ProcessAction::OpenLocation => 'o',
            ProcessAction::ShowProperties => 'p',
        }
    }

    fn bit(&self) -> u8 {
        match self {
            ProcessAction::Terminate => 0b001,
            ProcessAction::OpenLocation => 0b010,
            ProcessAction::ShowProperties => 0b100,
        }
    }
}

/// Set of actions a target supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);

    pub fn all() -> Self {
        ProcessAction::ALL.iter().fold(Self::NONE, |caps, a| caps.with(*a))
    }

    pub fn with(self, action: ProcessAction) -> Self {
        Capabilities(self.0 | action.bit())
    }

    pub fn contains(&self, action: ProcessAction) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Supported actions in menu order.
    pub fn actions(&self) -> Vec<ProcessAction> {
        ProcessAction::ALL
            .iter()
            .copied()
            .filter(|a| self.contains(*a))
            .collect()
    }
}

/// What an action is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    Process { pid: u32, name: String },
    /// Services carry no actions; they are listed for inspection only.
    Service { name: String },
}

impl ActionTarget {
    pub fn capabilities(&self) -> Capabilities {
        match self {
            ActionTarget::Process { .. } => Capabilities::all(),
            ActionTarget::Service { .. } => Capabilities::NONE,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ActionTarget::Process { pid, name } => format!("{} (PID {})", name, pid),
            ActionTarget::Service { name } => format!("service '{}'", name),
        }
    }

    /// Checks the capability set, then runs the command through `control`.
    pub fn run<C: ProcessControl>(&self, action: ProcessAction, control: &mut C) -> ActionResult<()> {
        if !self.capabilities().contains(action) {
            return Err(ActionError::Unsupported {
                action: action.name(),
                target: self.describe(),
            });
        }

        match self {
            ActionTarget::Process { pid, .. } => match action {
                ProcessAction::Terminate => control.terminate(*pid),
                ProcessAction::OpenLocation => control.open_location(*pid),
                ProcessAction::ShowProperties => control.show_properties(*pid),
            },
            ActionTarget::Service { .. } => Err(ActionError::Unsupported {
                action: action.name(),
                target: self.describe(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingControl {
        calls: Vec<(&'static str, u32)>,
    }

    impl ProcessControl for RecordingControl {
        fn terminate(&mut self, pid: u32) -> ActionResult<()> {
            self.calls.push(("terminate", pid));
            Ok(())
        }

        fn open_location(&mut self, pid: u32) -> ActionResult<()> {
            self.calls.push(("open_location", pid));
            Ok(())
        }

        fn show_properties(&mut self, pid: u32) -> ActionResult<()> {
            self.calls.push(("show_properties", pid));
            Ok(())
        }
    }

    #[test]
    fn test_process_supports_every_action() {
        let target = ActionTarget::Process {
            pid: 42,
            name: "notepad".into(),
        };
        assert_eq!(target.capabilities().actions(), ProcessAction::ALL.to_vec());
    }

    #[test]
    fn test_service_has_no_actions() {
        let target = ActionTarget::Service {
            name: "Spooler".into(),
        };
        assert!(target.capabilities().is_empty());

        let mut control = RecordingControl::default();
        let err = target.run(ProcessAction::Terminate, &mut control).unwrap_err();
        assert_eq!(
            err,
            ActionError::Unsupported {
                action: "terminate",
                target: "service 'Spooler'".into()
            }
        );
        assert!(control.calls.is_empty());
    }

    #[test]
    fn test_run_dispatches_to_control() {
        let target = ActionTarget::Process {
            pid: 7,
            name: "x".into(),
        };
        let mut control = RecordingControl::default();
        for action in ProcessAction::ALL {
            target.run(action, &mut control).unwrap();
        }
        assert_eq!(
            control.calls,
            vec![("terminate", 7), ("open_location", 7), ("show_properties", 7)]
        );
    }

    #[test]
    fn test_capability_set_ops() {
        let caps = Capabilities::NONE.with(ProcessAction::OpenLocation);
        assert!(caps.contains(ProcessAction::OpenLocation));
        assert!(!caps.contains(ProcessAction::Terminate));
        assert_eq!(caps.actions(), vec![ProcessAction::OpenLocation]);
    }
}
