//! Process actions: terminate, open containing folder, show properties
//!
//! Each action is a single blocking OS call (or a detached helper launch)
//! that returns as soon as the call returns. Nothing here touches sampled
//! state.

use tracing::{debug, info};

use super::error::{ActionError, ActionResult};

/// Side-effecting commands against a process.
pub trait ProcessControl {
    fn terminate(&mut self, pid: u32) -> ActionResult<()>;

    /// Opens the folder containing the process executable, selecting it
    /// where the platform file manager supports that.
    fn open_location(&mut self, pid: u32) -> ActionResult<()>;

    /// Opens the OS file-properties dialog for the process executable.
    fn show_properties(&mut self, pid: u32) -> ActionResult<()>;
}

/// Refuses to terminate the system idle process, the kernel and ourselves.
pub fn check_terminable(pid: u32) -> ActionResult<()> {
    if pid == 0 {
        return Err(ActionError::Refused {
            pid,
            reason: "System Idle",
        });
    }
    if cfg!(windows) && pid == 4 {
        return Err(ActionError::Refused {
            pid,
            reason: "System",
        });
    }
    if cfg!(not(windows)) && pid == 1 {
        return Err(ActionError::Refused {
            pid,
            reason: "init",
        });
    }
    if pid == std::process::id() {
        return Err(ActionError::Refused {
            pid,
            reason: "this overlay",
        });
    }
    Ok(())
}

/// Runs actions against the real OS.
#[derive(Debug, Default)]
pub struct OsControl;

impl OsControl {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl ProcessControl for OsControl {
    fn terminate(&mut self, pid: u32) -> ActionResult<()> {
        use windows::Win32::System::Threading::{TerminateProcess, PROCESS_TERMINATE};

        use crate::ffi::KernelHandle;

        check_terminable(pid)?;

        let handle = KernelHandle::open_process(pid, PROCESS_TERMINATE).map_err(|e| map_open_error(pid, &e))?;

        // SAFETY: valid handle with PROCESS_TERMINATE access.
        unsafe { TerminateProcess(handle.as_raw(), 1) }.map_err(|e| ActionError::Os {
            api: "TerminateProcess",
            code: e.code().0,
        })?;

        info!(pid, "terminated process");
        Ok(())
    }

    fn open_location(&mut self, pid: u32) -> ActionResult<()> {
        use std::os::windows::process::CommandExt;
        use std::process::Command;

        let path = super::path::get_process_path(pid).ok_or(ActionError::PathUnavailable { pid })?;

        Command::new("explorer.exe")
            .raw_arg(format!("/select,\"{}\"", path.display()))
            .spawn()
            .map_err(|e| ActionError::Launch {
                program: "explorer.exe",
                message: e.to_string(),
            })?;

        debug!(pid, path = %path.display(), "opened file location");
        Ok(())
    }

    fn show_properties(&mut self, pid: u32) -> ActionResult<()> {
        use windows::core::{w, PCWSTR};
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;

        let path = super::path::get_process_path(pid).ok_or(ActionError::PathUnavailable { pid })?;
        let wide: Vec<u16> = path
            .to_string_lossy()
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: `wide` is null-terminated and outlives the call.
        let result = unsafe {
            ShellExecuteW(
                HWND::default(),
                w!("properties"),
                PCWSTR(wide.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };

        // Values above 32 mean success
        let code = result.0 as isize;
        if code <= 32 {
            return Err(ActionError::Os {
                api: "ShellExecuteW",
                code: code as i32,
            });
        }

        debug!(pid, path = %path.display(), "opened properties dialog");
        Ok(())
    }
}

#[cfg(windows)]
fn map_open_error(pid: u32, err: &windows::core::Error) -> ActionError {
    use windows::Win32::Foundation::{E_ACCESSDENIED, E_INVALIDARG};

    match err.code() {
        code if code == E_ACCESSDENIED => ActionError::AccessDenied,
        code if code == E_INVALIDARG => ActionError::NotFound { pid },
        code => ActionError::Os {
            api: "OpenProcess",
            code: code.0,
        },
    }
}

#[cfg(not(windows))]
impl ProcessControl for OsControl {
    fn terminate(&mut self, pid: u32) -> ActionResult<()> {
        check_terminable(pid)?;

        let sys = refreshed_system(pid);
        let process = sys
            .process(sysinfo::Pid::from_u32(pid))
            .ok_or(ActionError::NotFound { pid })?;

        if !process.kill() {
            return Err(ActionError::AccessDenied);
        }

        info!(pid, "terminated process");
        Ok(())
    }

    fn open_location(&mut self, pid: u32) -> ActionResult<()> {
        use std::process::Command;

        let sys = refreshed_system(pid);
        let folder = sys
            .process(sysinfo::Pid::from_u32(pid))
            .ok_or(ActionError::NotFound { pid })?
            .exe()
            .and_then(|exe| exe.parent())
            .map(|dir| dir.to_path_buf())
            .ok_or(ActionError::PathUnavailable { pid })?;

        let program = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
        Command::new(program)
            .arg(&folder)
            .spawn()
            .map_err(|e| ActionError::Launch {
                program,
                message: e.to_string(),
            })?;

        debug!(pid, folder = %folder.display(), "opened file location");
        Ok(())
    }

    fn show_properties(&mut self, _pid: u32) -> ActionResult<()> {
        Err(ActionError::Unsupported {
            action: "show properties",
            target: "this platform".to_string(),
        })
    }
}

#[cfg(not(windows))]
fn refreshed_system(pid: u32) -> sysinfo::System {
    let mut sys = sysinfo::System::new();
    sys.refresh_processes(
        sysinfo::ProcessesToUpdate::Some(&[sysinfo::Pid::from_u32(pid)]),
        true,
    );
    sys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refuses_idle_process() {
        assert_eq!(
            check_terminable(0),
            Err(ActionError::Refused {
                pid: 0,
                reason: "System Idle"
            })
        );
    }

    #[test]
    fn test_refuses_self() {
        let pid = std::process::id();
        assert!(matches!(
            check_terminable(pid),
            Err(ActionError::Refused { reason: "this overlay", .. })
        ));
    }

    #[test]
    fn test_terminate_self_is_refused_before_any_os_call() {
        let mut control = OsControl::new();
        assert!(control.terminate(std::process::id()).is_err());
    }

    #[test]
    fn test_ordinary_pid_is_terminable() {
        assert_eq!(check_terminable(123_456), Ok(()));
    }
}
