//! Owned Win32 handles, closed on drop

use windows::core::{Result, PCWSTR};
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Diagnostics::ToolHelp::{CreateToolhelp32Snapshot, TH32CS_SNAPPROCESS};
use windows::Win32::System::Services::{CloseServiceHandle, OpenSCManagerW, SC_HANDLE};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_ACCESS_RIGHTS};

/// A kernel object HANDLE (process or ToolHelp snapshot) closed with
/// `CloseHandle` when dropped.
pub struct KernelHandle(HANDLE);

impl KernelHandle {
    /// Opens a process by PID with the specified access rights.
    ///
    /// Fails with access denied for protected processes and with invalid
    /// parameter once the process has exited.
    pub fn open_process(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> Result<Self> {
        // SAFETY: no pointers are passed; failure is reported through Result.
        let handle = unsafe { OpenProcess(access, false, pid)? };
        Ok(Self(handle))
    }

    /// Takes a snapshot of every process in the system.
    pub fn process_snapshot() -> Result<Self> {
        // SAFETY: the process id argument is ignored for TH32CS_SNAPPROCESS.
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0)? };
        Ok(Self(handle))
    }

    pub fn as_raw(&self) -> HANDLE {
        self.0
    }
}

impl Drop for KernelHandle {
    fn drop(&mut self) {
        // SAFETY: the handle is owned and closed exactly once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// A connection to the local Service Control Manager.
///
/// Held by the sample source for its whole lifetime and released on drop.
pub struct ScmHandle(SC_HANDLE);

impl ScmHandle {
    /// Connects to the local SCM with the given access rights.
    pub fn connect(access: u32) -> Result<Self> {
        // SAFETY: null machine and database names select the local active database.
        let handle = unsafe { OpenSCManagerW(PCWSTR::null(), PCWSTR::null(), access)? };
        Ok(Self(handle))
    }

    pub fn as_raw(&self) -> SC_HANDLE {
        self.0
    }
}

impl Drop for ScmHandle {
    fn drop(&mut self) {
        // SAFETY: the SC_HANDLE is owned and closed exactly once.
        unsafe {
            let _ = CloseServiceHandle(self.0);
        }
    }
}
