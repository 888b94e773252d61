//! Process enumeration using the ToolHelp32 API
//!
//! Walks a process snapshot with Process32FirstW/Process32NextW and
//! attaches the working set of each process.

use std::mem;
use windows::Win32::System::Diagnostics::ToolHelp::{
    Process32FirstW, Process32NextW, PROCESSENTRY32W,
};

use crate::ffi::KernelHandle;

use super::error::{Metric, SourceError, SourceResult};
use super::memory::get_process_working_set;
use super::source::ProcessRaw;

/// Converts a null-terminated wide string (u16 slice) to a Rust String
pub(crate) fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Enumerates all running processes on the system.
///
/// Processes that exit mid-walk are simply missing; processes whose memory
/// cannot be queried report a working set of 0.
pub fn enumerate_processes() -> SourceResult<Vec<ProcessRaw>> {
    let snapshot = KernelHandle::process_snapshot()
        .map_err(|e| SourceError::from_win(Metric::Processes, "CreateToolhelp32Snapshot", &e))?;
    let mut processes = Vec::new();

    // dwSize must be set before the first call
    let mut entry = PROCESSENTRY32W {
        dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: valid snapshot handle and properly initialized entry.
    let mut success = unsafe { Process32FirstW(snapshot.as_raw(), &mut entry) };

    while success.is_ok() {
        let pid = entry.th32ProcessID;
        processes.push(ProcessRaw {
            pid,
            name: strip_exe_suffix(&wide_to_string(&entry.szExeFile)),
            working_set_bytes: get_process_working_set(pid),
        });

        // SAFETY: Same as above.
        success = unsafe { Process32NextW(snapshot.as_raw(), &mut entry) };
    }

    Ok(processes)
}

/// Drops a trailing ".exe" so names read like "notepad" rather than "notepad.exe".
fn strip_exe_suffix(name: &str) -> String {
    match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".exe") => {
            name[..cut].to_string()
        }
        _ => name.to_string(),
    }
}
