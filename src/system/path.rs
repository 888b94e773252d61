//! Executable path of a running process

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;

use windows::core::PWSTR;
use windows::Win32::Foundation::MAX_PATH;
use windows::Win32::System::Threading::{
    QueryFullProcessImageNameW, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
};

use crate::ffi::KernelHandle;

/// Full Win32 path of the process image, or None when the process is gone
/// or protected.
pub fn get_process_path(pid: u32) -> Option<PathBuf> {
    let handle = KernelHandle::open_process(pid, PROCESS_QUERY_LIMITED_INFORMATION).ok()?;

    let mut buffer = vec![0u16; MAX_PATH as usize * 2];
    let mut len = buffer.len() as u32;

    // SAFETY: `len` holds the buffer capacity in wide chars and is updated
    // to the written length on success.
    unsafe {
        QueryFullProcessImageNameW(
            handle.as_raw(),
            PROCESS_NAME_WIN32,
            PWSTR(buffer.as_mut_ptr()),
            &mut len,
        )
    }
    .ok()?;

    buffer.truncate(len as usize);
    (!buffer.is_empty()).then(|| PathBuf::from(OsString::from_wide(&buffer)))
}
