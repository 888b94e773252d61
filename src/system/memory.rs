//! Memory usage calculation and formatting
//!
//! The percentage formula is shared by every sample source. On Windows the
//! raw numbers come from GlobalMemoryStatusEx and GetProcessMemoryInfo.

/// Computes physical memory usage as `100 * (1 - available / total)`.
///
/// Returns 0.0 when `total` is zero, which is how an unusable reading
/// degrades.
#[must_use]
pub fn memory_usage_percent(total_physical: u64, available_physical: u64) -> f32 {
    if total_physical == 0 {
        return 0.0;
    }
    100.0 * (1.0 - available_physical as f32 / total_physical as f32)
}

/// Formats a byte counter into a human-readable string.
///
/// Divides by 1024 while the quotient, rounded half to even, stays at or
/// above one, then prints one decimal with the matching suffix.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const SUFFIXES: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut number = bytes as f64;
    let mut counter = 0;
    while counter < SUFFIXES.len() - 1 && (number / 1024.0).round_ties_even() >= 1.0 {
        number /= 1024.0;
        counter += 1;
    }
    format!("{:.1}{}", number, SUFFIXES[counter])
}

#[cfg(windows)]
pub use self::win::{get_process_working_set, get_system_memory_percent};

#[cfg(windows)]
mod win {
    use std::mem;

    use windows::Win32::System::ProcessStatus::{GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS};
    use windows::Win32::System::SystemInformation::{GlobalMemoryStatusEx, MEMORYSTATUSEX};
    use windows::Win32::System::Threading::{PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ};

    use super::memory_usage_percent;
    use crate::ffi::KernelHandle;
    use crate::system::error::{Metric, SourceError, SourceResult};

    /// Gets system-wide physical memory usage in percent.
    pub fn get_system_memory_percent() -> SourceResult<f32> {
        // dwLength must be set before the call
        let mut mem_status = MEMORYSTATUSEX {
            dwLength: mem::size_of::<MEMORYSTATUSEX>() as u32,
            ..Default::default()
        };

        // SAFETY: GlobalMemoryStatusEx is safe to call with a properly initialized struct.
        unsafe { GlobalMemoryStatusEx(&mut mem_status) }
            .map_err(|e| SourceError::from_win(Metric::Memory, "GlobalMemoryStatusEx", &e))?;

        Ok(memory_usage_percent(
            mem_status.ullTotalPhys,
            mem_status.ullAvailPhys,
        ))
    }

    /// Gets the working set of a process in bytes.
    ///
    /// Returns 0 if the process cannot be opened (access denied or already gone).
    pub fn get_process_working_set(pid: u32) -> u64 {
        let handle = match KernelHandle::open_process(pid, PROCESS_QUERY_LIMITED_INFORMATION | PROCESS_VM_READ) {
            Ok(h) => h,
            Err(_) => return 0,
        };

        let mut counters = PROCESS_MEMORY_COUNTERS {
            cb: mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32,
            ..Default::default()
        };

        // SAFETY: the handle outlives the call and the struct size is set.
        let result = unsafe {
            GetProcessMemoryInfo(
                handle.as_raw(),
                &mut counters,
                mem::size_of::<PROCESS_MEMORY_COUNTERS>() as u32,
            )
        };

        if result.is_ok() {
            counters.WorkingSetSize as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_usage_percent() {
        assert_eq!(memory_usage_percent(1000, 250), 75.0);
        assert_eq!(memory_usage_percent(1000, 1000), 0.0);
        assert_eq!(memory_usage_percent(1000, 0), 100.0);
    }

    #[test]
    fn test_memory_usage_percent_zero_total() {
        assert_eq!(memory_usage_percent(0, 0), 0.0);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.0B");
        assert_eq!(format_bytes(500), "500.0B");
        assert_eq!(format_bytes(1536), "1.5KB");
        assert_eq!(format_bytes(1_572_864), "1.5MB");
        assert_eq!(format_bytes(1_610_612_736), "1.5GB");
    }

    #[test]
    fn test_format_bytes_rounds_up_to_next_unit() {
        // 600 / 1024 rounds to 1, so it is already shown in KB
        assert_eq!(format_bytes(600), "0.6KB");
    }

    #[test]
    fn test_format_bytes_half_rounds_to_even() {
        // 512 / 1024 is exactly 0.5, which rounds down to 0
        assert_eq!(format_bytes(512), "512.0B");
        assert_eq!(format_bytes(513), "0.5KB");
        // 0.5 MB in KB terms
        assert_eq!(format_bytes(512 * 1024), "512.0KB");
    }

    #[cfg(windows)]
    #[test]
    fn test_system_memory_percent() {
        let percent = get_system_memory_percent().expect("Should get system memory");
        assert!(percent > 0.0 && percent <= 100.0);
    }

    #[cfg(windows)]
    #[test]
    fn test_process_working_set() {
        assert!(get_process_working_set(std::process::id()) > 0);
    }
}
