//! System CPU usage from GetSystemTimes deltas
//!
//! Usage is the busy share of the time elapsed between two readings, so
//! the tracker keeps the previous one. The first sample covers the time
//! since the tracker was created and may be noisy.

use windows::Win32::Foundation::FILETIME;
use windows::Win32::System::Threading::GetSystemTimes;

use super::error::{Metric, SourceError, SourceResult};

/// Cumulative system times in 100ns ticks. Kernel time includes idle time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CpuTimes {
    idle: u64,
    kernel: u64,
    user: u64,
}

impl CpuTimes {
    fn read() -> SourceResult<Self> {
        let mut idle = FILETIME::default();
        let mut kernel = FILETIME::default();
        let mut user = FILETIME::default();

        // SAFETY: all three out-pointers are valid for the call.
        unsafe { GetSystemTimes(Some(&mut idle), Some(&mut kernel), Some(&mut user)) }
            .map_err(|e| SourceError::from_win(Metric::Cpu, "GetSystemTimes", &e))?;

        Ok(Self {
            idle: ticks(&idle),
            kernel: ticks(&kernel),
            user: ticks(&user),
        })
    }

    /// Busy percentage over the span from `earlier` to `self`.
    fn usage_since(&self, earlier: &CpuTimes) -> f32 {
        let idle = self.idle.saturating_sub(earlier.idle);
        let total = self.kernel.saturating_sub(earlier.kernel) + self.user.saturating_sub(earlier.user);
        if total == 0 {
            return 0.0;
        }
        let busy = total.saturating_sub(idle);
        (busy as f64 * 100.0 / total as f64) as f32
    }
}

fn ticks(ft: &FILETIME) -> u64 {
    (u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)
}

/// Turns successive GetSystemTimes readings into a usage percentage.
#[derive(Debug, Default)]
pub struct CpuTracker {
    last: CpuTimes,
}

impl CpuTracker {
    pub fn new() -> Self {
        Self {
            last: CpuTimes::read().unwrap_or_default(),
        }
    }

    /// Usage since the previous call (or since `new`).
    pub fn sample(&mut self) -> SourceResult<f32> {
        let now = CpuTimes::read()?;
        let usage = now.usage_since(&self.last);
        self.last = now;
        Ok(usage)
    }
}
