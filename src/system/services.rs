//! Service enumeration through the Service Control Manager
//!
//! One EnumServicesStatusExW walk yields both the service list and the
//! PIDs hosting running services. The two reads are independent calls,
//! so they may disagree by one sampling period.

use std::collections::HashSet;

use windows::core::PCWSTR;
use windows::Win32::Foundation::ERROR_MORE_DATA;
use windows::Win32::System::Services::{
    EnumServicesStatusExW, ENUM_SERVICE_STATUS_PROCESSW, SC_ENUM_PROCESS_INFO, SERVICE_STATE_ALL,
    SERVICE_WIN32,
};

use crate::ffi::ScmHandle;

use super::error::{Metric, SourceError, SourceResult};
use super::source::{ServiceRaw, ServiceStatus};

/// Reads a null-terminated wide string from a pointer owned by the OS.
fn wide_ptr_to_string(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }

    // SAFETY: ptr is non-null and points to a null-terminated wide string
    // inside the buffer filled by EnumServicesStatusExW.
    unsafe {
        let mut len = 0usize;
        while *ptr.add(len) != 0 {
            len += 1;
        }
        String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len))
    }
}

/// Gives up after this many size-and-fill rounds.
const MAX_ENUM_ATTEMPTS: usize = 3;

/// What a single EnumServicesStatusExW call asks of the caller.
#[derive(Debug, PartialEq, Eq)]
enum EnumStep {
    Done,
    Grow,
}

/// Only ERROR_MORE_DATA means "retry with a bigger buffer"; every other
/// error is a failed read.
fn enum_step(result: windows::core::Result<()>, metric: Metric) -> SourceResult<EnumStep> {
    match result {
        Ok(()) => Ok(EnumStep::Done),
        Err(e) if e.code() == ERROR_MORE_DATA.to_hresult() => Ok(EnumStep::Grow),
        Err(e) => Err(SourceError::from_win(metric, "EnumServicesStatusExW", &e)),
    }
}

/// Enumerates all Win32 services with their status and hosting PID.
pub fn enumerate_services(scm: &ScmHandle, metric: Metric) -> SourceResult<Vec<ServiceRaw>> {
    // Starts empty so the first call only reports the required size
    let mut buffer: Vec<u8> = Vec::new();

    for _ in 0..MAX_ENUM_ATTEMPTS {
        let mut bytes_needed = 0u32;
        let mut services_returned = 0u32;
        let mut resume_handle = 0u32;
        let out = if buffer.is_empty() {
            None
        } else {
            Some(buffer.as_mut_slice())
        };

        // SAFETY: scm is a valid SC_HANDLE; out pointers are valid for writes
        // and the buffer slice carries its own length.
        let result = unsafe {
            EnumServicesStatusExW(
                scm.as_raw(),
                SC_ENUM_PROCESS_INFO,
                SERVICE_WIN32,
                SERVICE_STATE_ALL,
                out,
                &mut bytes_needed,
                &mut services_returned,
                Some(&mut resume_handle),
                PCWSTR::null(),
            )
        };

        match enum_step(result, metric)? {
            EnumStep::Done => return Ok(parse_services(&buffer, services_returned)),
            EnumStep::Grow if bytes_needed == 0 => {
                return Err(SourceError::Inconsistent {
                    metric,
                    reason: "EnumServicesStatusExW asked for more data without a size".to_string(),
                });
            }
            EnumStep::Grow => buffer = vec![0u8; bytes_needed as usize],
        }
    }

    Err(SourceError::Inconsistent {
        metric,
        reason: "service table kept growing during enumeration".to_string(),
    })
}

/// Decodes the ENUM_SERVICE_STATUS_PROCESSW array at the start of `buffer`.
fn parse_services(buffer: &[u8], count: u32) -> Vec<ServiceRaw> {
    let ptr = buffer.as_ptr() as *const ENUM_SERVICE_STATUS_PROCESSW;
    let mut services = Vec::with_capacity(count as usize);

    for i in 0..count as usize {
        // SAFETY: i < count, entries written by the OS into buffer.
        let item = unsafe { &*ptr.add(i) };
        let status_process = &item.ServiceStatusProcess;
        services.push(ServiceRaw {
            name: wide_ptr_to_string(item.lpServiceName.0),
            display_name: wide_ptr_to_string(item.lpDisplayName.0),
            status: ServiceStatus::from_raw(status_process.dwCurrentState.0),
            pid: match status_process.dwProcessId {
                0 => None,
                pid => Some(pid),
            },
        });
    }

    services
}

/// PIDs hosting at least one running service.
pub fn service_process_ids(scm: &ScmHandle) -> SourceResult<HashSet<u32>> {
    let services = enumerate_services(scm, Metric::ServiceProcessIds)?;
    Ok(hosting_pids(&services))
}

fn hosting_pids(services: &[ServiceRaw]) -> HashSet<u32> {
    services.iter().filter_map(|s| s.pid).collect()
}
