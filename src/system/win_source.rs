//! Win32-backed sample source

use std::collections::HashSet;

use tracing::info;
use windows::Win32::System::Services::SC_MANAGER_ENUMERATE_SERVICE;

use crate::ffi::ScmHandle;

use super::cpu::CpuTracker;
use super::error::{Metric, SourceError, SourceResult};
use super::memory::get_system_memory_percent;
use super::network::enumerate_interfaces;
use super::processes::enumerate_processes;
use super::services::{enumerate_services, service_process_ids};
use super::source::{NetworkInterfaceSnapshot, ProcessRaw, SampleSource, ServiceRaw};

/// Samples the local machine through raw Win32 calls.
///
/// Owns the Service Control Manager connection; dropping the source
/// releases it.
pub struct WinSampleSource {
    cpu: CpuTracker,
    scm: ScmHandle,
}

impl WinSampleSource {
    /// Acquires the OS handles the source needs for its lifetime.
    pub fn init() -> SourceResult<Self> {
        let scm = ScmHandle::connect(SC_MANAGER_ENUMERATE_SERVICE).map_err(|e| SourceError::Acquire {
            what: "service control manager",
            message: e.message().to_string(),
        })?;
        info!("connected to service control manager");

        Ok(Self {
            cpu: CpuTracker::new(),
            scm,
        })
    }
}

impl SampleSource for WinSampleSource {
    fn read_cpu(&mut self) -> SourceResult<f32> {
        self.cpu.sample()
    }

    fn read_memory(&mut self) -> SourceResult<f32> {
        get_system_memory_percent()
    }

    fn read_processes(&mut self) -> SourceResult<Vec<ProcessRaw>> {
        enumerate_processes()
    }

    fn read_service_process_ids(&mut self) -> SourceResult<HashSet<u32>> {
        service_process_ids(&self.scm)
    }

    fn read_services(&mut self) -> SourceResult<Vec<ServiceRaw>> {
        enumerate_services(&self.scm, Metric::Services)
    }

    fn read_network_interfaces(&mut self) -> SourceResult<Vec<NetworkInterfaceSnapshot>> {
        enumerate_interfaces()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_read_cycle() {
        let mut source = WinSampleSource::init().expect("Should connect to the SCM");
        assert!(source.read_memory().unwrap() > 0.0);
        assert!(!source.read_processes().unwrap().is_empty());
        assert!(!source.read_services().unwrap().is_empty());
    }
}
