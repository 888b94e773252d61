//! Portable sample source backed by `sysinfo`
//!
//! Used on hosts without the Win32 APIs. There is no service manager to
//! query here, so services and service PIDs read as empty.

use std::collections::HashSet;

use sysinfo::{Networks, ProcessesToUpdate, System};
use tracing::info;

use super::error::{Metric, SourceError, SourceResult};
use super::memory::memory_usage_percent;
use super::source::{
    InterfaceKind, NetworkInterfaceSnapshot, OperStatus, ProcessRaw, SampleSource, ServiceRaw,
};

pub struct PortableSampleSource {
    system: System,
}

impl PortableSampleSource {
    /// Primes CPU counters so the next reading has a baseline.
    pub fn init() -> SourceResult<Self> {
        let mut system = System::new();
        system.refresh_cpu_usage();
        info!("initialized portable sample source");
        Ok(Self { system })
    }
}

impl SampleSource for PortableSampleSource {
    fn read_cpu(&mut self) -> SourceResult<f32> {
        self.system.refresh_cpu_usage();
        Ok(self.system.global_cpu_usage())
    }

    fn read_memory(&mut self) -> SourceResult<f32> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            return Err(SourceError::Inconsistent {
                metric: Metric::Memory,
                reason: "total physical memory reported as zero".to_string(),
            });
        }
        Ok(memory_usage_percent(total, self.system.available_memory()))
    }

    fn read_processes(&mut self) -> SourceResult<Vec<ProcessRaw>> {
        self.system.refresh_processes(ProcessesToUpdate::All, true);

        let mut processes: Vec<ProcessRaw> = self
            .system
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRaw {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                working_set_bytes: process.memory(),
            })
            .collect();

        // The process table is a hash map; enumerate in PID order like the OS does
        processes.sort_by_key(|p| p.pid);
        Ok(processes)
    }

    fn read_service_process_ids(&mut self) -> SourceResult<HashSet<u32>> {
        Ok(HashSet::new())
    }

    fn read_services(&mut self) -> SourceResult<Vec<ServiceRaw>> {
        Ok(Vec::new())
    }

    fn read_network_interfaces(&mut self) -> SourceResult<Vec<NetworkInterfaceSnapshot>> {
        let networks = Networks::new_with_refreshed_list();

        let mut interfaces: Vec<NetworkInterfaceSnapshot> = networks
            .iter()
            .map(|(name, data)| NetworkInterfaceSnapshot {
                name: name.clone(),
                kind: guess_kind(name),
                status: OperStatus::Unknown,
                bytes_sent: data.total_transmitted(),
                bytes_received: data.total_received(),
            })
            .collect();

        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }
}

/// Infers the interface type from conventional interface names.
fn guess_kind(name: &str) -> InterfaceKind {
    if name == "lo" || name.starts_with("lo0") {
        InterfaceKind::Loopback
    } else if name.starts_with("wl") {
        InterfaceKind::Wireless
    } else if name.starts_with("en") || name.starts_with("eth") {
        InterfaceKind::Ethernet
    } else if name.starts_with("tun") || name.starts_with("utun") || name.starts_with("wg") {
        InterfaceKind::Tunnel
    } else if name.starts_with("ppp") {
        InterfaceKind::Ppp
    } else {
        InterfaceKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_kind() {
        assert_eq!(guess_kind("lo"), InterfaceKind::Loopback);
        assert_eq!(guess_kind("lo0"), InterfaceKind::Loopback);
        assert_eq!(guess_kind("eth0"), InterfaceKind::Ethernet);
        assert_eq!(guess_kind("enp3s0"), InterfaceKind::Ethernet);
        assert_eq!(guess_kind("wlan0"), InterfaceKind::Wireless);
        assert_eq!(guess_kind("wg0"), InterfaceKind::Tunnel);
        assert_eq!(guess_kind("docker0"), InterfaceKind::Other);
    }

    #[test]
    fn test_reads_own_process() {
        let mut source = PortableSampleSource::init().expect("init");
        let processes = source.read_processes().expect("processes");
        let own = std::process::id();
        assert!(processes.iter().any(|p| p.pid == own));
        assert!(processes.windows(2).all(|w| w[0].pid <= w[1].pid));
    }

    #[test]
    fn test_memory_reading_is_a_percentage() {
        let mut source = PortableSampleSource::init().expect("init");
        let percent = source.read_memory().expect("memory");
        assert!((0.0..=100.0).contains(&percent));
    }
}
