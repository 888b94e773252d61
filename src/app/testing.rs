//! Scripted test doubles for the sample source and process control

use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::overlay::{OverlayConfig, OverlayState};
use super::state::App;
use crate::system::{
    ActionError, ActionResult, InterfaceKind, Metric, NetworkInterfaceSnapshot, OperStatus,
    ProcessControl, ProcessRaw, SampleSource, ServiceRaw, ServiceStatus, SourceError,
    SourceResult,
};

/// Returns whatever its fields hold; counts each full read of every metric.
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub cpu: SourceResult<f32>,
    pub memory: SourceResult<f32>,
    pub processes: SourceResult<Vec<ProcessRaw>>,
    pub service_pids: SourceResult<HashSet<u32>>,
    pub services: SourceResult<Vec<ServiceRaw>>,
    pub interfaces: SourceResult<Vec<NetworkInterfaceSnapshot>>,
    pub cpu_reads: usize,
    pub process_reads: usize,
}

pub fn os_failure(metric: Metric) -> SourceError {
    SourceError::Os {
        metric,
        api: "FakeApi",
        code: 5,
    }
}

pub fn process(pid: u32, name: &str) -> ProcessRaw {
    ProcessRaw {
        pid,
        name: name.to_string(),
        working_set_bytes: u64::from(pid) * 1024 * 1024,
    }
}

pub fn interface(name: &str, kind: InterfaceKind) -> NetworkInterfaceSnapshot {
    NetworkInterfaceSnapshot {
        name: name.to_string(),
        kind,
        status: OperStatus::Up,
        bytes_sent: 1024,
        bytes_received: 2048,
    }
}

impl Default for FakeSource {
    fn default() -> Self {
        Self {
            cpu: Ok(12.5),
            memory: Ok(40.0),
            processes: Ok(vec![
                process(100, "explorer"),
                process(200, "svchost"),
                process(300, "notepad"),
            ]),
            service_pids: Ok(HashSet::from([200])),
            services: Ok(vec![ServiceRaw {
                name: "Spooler".to_string(),
                display_name: "Print Spooler".to_string(),
                status: ServiceStatus::Running,
                pid: Some(200),
            }]),
            interfaces: Ok(vec![
                interface("Ethernet", InterfaceKind::Ethernet),
                interface("Loopback Pseudo-Interface 1", InterfaceKind::Loopback),
            ]),
            cpu_reads: 0,
            process_reads: 0,
        }
    }
}

impl SampleSource for FakeSource {
    fn read_cpu(&mut self) -> SourceResult<f32> {
        self.cpu_reads += 1;
        self.cpu.clone()
    }

    fn read_memory(&mut self) -> SourceResult<f32> {
        self.memory.clone()
    }

    fn read_processes(&mut self) -> SourceResult<Vec<ProcessRaw>> {
        self.process_reads += 1;
        self.processes.clone()
    }

    fn read_service_process_ids(&mut self) -> SourceResult<HashSet<u32>> {
        self.service_pids.clone()
    }

    fn read_services(&mut self) -> SourceResult<Vec<ServiceRaw>> {
        self.services.clone()
    }

    fn read_network_interfaces(&mut self) -> SourceResult<Vec<NetworkInterfaceSnapshot>> {
        self.interfaces.clone()
    }
}

/// Records every call and answers with `result`.
#[derive(Debug, Clone)]
pub struct FakeControl {
    pub result: ActionResult<()>,
    pub calls: Vec<(&'static str, u32)>,
}

impl Default for FakeControl {
    fn default() -> Self {
        Self {
            result: Ok(()),
            calls: Vec::new(),
        }
    }
}

impl FakeControl {
    pub fn failing(err: ActionError) -> Self {
        Self {
            result: Err(err),
            calls: Vec::new(),
        }
    }
}

impl ProcessControl for FakeControl {
    fn terminate(&mut self, pid: u32) -> ActionResult<()> {
        self.calls.push(("terminate", pid));
        self.result.clone()
    }

    fn open_location(&mut self, pid: u32) -> ActionResult<()> {
        self.calls.push(("open_location", pid));
        self.result.clone()
    }

    fn show_properties(&mut self, pid: u32) -> ActionResult<()> {
        self.calls.push(("show_properties", pid));
        self.result.clone()
    }
}

/// An app over the default fakes that has taken its first sample.
pub fn sampled_app(control: FakeControl) -> App<FakeSource, FakeControl> {
    let config = OverlayConfig {
        sample_interval: Duration::from_millis(1000),
        history_capacity: 10,
        initial_filter: String::new(),
    };
    let mut app = App::new(OverlayState::new(config, FakeSource::default(), control));
    app.tick(Instant::now());
    app
}
