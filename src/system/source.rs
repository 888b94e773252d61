//! The sample source contract and the raw records it produces
//!
//! A `SampleSource` is an opaque provider of point-in-time telemetry. Every
//! read is independent of the others and may fail; nothing here is cached.

use std::collections::HashSet;

use super::error::SourceResult;

/// A process as reported by the OS, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRaw {
    /// Process ID
    pub pid: u32,
    /// Executable name (e.g., "notepad.exe")
    pub name: String,
    /// Working set size in bytes (physical memory used)
    pub working_set_bytes: u64,
}

/// Current state of a registered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Stopped,
    StartPending,
    StopPending,
    Running,
    ContinuePending,
    PausePending,
    Paused,
}

impl ServiceStatus {
    /// Get display name for the status
    pub fn name(&self) -> &'static str {
        match self {
            ServiceStatus::Stopped => "Stopped",
            ServiceStatus::StartPending => "StartPending",
            ServiceStatus::StopPending => "StopPending",
            ServiceStatus::Running => "Running",
            ServiceStatus::ContinuePending => "ContinuePending",
            ServiceStatus::PausePending => "PausePending",
            ServiceStatus::Paused => "Paused",
        }
    }

    /// Maps a `SERVICE_STATUS_CURRENT_STATE` value. Unknown values read as stopped.
    pub fn from_raw(state: u32) -> Self {
        match state {
            2 => ServiceStatus::StartPending,
            3 => ServiceStatus::StopPending,
            4 => ServiceStatus::Running,
            5 => ServiceStatus::ContinuePending,
            6 => ServiceStatus::PausePending,
            7 => ServiceStatus::Paused,
            _ => ServiceStatus::Stopped,
        }
    }
}

/// A service as reported by the service manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRaw {
    /// Service key name (e.g., "Spooler")
    pub name: String,
    /// Human-readable name (e.g., "Print Spooler")
    pub display_name: String,
    pub status: ServiceStatus,
    /// Hosting process, if the service is running
    pub pid: Option<u32>,
}

/// Physical/logical type of a network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Ethernet,
    Wireless,
    Loopback,
    Tunnel,
    Ppp,
    Other,
}

impl InterfaceKind {
    /// Maps an IANA `ifType` value.
    pub fn from_if_type(if_type: u32) -> Self {
        match if_type {
            6 => InterfaceKind::Ethernet,
            71 => InterfaceKind::Wireless,
            24 => InterfaceKind::Loopback,
            131 => InterfaceKind::Tunnel,
            23 => InterfaceKind::Ppp,
            _ => InterfaceKind::Other,
        }
    }

    /// Get display name for the interface type
    pub fn name(&self) -> &'static str {
        match self {
            InterfaceKind::Ethernet => "Ethernet",
            InterfaceKind::Wireless => "Wireless80211",
            InterfaceKind::Loopback => "Loopback",
            InterfaceKind::Tunnel => "Tunnel",
            InterfaceKind::Ppp => "Ppp",
            InterfaceKind::Other => "Unknown",
        }
    }
}

/// Operational status of a network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperStatus {
    Up,
    Down,
    Testing,
    Dormant,
    NotPresent,
    LowerLayerDown,
    Unknown,
}

impl OperStatus {
    /// Maps an `IF_OPER_STATUS` value.
    pub fn from_raw(status: i32) -> Self {
        match status {
            1 => OperStatus::Up,
            2 => OperStatus::Down,
            3 => OperStatus::Testing,
            5 => OperStatus::Dormant,
            6 => OperStatus::NotPresent,
            7 => OperStatus::LowerLayerDown,
            _ => OperStatus::Unknown,
        }
    }

    /// Get display name for the status
    pub fn name(&self) -> &'static str {
        match self {
            OperStatus::Up => "Up",
            OperStatus::Down => "Down",
            OperStatus::Testing => "Testing",
            OperStatus::Dormant => "Dormant",
            OperStatus::NotPresent => "NotPresent",
            OperStatus::LowerLayerDown => "LowerLayerDown",
            OperStatus::Unknown => "Unknown",
        }
    }
}

/// Cumulative counters for one network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterfaceSnapshot {
    pub name: String,
    pub kind: InterfaceKind,
    pub status: OperStatus,
    /// Bytes sent since the interface came up
    pub bytes_sent: u64,
    /// Bytes received since the interface came up
    pub bytes_received: u64,
}

impl NetworkInterfaceSnapshot {
    /// Returns true for loopback interfaces.
    pub fn is_loopback(&self) -> bool {
        self.kind == InterfaceKind::Loopback
    }
}

/// Point-in-time provider of host telemetry.
///
/// Reads are not atomic with respect to each other: a process list and a
/// service pid set read a few milliseconds apart may disagree.
pub trait SampleSource {
    /// Instantaneous CPU utilization in percent. The first reading after
    /// start-up may be noisy.
    fn read_cpu(&mut self) -> SourceResult<f32>;

    /// Physical memory in use, in percent.
    fn read_memory(&mut self) -> SourceResult<f32>;

    fn read_processes(&mut self) -> SourceResult<Vec<ProcessRaw>>;

    /// PIDs of processes hosting at least one running service.
    fn read_service_process_ids(&mut self) -> SourceResult<HashSet<u32>>;

    fn read_services(&mut self) -> SourceResult<Vec<ServiceRaw>>;

    /// All interfaces, loopback included.
    fn read_network_interfaces(&mut self) -> SourceResult<Vec<NetworkInterfaceSnapshot>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_status_from_raw() {
        assert_eq!(ServiceStatus::from_raw(4), ServiceStatus::Running);
        assert_eq!(ServiceStatus::from_raw(1), ServiceStatus::Stopped);
        assert_eq!(ServiceStatus::from_raw(7), ServiceStatus::Paused);
        assert_eq!(ServiceStatus::from_raw(99), ServiceStatus::Stopped);
    }

    #[test]
    fn test_interface_kind_from_if_type() {
        assert_eq!(InterfaceKind::from_if_type(6), InterfaceKind::Ethernet);
        assert_eq!(InterfaceKind::from_if_type(24), InterfaceKind::Loopback);
        assert_eq!(InterfaceKind::from_if_type(1), InterfaceKind::Other);
    }

    #[test]
    fn test_oper_status_from_raw() {
        assert_eq!(OperStatus::from_raw(1), OperStatus::Up);
        assert_eq!(OperStatus::from_raw(2), OperStatus::Down);
        assert_eq!(OperStatus::from_raw(42), OperStatus::Unknown);
    }
}
