//! Records rebuilt wholesale on every snapshot

use std::collections::HashSet;

use crate::system::{NetworkInterfaceSnapshot, ProcessRaw, ServiceRaw, ServiceStatus};

/// Process entry with its service classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Process ID
    pub pid: u32,
    /// Process name without the ".exe" suffix
    pub name: String,
    /// Memory usage in bytes (working set)
    pub working_set_bytes: u64,
    /// True if the process hosted a running service when sampled
    pub is_service: bool,
}

impl ProcessRecord {
    /// "Service" or "Application", as shown in the type column.
    pub fn kind_label(&self) -> &'static str {
        if self.is_service {
            "Service"
        } else {
            "Application"
        }
    }
}

/// Service entry as shown in the services table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: String,
    pub display_name: String,
    pub status: ServiceStatus,
}

impl From<ServiceRaw> for ServiceRecord {
    fn from(raw: ServiceRaw) -> Self {
        Self {
            name: raw.name,
            display_name: raw.display_name,
            status: raw.status,
        }
    }
}

/// The latest complete set of readings the filter and renderer work from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Bumped each time new readings replace the old ones
    pub sequence: u64,
    pub processes: Vec<ProcessRecord>,
    pub services: Vec<ServiceRecord>,
    /// Non-loopback interfaces only
    pub interfaces: Vec<NetworkInterfaceSnapshot>,
}

/// Tags each process as service or application by PID membership.
///
/// The PID set may be a few milliseconds older or newer than the process
/// list; a process that started or exited in between is misclassified for
/// one period at most.
pub fn classify(processes: Vec<ProcessRaw>, service_pids: &HashSet<u32>) -> Vec<ProcessRecord> {
    processes
        .into_iter()
        .map(|raw| ProcessRecord {
            is_service: service_pids.contains(&raw.pid),
            pid: raw.pid,
            name: raw.name,
            working_set_bytes: raw.working_set_bytes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(pid: u32, name: &str) -> ProcessRaw {
        ProcessRaw {
            pid,
            name: name.to_string(),
            working_set_bytes: 4096,
        }
    }

    #[test]
    fn test_classify_by_service_pid_membership() {
        let processes = vec![raw(1, "explorer"), raw(2, "svchost"), raw(3, "notepad")];
        let records = classify(processes, &HashSet::from([2]));

        let flags: Vec<(u32, bool)> = records.iter().map(|r| (r.pid, r.is_service)).collect();
        assert_eq!(flags, vec![(1, false), (2, true), (3, false)]);
        assert_eq!(records[1].kind_label(), "Service");
        assert_eq!(records[0].kind_label(), "Application");
    }

    #[test]
    fn test_classify_tolerates_pids_without_process() {
        let records = classify(vec![raw(10, "a")], &HashSet::from([99]));
        assert!(!records[0].is_service);
    }
}
