//! Error types for telemetry reads and process actions
//!
//! Two recoverable kinds exist. A `SourceError` is a transient failure of an
//! OS query; the sampling loop degrades and carries on. An `ActionError` is
//! a failed side-effecting command; it is reported and leaves all core
//! state untouched.

use thiserror::Error;

// ============================================================================
// Source Error
// ============================================================================

/// Which telemetry read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Cpu,
    Memory,
    Processes,
    ServiceProcessIds,
    Services,
    NetworkInterfaces,
}

impl Metric {
    /// Get display name for the metric
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Memory => "memory",
            Metric::Processes => "processes",
            Metric::ServiceProcessIds => "service process ids",
            Metric::Services => "services",
            Metric::NetworkInterfaces => "network interfaces",
        }
    }
}

/// A transient failure of a single OS query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// OS API call failed with an error code
    #[error("{api} failed while reading {} (error code: 0x{code:08X})", .metric.name())]
    Os {
        metric: Metric,
        api: &'static str,
        code: i32,
    },

    /// The query returned data that cannot be used this cycle
    #[error("inconsistent {} reading: {reason}", .metric.name())]
    Inconsistent { metric: Metric, reason: String },

    /// Resource could not be acquired (handle, snapshot, manager connection)
    #[error("cannot acquire {what}: {message}")]
    Acquire { what: &'static str, message: String },
}

impl SourceError {
    /// The metric this failure belongs to, if any.
    pub fn metric(&self) -> Option<Metric> {
        match self {
            SourceError::Os { metric, .. } | SourceError::Inconsistent { metric, .. } => {
                Some(*metric)
            }
            SourceError::Acquire { .. } => None,
        }
    }
}

#[cfg(windows)]
impl SourceError {
    /// Maps a `windows` crate error onto a source failure for `metric`.
    pub fn from_win(metric: Metric, api: &'static str, err: &windows::core::Error) -> Self {
        SourceError::Os {
            metric,
            api,
            code: err.code().0,
        }
    }
}

// ============================================================================
// Action Error
// ============================================================================

/// Failure of a process action (terminate, open location, properties).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The target does not offer this action
    #[error("{action} is not available for {target}")]
    Unsupported {
        action: &'static str,
        target: String,
    },

    /// The action was refused for a protected process
    #[error("refusing to terminate PID {pid} ({reason})")]
    Refused { pid: u32, reason: &'static str },

    /// Process does not exist or has already terminated
    #[error("process not found (PID {pid})")]
    NotFound { pid: u32 },

    /// Access denied - typically requires elevation
    #[error("access denied - try running as Administrator")]
    AccessDenied,

    /// The executable path of the process could not be resolved
    #[error("cannot resolve the executable path of PID {pid}")]
    PathUnavailable { pid: u32 },

    /// OS API call failed with an error code
    #[error("{api} failed (error code: 0x{code:08X})")]
    Os { api: &'static str, code: i32 },

    /// Helper program could not be launched
    #[error("failed to launch {program}: {message}")]
    Launch {
        program: &'static str,
        message: String,
    },
}

// ============================================================================
// Result type aliases
// ============================================================================

/// Result type for telemetry reads
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for process actions
pub type ActionResult<T> = Result<T, ActionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Os {
            metric: Metric::Memory,
            api: "GlobalMemoryStatusEx",
            code: 5,
        };
        assert_eq!(
            err.to_string(),
            "GlobalMemoryStatusEx failed while reading memory (error code: 0x00000005)"
        );
        assert_eq!(err.metric(), Some(Metric::Memory));
    }

    #[test]
    fn test_action_error_display() {
        let err = ActionError::Refused {
            pid: 4,
            reason: "System",
        };
        assert_eq!(err.to_string(), "refusing to terminate PID 4 (System)");

        let err = ActionError::Unsupported {
            action: "terminate",
            target: "service 'Spooler'".to_string(),
        };
        assert_eq!(err.to_string(), "terminate is not available for service 'Spooler'");
    }
}
