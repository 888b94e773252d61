//! System information module - telemetry sources and process actions
//!
//! On Windows the source is built on raw Win32 calls; other hosts fall
//! back to the `sysinfo` crate. Both sit behind the `SampleSource` trait.

pub mod control;
pub mod error;
pub mod memory;
pub mod source;

#[cfg(windows)]
mod cpu;
#[cfg(windows)]
mod network;
#[cfg(windows)]
mod path;
#[cfg(windows)]
mod processes;
#[cfg(windows)]
mod services;
#[cfg(windows)]
mod win_source;

#[cfg(not(windows))]
mod portable;

pub use control::{OsControl, ProcessControl};
pub use error::{ActionError, ActionResult, Metric, SourceError, SourceResult};
pub use memory::format_bytes;
pub use source::{
    InterfaceKind, NetworkInterfaceSnapshot, OperStatus, ProcessRaw, SampleSource, ServiceRaw,
    ServiceStatus,
};

/// The sample source for the host platform.
#[cfg(windows)]
pub type HostSource = win_source::WinSampleSource;

/// The sample source for the host platform.
#[cfg(not(windows))]
pub type HostSource = portable::PortableSampleSource;

/// Acquires the OS resources the host sample source needs.
pub fn init_host_source() -> SourceResult<HostSource> {
    HostSource::init()
}
