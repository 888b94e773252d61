//! Network interface counters using GetIfTable2

use windows::Win32::NetworkManagement::IpHelper::{FreeMibTable, GetIfTable2, MIB_IF_TABLE2};

use super::error::{Metric, SourceError, SourceResult};
use super::processes::wide_to_string;
use super::source::{InterfaceKind, NetworkInterfaceSnapshot, OperStatus};

/// Reads every interface known to the IP helper, loopback included.
pub fn enumerate_interfaces() -> SourceResult<Vec<NetworkInterfaceSnapshot>> {
    let mut table: *mut MIB_IF_TABLE2 = std::ptr::null_mut();

    // SAFETY: GetIfTable2 allocates the table; we free it with FreeMibTable below.
    unsafe { GetIfTable2(&mut table) }
        .ok()
        .map_err(|e| SourceError::from_win(Metric::NetworkInterfaces, "GetIfTable2", &e))?;

    if table.is_null() {
        return Ok(Vec::new());
    }

    // SAFETY: the table is valid until FreeMibTable; NumEntries rows follow the header.
    let interfaces = unsafe {
        let count = (*table).NumEntries as usize;
        let rows = std::slice::from_raw_parts((*table).Table.as_ptr(), count);
        rows.iter()
            .map(|row| NetworkInterfaceSnapshot {
                name: wide_to_string(&row.Alias),
                kind: InterfaceKind::from_if_type(row.Type),
                status: OperStatus::from_raw(row.OperStatus.0),
                bytes_sent: row.OutOctets,
                bytes_received: row.InOctets,
            })
            .collect()
    };

    // SAFETY: table came from GetIfTable2 and is freed exactly once.
    unsafe { FreeMibTable(table as *const _) };

    Ok(interfaces)
}
