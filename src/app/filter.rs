//! Live search over the latest snapshot
//!
//! The filtered view is always a pure function of (snapshot, search term).
//! Every rebuild is a full O(n) pass; process and service counts are in
//! the hundreds, so diffing would not pay for itself.

use super::snapshot::{ProcessRecord, ServiceRecord, Snapshot};

/// Processes and services whose names contain the search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub processes: Vec<ProcessRecord>,
    pub services: Vec<ServiceRecord>,
}

/// Identifies the inputs a view was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildKey {
    sequence: u64,
    term: String,
}

/// Holds the current filtered view and what it was built from.
#[derive(Debug, Clone, Default)]
pub struct FilterIndex {
    view: FilteredView,
    built_from: Option<BuildKey>,
}

/// Case-insensitive substring match. `needle_lower` must already be lowercase.
fn matches(name: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || name.to_lowercase().contains(needle_lower)
}

/// Filters processes by name, keeping snapshot order.
pub fn filter_processes(processes: &[ProcessRecord], term: &str) -> Vec<ProcessRecord> {
    let needle = term.to_lowercase();
    processes
        .iter()
        .filter(|p| matches(&p.name, &needle))
        .cloned()
        .collect()
}

/// Filters services by key name, keeping snapshot order.
pub fn filter_services(services: &[ServiceRecord], term: &str) -> Vec<ServiceRecord> {
    let needle = term.to_lowercase();
    services
        .iter()
        .filter(|s| matches(&s.name, &needle))
        .cloned()
        .collect()
}

impl FilterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the view from scratch.
    ///
    /// The new view is built completely before it replaces the old one.
    pub fn update(&mut self, snapshot: &Snapshot, term: &str) {
        let view = FilteredView {
            processes: filter_processes(&snapshot.processes, term),
            services: filter_services(&snapshot.services, term),
        };
        self.view = view;
        self.built_from = Some(BuildKey {
            sequence: snapshot.sequence,
            term: term.to_string(),
        });
    }

    /// Rebuilds only if the snapshot or the term changed since the last build.
    ///
    /// Returns true if a rebuild happened.
    pub fn refresh(&mut self, snapshot: &Snapshot, term: &str) -> bool {
        let stale = match &self.built_from {
            Some(key) => key.sequence != snapshot.sequence || key.term != term,
            None => true,
        };
        if stale {
            self.update(snapshot, term);
        }
        stale
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ServiceStatus;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn process(pid: u32, name: &str) -> ProcessRecord {
        ProcessRecord {
            pid,
            name: name.to_string(),
            working_set_bytes: 0,
            is_service: false,
        }
    }

    fn service(name: &str, display_name: &str) -> ServiceRecord {
        ServiceRecord {
            name: name.to_string(),
            display_name: display_name.to_string(),
            status: ServiceStatus::Running,
        }
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            sequence: 1,
            processes: vec![
                process(10, "Chrome"),
                process(11, "xABCx"),
                process(12, "notepad"),
                process(13, "abc"),
            ],
            services: vec![service("Spooler", "Print Spooler"), service("wuauserv", "Windows Update")],
            interfaces: Vec::new(),
        }
    }

    fn pids(view: &FilteredView) -> Vec<u32> {
        view.processes.iter().map(|p| p.pid).collect()
    }

    #[test]
    fn test_empty_term_keeps_everything_in_order() {
        let snap = snapshot();
        let mut index = FilterIndex::new();
        index.update(&snap, "");
        assert_eq!(index.view().processes, snap.processes);
        assert_eq!(index.view().services, snap.services);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let mut index = FilterIndex::new();
        index.update(&snapshot(), "abc");
        assert_eq!(pids(index.view()), vec![11, 13]);

        index.update(&snapshot(), "CHROME");
        assert_eq!(pids(index.view()), vec![10]);
    }

    #[test]
    fn test_every_kept_record_matches() {
        let mut index = FilterIndex::new();
        index.update(&snapshot(), "o");
        assert!(index
            .view()
            .processes
            .iter()
            .all(|p| p.name.to_lowercase().contains('o')));
    }

    #[test]
    fn test_services_match_key_name_only() {
        let mut index = FilterIndex::new();
        index.update(&snapshot(), "update");
        assert!(index.view().services.is_empty());

        index.update(&snapshot(), "WUAU");
        let names: Vec<&str> = index.view().services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["wuauserv"]);
    }

    #[test]
    fn test_refiltering_is_idempotent() {
        let snap = snapshot();
        let once = filter_processes(&snap.processes, "abc");
        let twice = filter_processes(&once, "abc");
        assert_eq!(once, twice);
    }

    fn arb_processes() -> impl Strategy<Value = Vec<ProcessRecord>> {
        proptest::collection::vec("[a-zA-Z]{0,8}", 0..20).prop_map(|names| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| process(i as u32, &name))
                .collect()
        })
    }

    fn arb_services() -> impl Strategy<Value = Vec<ServiceRecord>> {
        proptest::collection::vec(("[a-zA-Z]{0,8}", "[a-zA-Z ]{0,12}"), 0..20).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(name, display)| service(&name, &display))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent_and_exact(
            processes in arb_processes(),
            services in arb_services(),
            term in "[a-cA-C]{0,2}",
        ) {
            let needle = term.to_lowercase();

            let once = filter_processes(&processes, &term);
            prop_assert_eq!(&filter_processes(&once, &term), &once);
            let expected: Vec<ProcessRecord> = processes
                .iter()
                .filter(|p| p.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            prop_assert_eq!(&once, &expected);

            let once = filter_services(&services, &term);
            prop_assert_eq!(&filter_services(&once, &term), &once);
            let expected: Vec<ServiceRecord> = services
                .iter()
                .filter(|s| s.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            prop_assert_eq!(&once, &expected);
        }
    }

    #[test]
    fn test_refresh_skips_unchanged_inputs() {
        let mut snap = snapshot();
        let mut index = FilterIndex::new();
        assert!(index.refresh(&snap, "a"));
        assert!(!index.refresh(&snap, "a"));
        assert!(index.refresh(&snap, "ab"));

        snap.sequence += 1;
        assert!(index.refresh(&snap, "ab"));
    }
}
