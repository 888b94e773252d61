//! The sampling core: one context object driven by the render loop
//!
//! `OverlayState` owns the sample source, the two rolling histories, the
//! throttle, the latest snapshot and the filtered view. The UI calls
//! `tick` once per frame and reads the results back through accessors.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::actions::{ActionTarget, ProcessAction};
use super::filter::{FilterIndex, FilteredView};
use super::history::RollingHistory;
use super::snapshot::{classify, ProcessRecord, ServiceRecord, Snapshot};
use super::throttle::Throttle;
use crate::system::{
    ActionResult, NetworkInterfaceSnapshot, ProcessControl, ProcessRaw, SampleSource,
    SourceResult,
};

/// Settings the core needs at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub sample_interval: Duration,
    pub history_capacity: usize,
    pub initial_filter: String,
}

/// What a call to `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not due; nothing was read
    Idle,
    /// Full sample: histories appended, lists re-read
    Sampled,
    /// Lists re-read after an action; histories untouched
    Refreshed,
}

pub struct OverlayState<S: SampleSource, C: ProcessControl> {
    source: S,
    control: C,
    throttle: Throttle,
    cpu_history: RollingHistory,
    ram_history: RollingHistory,
    snapshot: Snapshot,
    filter: FilterIndex,
    search_term: String,
    refresh_pending: bool,
}

/// Logs a failed read and hands back `fallback`.
fn degrade<T>(result: SourceResult<T>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            let metric = e.metric().map_or("unknown", |m| m.name());
            warn!(metric, error = %e, "sample read failed, degrading");
            fallback()
        }
    }
}

impl<S: SampleSource, C: ProcessControl> OverlayState<S, C> {
    /// # Panics
    /// If `config.history_capacity` is zero.
    pub fn new(config: OverlayConfig, source: S, control: C) -> Self {
        info!(
            interval_ms = config.sample_interval.as_millis() as u64,
            history = config.history_capacity,
            "overlay state created"
        );
        Self {
            source,
            control,
            throttle: Throttle::new(config.sample_interval),
            cpu_history: RollingHistory::new(config.history_capacity),
            ram_history: RollingHistory::new(config.history_capacity),
            snapshot: Snapshot::default(),
            filter: FilterIndex::new(),
            search_term: config.initial_filter,
            refresh_pending: false,
        }
    }

    /// Advances the core by one render frame.
    ///
    /// A pending out-of-band refresh wins over a due sample and does not
    /// move the throttle's clock.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = if self.refresh_pending {
            self.refresh_pending = false;
            self.reread_lists();
            TickOutcome::Refreshed
        } else if self.throttle.should_sample(now) {
            self.sample();
            TickOutcome::Sampled
        } else {
            TickOutcome::Idle
        };

        // Also covers a term that changed between samples
        self.filter.refresh(&self.snapshot, &self.search_term);
        outcome
    }

    fn sample(&mut self) {
        let cpu = degrade(self.source.read_cpu(), || 0.0);
        let ram = degrade(self.source.read_memory(), || 0.0);
        self.cpu_history.append(cpu);
        self.ram_history.append(ram);
        debug!(cpu, ram, "sampled usage");

        self.reread_lists();
    }

    /// Re-reads processes, services and interfaces into a new snapshot.
    /// Each list that fails to read keeps its previous contents.
    fn reread_lists(&mut self) {
        let processes = self.source.read_processes();
        let service_pids = self.source.read_service_process_ids();

        let processes = match (processes, service_pids) {
            (Ok(processes), Ok(pids)) => classify(processes, &pids),
            (Ok(processes), Err(e)) => {
                warn!(error = %e, "service pid read failed, keeping previous classification");
                self.reclassify_from_previous(processes)
            }
            (Err(e), _) => {
                warn!(error = %e, "process read failed, keeping previous list");
                self.snapshot.processes.clone()
            }
        };

        let services = match self.source.read_services() {
            Ok(raw) => raw.into_iter().map(ServiceRecord::from).collect(),
            Err(e) => {
                warn!(error = %e, "service read failed, keeping previous list");
                self.snapshot.services.clone()
            }
        };

        let interfaces = match self.source.read_network_interfaces() {
            Ok(all) => all.into_iter().filter(|i| !i.is_loopback()).collect(),
            Err(e) => {
                warn!(error = %e, "interface read failed, keeping previous list");
                self.snapshot.interfaces.clone()
            }
        };

        debug!(
            processes = processes.len(),
            services = services.len(),
            interfaces = interfaces.len(),
            "snapshot rebuilt"
        );

        self.snapshot = Snapshot {
            sequence: self.snapshot.sequence + 1,
            processes,
            services,
            interfaces,
        };
    }

    /// Fresh process list, service flags carried over from the last snapshot.
    fn reclassify_from_previous(&self, processes: Vec<ProcessRaw>) -> Vec<ProcessRecord> {
        let previous: HashSet<u32> = self
            .snapshot
            .processes
            .iter()
            .filter(|p| p.is_service)
            .map(|p| p.pid)
            .collect();
        classify(processes, &previous)
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Replaces the term and refilters the retained snapshot immediately.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.filter.refresh(&self.snapshot, &self.search_term);
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_term.push(c);
        self.filter.refresh(&self.snapshot, &self.search_term);
    }

    pub fn pop_search_char(&mut self) {
        self.search_term.pop();
        self.filter.refresh(&self.snapshot, &self.search_term);
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Runs `action` against `target`.
    ///
    /// On success one out-of-band refresh is scheduled for the next tick.
    /// On failure nothing in the core changes.
    pub fn perform(&mut self, action: ProcessAction, target: &ActionTarget) -> ActionResult<()> {
        match target.run(action, &mut self.control) {
            Ok(()) => {
                info!(action = action.name(), target = %target.describe(), "action completed");
                self.request_refresh();
                Ok(())
            }
            Err(e) => {
                warn!(action = action.name(), target = %target.describe(), error = %e, "action failed");
                Err(e)
            }
        }
    }

    /// Schedules a re-read of the lists on the next tick.
    pub fn request_refresh(&mut self) {
        self.refresh_pending = true;
    }

    // ------------------------------------------------------------------
    // Sampling interval
    // ------------------------------------------------------------------

    pub fn sample_interval(&self) -> Duration {
        self.throttle.interval()
    }

    pub fn sample_interval_label(&self) -> String {
        self.throttle.format_interval()
    }

    pub fn slow_down_sampling(&mut self) {
        self.throttle.slow_down();
        self.log_interval_change();
    }

    pub fn speed_up_sampling(&mut self) {
        self.throttle.speed_up();
        self.log_interval_change();
    }

    fn log_interval_change(&self) {
        info!(
            interval_ms = self.sample_interval().as_millis() as u64,
            "sampling interval changed"
        );
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    pub fn filtered(&self) -> &FilteredView {
        self.filter.view()
    }

    pub fn cpu_history(&self) -> &RollingHistory {
        &self.cpu_history
    }

    pub fn ram_history(&self) -> &RollingHistory {
        &self.ram_history
    }

    /// Non-loopback interfaces from the latest snapshot.
    pub fn interfaces(&self) -> &[NetworkInterfaceSnapshot] {
        &self.snapshot.interfaces
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Releases the sample source and its OS handles.
    pub fn shutdown(self) {
        info!(samples = self.cpu_history.len(), "overlay state shut down");
        drop(self.source);
    }

    #[cfg(test)]
    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[cfg(test)]
    pub(crate) fn control(&self) -> &C {
        &self.control
    }
}
