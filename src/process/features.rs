// Feature store: predicted burst and priority score per process
use alloc::vec::Vec;
use core::fmt;

use crate::config::FeatureConfig;
use crate::console::Console;
use crate::process::pcb::{ProcessId, ProcessType};
use crate::{kdebug, kerror, kinfo, kwarn};

/// Burst returned for a type code the table does not know
pub const DEFAULT_BURST: u32 = 5;

/// Score given to a process whose burst resolved to zero
pub const ZERO_BURST_SCORE: f32 = 0.1;

const TAG: &str = "ML";

/// Predicted burst length per workload class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstTable {
    pub cpu: u32,
    pub io: u32,
    pub ml: u32,
}

impl Default for BurstTable {
    fn default() -> Self {
        Self { cpu: 8, io: 4, ml: 6 }
    }
}

impl BurstTable {
    pub fn burst_for(&self, process_type: ProcessType) -> u32 {
        match process_type {
            ProcessType::Cpu => self.cpu,
            ProcessType::Io => self.io,
            ProcessType::Ml => self.ml,
        }
    }
}

/// What to do when a pid is registered a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Append another entry. Lookups only ever see the first one.
    Append,
    /// Refuse with `FeatureError::DuplicatePid`.
    Reject,
}

/// What happens to a pid's entries when the process exits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalePolicy {
    /// Entries stay behind and keep occupying capacity.
    Retain,
    /// Entries are removed on exit.
    Reclaim,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureEntry {
    pub pid: ProcessId,
    pub process_type: ProcessType,
    pub predicted_burst: u32,
    pub priority_score: f32,
}

/// Feature registration errors
///
/// An unknown burst has no variant of its own: the only way to miss the burst
/// table is an unknown type code, which `predict_burst` logs and answers with
/// `DEFAULT_BURST`, and which `register` reports as `InvalidProcessType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureError {
    InvalidPid(ProcessId),
    InvalidProcessType(i32),
    DuplicatePid(ProcessId),
    StoreFull,
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FeatureError::InvalidPid(pid) => write!(f, "Invalid PID: {}", pid),
            FeatureError::InvalidProcessType(ty) => write!(f, "Invalid process type: {}", ty),
            FeatureError::DuplicatePid(pid) => write!(f, "PID {} already registered", pid),
            FeatureError::StoreFull => write!(f, "Feature store full"),
        }
    }
}

/// Score for a predicted burst: `1/burst`, or the floor score for zero.
pub fn priority_score(burst: u32) -> f32 {
    if burst == 0 {
        ZERO_BURST_SCORE
    } else {
        1.0 / burst as f32
    }
}

/// Bounded, append-only list of feature entries. Lookup is a linear scan and
/// the first entry for a pid wins.
pub struct FeatureStore {
    entries: Vec<FeatureEntry>,
    config: FeatureConfig,
    console: Console,
}

impl FeatureStore {
    pub fn new(config: FeatureConfig, console: Console) -> Self {
        Self {
            entries: Vec::with_capacity(config.capacity),
            config,
            console,
        }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Predicted burst for a raw type code. Unknown codes log a warning and
    /// fall back to `DEFAULT_BURST`.
    pub fn predict_burst(&self, process_type: i32) -> u32 {
        match ProcessType::from_raw(process_type) {
            Some(ty) => {
                let burst = self.config.burst_table.burst_for(ty);
                kdebug!(self.console, TAG, "Predict - Type: {} -> Burst: {}", process_type, burst);
                burst
            }
            None => {
                kwarn!(self.console, TAG, "Invalid process type: {}", process_type);
                DEFAULT_BURST
            }
        }
    }

    /// Append one entry for `pid`. Every failure is logged and leaves the
    /// store untouched.
    pub fn register(&mut self, pid: ProcessId, process_type: i32) -> Result<FeatureEntry, FeatureError> {
        if pid == 0 {
            kerror!(self.console, TAG, "Invalid PID: {}", pid);
            return Err(FeatureError::InvalidPid(pid));
        }

        let ty = match ProcessType::from_raw(process_type) {
            Some(ty) => ty,
            None => {
                kerror!(self.console, TAG, "Invalid process type for PID {}: {}", pid, process_type);
                return Err(FeatureError::InvalidProcessType(process_type));
            }
        };

        if self.config.duplicates == DuplicatePolicy::Reject && self.lookup(pid).is_some() {
            kerror!(self.console, TAG, "PID {} already registered", pid);
            return Err(FeatureError::DuplicatePid(pid));
        }

        if self.entries.len() >= self.config.capacity {
            kerror!(self.console, TAG, "Feature store full, PID {} not registered", pid);
            return Err(FeatureError::StoreFull);
        }

        let predicted_burst = self.predict_burst(process_type);
        if predicted_burst == 0 {
            kwarn!(self.console, TAG, "Zero burst detected for PID {}, using default priority", pid);
        }

        let entry = FeatureEntry {
            pid,
            process_type: ty,
            predicted_burst,
            priority_score: priority_score(predicted_burst),
        };
        self.entries.push(entry);

        kinfo!(
            self.console,
            TAG,
            "Process {}: Type={}, Predicted burst={}, Priority={:.2}",
            pid,
            process_type,
            predicted_burst,
            entry.priority_score
        );
        Ok(entry)
    }

    /// First entry registered for `pid`.
    pub fn lookup(&self, pid: ProcessId) -> Option<&FeatureEntry> {
        self.entries.iter().find(|entry| entry.pid == pid)
    }

    pub fn entries(&self) -> &[FeatureEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry for `pid`, returning how many were dropped.
    pub fn reclaim(&mut self, pid: ProcessId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.pid != pid);
        before - self.entries.len()
    }

    /// Exit hook, applies the configured stale-entry policy.
    pub fn on_exit(&mut self, pid: ProcessId) {
        if self.config.stale_entries == StalePolicy::Reclaim {
            let dropped = self.reclaim(pid);
            kdebug!(self.console, TAG, "Reclaimed {} entries for PID {}", dropped, pid);
        }
    }

    pub fn print_stats(&self) {
        self.console.line(format_args!(""));
        self.console.line(format_args!("=== ML Scheduler Stats ==="));
        self.console.line(format_args!("PID Type Prediction Priority"));
        for entry in &self.entries {
            self.console.line(format_args!(
                "{} {:<4} {} {:.2}",
                entry.pid,
                entry.process_type.label(),
                entry.predicted_burst,
                entry.priority_score
            ));
        }
        self.console.line(format_args!("=========================="));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{BufferSink, LogLevel};
    use alloc::sync::Arc;

    fn store_with(config: FeatureConfig) -> (FeatureStore, Arc<BufferSink>) {
        let sink = Arc::new(BufferSink::new(64));
        let console = Console::new(sink.clone(), LogLevel::Debug);
        (FeatureStore::new(config, console), sink)
    }

    fn store() -> (FeatureStore, Arc<BufferSink>) {
        store_with(FeatureConfig::default())
    }

    #[test]
    fn predicts_fixed_bursts_per_type() {
        let (store, _) = store();
        assert_eq!(store.predict_burst(0), 8);
        assert_eq!(store.predict_burst(1), 4);
        assert_eq!(store.predict_burst(2), 6);
    }

    #[test]
    fn unknown_type_predicts_default_and_warns() {
        let (store, sink) = store();
        assert_eq!(store.predict_burst(9), DEFAULT_BURST);
        assert!(sink.drain().iter().any(|l| l == "[ML WARNING] Invalid process type: 9"));
        assert!(store.is_empty());
    }

    #[test]
    fn scores_are_inverse_bursts() {
        let (mut store, _) = store();
        let cpu = store.register(1, 0).unwrap();
        let io = store.register(2, 1).unwrap();
        let ml = store.register(3, 2).unwrap();
        assert!((cpu.priority_score - 0.125).abs() < 1e-6);
        assert!((io.priority_score - 0.25).abs() < 1e-6);
        assert!((ml.priority_score - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn zero_burst_gets_floor_score() {
        let config = FeatureConfig {
            burst_table: BurstTable { cpu: 8, io: 0, ml: 6 },
            ..FeatureConfig::default()
        };
        let (mut store, sink) = store_with(config);
        let entry = store.register(4, 1).unwrap();
        assert_eq!(entry.predicted_burst, 0);
        assert_eq!(entry.priority_score, ZERO_BURST_SCORE);
        assert!(sink
            .drain()
            .iter()
            .any(|l| l == "[ML WARNING] Zero burst detected for PID 4, using default priority"));
    }

    #[test]
    fn invalid_registration_leaves_store_unchanged() {
        let (mut store, sink) = store();
        assert_eq!(store.register(0, 1), Err(FeatureError::InvalidPid(0)));
        assert_eq!(store.register(5, 3), Err(FeatureError::InvalidProcessType(3)));
        assert_eq!(store.register(5, -1), Err(FeatureError::InvalidProcessType(-1)));
        assert!(store.is_empty());
        let lines = sink.drain();
        assert!(lines.iter().any(|l| l == "[ML ERROR] Invalid PID: 0"));
        assert!(lines.iter().any(|l| l == "[ML ERROR] Invalid process type for PID 5: 3"));
    }

    #[test]
    fn duplicate_registration_appends_and_first_wins() {
        let (mut store, _) = store();
        store.register(1, 0).unwrap();
        store.register(1, 1).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup(1).unwrap().process_type, ProcessType::Cpu);
    }

    #[test]
    fn duplicate_registration_can_be_rejected() {
        let config = FeatureConfig {
            duplicates: DuplicatePolicy::Reject,
            ..FeatureConfig::default()
        };
        let (mut store, _) = store_with(config);
        store.register(1, 0).unwrap();
        assert_eq!(store.register(1, 1), Err(FeatureError::DuplicatePid(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn full_store_refuses_new_entries() {
        let config = FeatureConfig {
            capacity: 2,
            ..FeatureConfig::default()
        };
        let (mut store, _) = store_with(config);
        store.register(1, 0).unwrap();
        store.register(2, 0).unwrap();
        assert_eq!(store.register(3, 0), Err(FeatureError::StoreFull));
        assert!(store.lookup(3).is_none());
    }

    #[test]
    fn exit_hook_respects_stale_policy() {
        let (mut retain, _) = store();
        retain.register(1, 0).unwrap();
        retain.on_exit(1);
        assert!(retain.lookup(1).is_some());

        let config = FeatureConfig {
            stale_entries: StalePolicy::Reclaim,
            ..FeatureConfig::default()
        };
        let (mut reclaim, _) = store_with(config);
        reclaim.register(1, 0).unwrap();
        reclaim.register(1, 2).unwrap();
        reclaim.on_exit(1);
        assert!(reclaim.lookup(1).is_none());
        assert!(reclaim.is_empty());
    }

    #[test]
    fn stats_report_lists_every_entry() {
        let (mut store, sink) = store();
        store.register(2, 1).unwrap();
        sink.drain();
        store.print_stats();
        let lines = sink.drain();
        assert_eq!(lines[1], "=== ML Scheduler Stats ===");
        assert_eq!(lines[3], "2 IO   4 0.25");
    }
}
