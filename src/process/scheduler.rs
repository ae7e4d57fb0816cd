// Process scheduler context
//
// One `ProcessScheduler` value owns the process table, the ready queue, the
// feature store, the active policy and the current pointer. Nothing here is
// global; see `services::process_service` for the process-wide instance.
use alloc::vec::Vec;

use crate::config::SchedulerConfig;
use crate::console::Console;
use crate::process::features::{FeatureEntry, FeatureError, FeatureStore};
use crate::process::pcb::{
    ProcessEntry, ProcessError, ProcessId, ProcessInfo, ProcessState, SlotIndex, IDLE_SLOT,
};
use crate::process::policy::SchedulingAlgorithm;
use crate::process::stats::{ScheduleStats, SchedulerStats};
use crate::process::table::ProcessTable;
use crate::{kerror, kinfo};

pub(crate) const TAG: &str = "PROCESS";

pub struct ProcessScheduler {
    pub(crate) table: ProcessTable,
    pub(crate) features: FeatureStore,
    pub(crate) algorithm: SchedulingAlgorithm,
    pub(crate) current: SlotIndex,
    pub(crate) stats: ScheduleStats,
    pub(crate) console: Console,
    config: SchedulerConfig,
}

impl ProcessScheduler {
    pub fn new(config: SchedulerConfig, console: Console) -> Self {
        let mut scheduler = Self {
            table: ProcessTable::new(config.max_processes, &config.idle_name),
            features: FeatureStore::new(config.features.clone(), console.clone()),
            algorithm: config.algorithm,
            current: IDLE_SLOT,
            stats: ScheduleStats::new(),
            console,
            config,
        };
        scheduler.init();
        scheduler
    }

    /// Reset to the freshly booted state: only idle exists and runs, the
    /// feature store is empty and the configured policy is active.
    pub fn init(&mut self) {
        kinfo!(self.console, TAG, "Initializing Process Manager...");
        self.table.init(&self.config.idle_name);
        self.features.clear();
        self.algorithm = self.config.algorithm;
        self.current = IDLE_SLOT;
        self.stats.reset();
        kinfo!(self.console, TAG, "Process Manager Ready");
    }

    /// Create a Ready process at the tail of the ready queue and register its
    /// features. A failed registration is logged by the store and otherwise
    /// ignored: the process is still created and only round robin will ever
    /// pick it.
    pub fn create_process(&mut self, entry: ProcessEntry, name: &str, process_type: i32) -> Result<ProcessId, ProcessError> {
        let (slot, pid) = match self.table.create(Some(entry), name) {
            Ok(created) => created,
            Err(e) => {
                kerror!(self.console, TAG, "Error: {}", e);
                return Err(e);
            }
        };

        let _ = self.features.register(pid, process_type);

        if let Some(pcb) = self.table.get(slot) {
            kinfo!(self.console, TAG, "Created process: {} (PID: {})", pcb.name, pid);
        }
        Ok(pid)
    }

    /// Register features for an existing pid. Exposed for callers that
    /// classify a process after creating it.
    pub fn register_features(&mut self, pid: ProcessId, process_type: i32) -> Result<FeatureEntry, FeatureError> {
        self.features.register(pid, process_type)
    }

    /// Terminate the current process, unlink it from the ready queue and
    /// reschedule. Returns the pid that exited.
    ///
    /// Idle may exit too. The call is refused only when no other record could
    /// take over, so one record is always Running.
    pub fn exit_current(&mut self) -> Result<ProcessId, ProcessError> {
        let slot = self.current;
        let pid = self.running_pid()?;
        self.ensure_successor()?;

        self.table.terminate(slot)?;
        self.features.on_exit(pid);
        if let Some(pcb) = self.table.get(slot) {
            kinfo!(self.console, TAG, "Process terminated: {}", pcb.name);
        }

        self.yield_now();
        Ok(pid)
    }

    /// Block the current process and reschedule. The record stays linked in
    /// the ready queue but is skipped until `unblock`.
    pub fn block_current(&mut self) -> Result<ProcessId, ProcessError> {
        let slot = self.current;
        let pid = self.running_pid()?;
        self.ensure_successor()?;

        self.table.set_state(slot, ProcessState::Blocked)?;
        if let Some(pcb) = self.table.get(slot) {
            kinfo!(self.console, TAG, "Process blocked: {}", pcb.name);
        }

        self.yield_now();
        Ok(pid)
    }

    pub fn unblock(&mut self, pid: ProcessId) -> Result<(), ProcessError> {
        let slot = self.table.find_slot(pid).ok_or(ProcessError::ProcessNotFound)?;
        match self.table.get(slot).map(|pcb| pcb.state) {
            Some(ProcessState::Blocked) => {
                self.table.set_state(slot, ProcessState::Ready)?;
                kinfo!(self.console, TAG, "Process unblocked: PID {}", pid);
                Ok(())
            }
            _ => Err(ProcessError::ProcessNotBlocked),
        }
    }

    /// Switch the policy used by the next yield.
    pub fn set_scheduler_type(&mut self, algorithm: SchedulingAlgorithm) {
        self.algorithm = algorithm;
        kinfo!(self.console, TAG, "Scheduler set to: {}", algorithm.name());
    }

    pub fn scheduler_type(&self) -> SchedulingAlgorithm {
        self.algorithm
    }

    pub fn current_pid(&self) -> ProcessId {
        self.table.get(self.current).map_or(0, |pcb| pcb.pid)
    }

    pub fn current_slot(&self) -> SlotIndex {
        self.current
    }

    pub fn current_process(&self) -> Option<ProcessInfo> {
        self.table
            .get(self.current)
            .map(|pcb| ProcessInfo::from_pcb(self.current, pcb))
    }

    /// Body of the current process, for a harness that runs it.
    pub fn current_entry(&self) -> Option<ProcessEntry> {
        self.table.get(self.current).and_then(|pcb| pcb.entry)
    }

    pub fn lookup(&self, pid: ProcessId) -> Option<ProcessInfo> {
        let slot = self.table.find_slot(pid)?;
        self.table.get(slot).map(|pcb| ProcessInfo::from_pcb(slot, pcb))
    }

    pub fn processes(&self) -> Vec<ProcessInfo> {
        self.table.processes()
    }

    /// Pids in ready queue order from the head.
    pub fn ready_order(&self) -> Vec<ProcessId> {
        self.table
            .ready_order()
            .into_iter()
            .filter_map(|slot| self.table.get(slot).map(|pcb| pcb.pid))
            .collect()
    }

    pub fn table(&self) -> &ProcessTable {
        &self.table
    }

    pub fn features(&self) -> &FeatureStore {
        &self.features
    }

    pub fn feature_entries(&self) -> &[FeatureEntry] {
        self.features.entries()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn schedule_stats(&self) -> &ScheduleStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            current_process: self.current_pid(),
            algorithm: self.algorithm,
            total_switches: self.stats.total_switches(),
            live_processes: self.table.live_count(),
            ready_processes: self.table.count_in(ProcessState::Ready),
            blocked_processes: self.table.count_in(ProcessState::Blocked),
            feature_entries: self.features.len(),
        }
    }

    pub fn print_process_table(&self) {
        self.console.line(format_args!(""));
        self.console.line(format_args!("=== Process Table ==="));
        self.console.line(format_args!("Slot PID State Name"));
        for info in self.table.processes() {
            self.console.line(format_args!(
                "{} {} {} {}",
                info.slot,
                info.pid,
                info.state.as_str(),
                info.name
            ));
        }
        self.console.line(format_args!("===================="));
    }

    pub fn print_feature_stats(&self) {
        self.features.print_stats();
    }

    pub fn print_scheduling_stats(&self) {
        self.stats.print(&self.console);
    }

    /// Fails when the current process is the only one that can run.
    fn ensure_successor(&self) -> Result<(), ProcessError> {
        if self.successor().is_some() {
            return Ok(());
        }
        let err = if self.current == IDLE_SLOT {
            ProcessError::IdleProcess
        } else {
            ProcessError::NoRunnableProcess
        };
        kerror!(self.console, TAG, "Error: {}", err);
        Err(err)
    }

    /// Pid of the current record, which must be Running.
    fn running_pid(&self) -> Result<ProcessId, ProcessError> {
        match self.table.get(self.current) {
            Some(pcb) if pcb.state == ProcessState::Running => Ok(pcb.pid),
            Some(_) => Err(ProcessError::NotRunning),
            None => Err(ProcessError::ProcessNotFound),
        }
    }
}
