// Process-wide scheduler instance for shell-like callers
//
// The scheduler itself is a plain value. This module keeps one behind a spin
// mutex so code without a handle (demo bodies, a command interpreter) can
// reach it. The lock is only held for the duration of each call, so a body
// may call `yield_process` from inside a harness that looked it up.
use alloc::vec::Vec;
use lazy_static::lazy_static;
use spin::Mutex;

use crate::config::SchedulerConfig;
use crate::console::global_console;
use crate::process::features::{FeatureEntry, FeatureError};
use crate::process::pcb::{ProcessEntry, ProcessError, ProcessId, ProcessInfo};
use crate::process::policy::SchedulingAlgorithm;
use crate::process::scheduler::ProcessScheduler;
use crate::process::stats::SchedulerStats;

lazy_static! {
    pub static ref SCHEDULER: Mutex<ProcessScheduler> =
        Mutex::new(ProcessScheduler::new(SchedulerConfig::default(), global_console()));
}

/// Run `f` with the process-wide scheduler locked.
pub fn with_scheduler<R>(f: impl FnOnce(&mut ProcessScheduler) -> R) -> R {
    let mut scheduler = SCHEDULER.lock();
    f(&mut *scheduler)
}

/// Replace the process-wide scheduler with a fresh one built from `config`.
pub fn reset(config: SchedulerConfig) {
    *SCHEDULER.lock() = ProcessScheduler::new(config, global_console());
}

pub fn create_process(entry: ProcessEntry, name: &str, process_type: i32) -> Result<ProcessId, ProcessError> {
    SCHEDULER.lock().create_process(entry, name, process_type)
}

pub fn register_features(pid: ProcessId, process_type: i32) -> Result<FeatureEntry, FeatureError> {
    SCHEDULER.lock().register_features(pid, process_type)
}

pub fn exit_process() -> Result<ProcessId, ProcessError> {
    SCHEDULER.lock().exit_current()
}

pub fn block_process() -> Result<ProcessId, ProcessError> {
    SCHEDULER.lock().block_current()
}

pub fn unblock_process(pid: ProcessId) -> Result<(), ProcessError> {
    SCHEDULER.lock().unblock(pid)
}

pub fn yield_process() -> Option<ProcessId> {
    SCHEDULER.lock().yield_now()
}

pub fn set_scheduler_type(algorithm: SchedulingAlgorithm) {
    SCHEDULER.lock().set_scheduler_type(algorithm);
}

pub fn current_process() -> Option<ProcessInfo> {
    SCHEDULER.lock().current_process()
}

pub fn list_processes() -> Vec<ProcessInfo> {
    SCHEDULER.lock().processes()
}

pub fn feature_table() -> Vec<FeatureEntry> {
    SCHEDULER.lock().feature_entries().to_vec()
}

pub fn scheduler_stats() -> SchedulerStats {
    SCHEDULER.lock().stats()
}

pub fn print_process_table() {
    SCHEDULER.lock().print_process_table();
}

pub fn print_feature_stats() {
    SCHEDULER.lock().print_feature_stats();
}

pub fn print_scheduling_stats() {
    SCHEDULER.lock().print_scheduling_stats();
}
