// Scheduling statistics
use crate::console::Console;
use crate::process::pcb::{ProcessId, ProcessType};
use crate::process::policy::SchedulingAlgorithm;

/// Dispatch counters per workload class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    schedule_count: [u64; 3],
    total_schedules: u64,
    total_switches: u64,
}

impl ScheduleStats {
    pub const fn new() -> Self {
        Self {
            schedule_count: [0; 3],
            total_schedules: 0,
            total_switches: 0,
        }
    }

    /// Count one dispatch. Processes without a known type only count as a
    /// switch.
    pub fn record(&mut self, process_type: Option<ProcessType>) {
        self.total_switches += 1;
        if let Some(ty) = process_type {
            self.schedule_count[ty.index()] += 1;
            self.total_schedules += 1;
        }
    }

    pub fn count(&self, process_type: ProcessType) -> u64 {
        self.schedule_count[process_type.index()]
    }

    pub fn total_schedules(&self) -> u64 {
        self.total_schedules
    }

    pub fn total_switches(&self) -> u64 {
        self.total_switches
    }

    /// Whole-number share of typed dispatches, 0 when nothing was counted.
    pub fn percentage(&self, process_type: ProcessType) -> u64 {
        if self.total_schedules == 0 {
            0
        } else {
            self.count(process_type) * 100 / self.total_schedules
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn print(&self, console: &Console) {
        console.line(format_args!(""));
        console.line(format_args!("=== ML Scheduling Statistics ==="));
        console.line(format_args!("Process Type  Schedules  Percentage"));
        console.line(format_args!("------------  ---------  ----------"));
        for ty in ProcessType::ALL {
            console.line(format_args!(
                "{:<14}{:<11}{}%",
                ty.label(),
                self.count(ty),
                self.percentage(ty)
            ));
        }
        console.line(format_args!("Total: {} schedules", self.total_schedules));
        console.line(format_args!("==============================="));
    }
}

/// Point-in-time view of the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    pub current_process: ProcessId,
    pub algorithm: SchedulingAlgorithm,
    pub total_switches: u64,
    pub live_processes: usize,
    pub ready_processes: usize,
    pub blocked_processes: usize,
    pub feature_entries: usize,
}
