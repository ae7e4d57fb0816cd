// Process management for the cooperative scheduler
pub mod dispatcher;
pub mod features;
pub mod pcb;
pub mod policy;
pub mod ready_queue;
pub mod scheduler;
pub mod stats;
pub mod table;

pub use features::{
    BurstTable, DuplicatePolicy, FeatureEntry, FeatureError, FeatureStore, StalePolicy,
    DEFAULT_BURST, ZERO_BURST_SCORE,
};
pub use pcb::{
    ProcessControlBlock, ProcessEntry, ProcessError, ProcessId, ProcessInfo, ProcessState,
    ProcessType, SlotIndex, IDLE_PID, IDLE_SLOT,
};
pub use policy::SchedulingAlgorithm;
pub use ready_queue::{ReadyIter, ReadyQueue};
pub use scheduler::ProcessScheduler;
pub use stats::{ScheduleStats, SchedulerStats};
pub use table::ProcessTable;
