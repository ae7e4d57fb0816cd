// Scheduler configuration
use alloc::string::String;

use crate::process::features::{BurstTable, DuplicatePolicy, StalePolicy};
use crate::process::policy::SchedulingAlgorithm;

/// Number of process table slots, idle slot included
pub const MAX_PROCESSES: usize = 16;

/// Number of feature entries the store can hold
pub const MAX_FEATURE_ENTRIES: usize = 16;

/// Longest process name kept in a PCB
pub const MAX_NAME_LEN: usize = 31;

/// Feature store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureConfig {
    pub capacity: usize,
    pub burst_table: BurstTable,
    pub duplicates: DuplicatePolicy,
    pub stale_entries: StalePolicy,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_FEATURE_ENTRIES,
            burst_table: BurstTable::default(),
            duplicates: DuplicatePolicy::Append,
            stale_entries: StalePolicy::Retain,
        }
    }
}

/// Scheduler configuration, fixed at construction except for `algorithm`,
/// which can be switched later with `set_scheduler_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub max_processes: usize,
    pub algorithm: SchedulingAlgorithm,
    pub idle_name: String,
    pub features: FeatureConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_processes: MAX_PROCESSES,
            algorithm: SchedulingAlgorithm::RoundRobin,
            idle_name: String::from("idle"),
            features: FeatureConfig::default(),
        }
    }
}

impl SchedulerConfig {
    pub fn with_algorithm(mut self, algorithm: SchedulingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.max_processes = max_processes;
        self
    }

    pub fn with_features(mut self, features: FeatureConfig) -> Self {
        self.features = features;
        self
    }
}
