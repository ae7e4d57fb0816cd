//! Cooperative process scheduler with a round-robin policy and a
//! feature-based priority policy.
//!
//! A [`ProcessScheduler`] owns a fixed-capacity process table, the circular
//! ready queue threaded through it, and a feature store holding a predicted
//! burst and priority score per process. `yield_now` asks the active policy
//! for the next process and updates bookkeeping only: no execution context is
//! saved or switched, and the caller keeps running after it returns.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod console;
pub mod demo;
pub mod process;
pub mod services;

pub use config::{FeatureConfig, SchedulerConfig, MAX_FEATURE_ENTRIES, MAX_NAME_LEN, MAX_PROCESSES};
pub use console::{
    global_console, install_console, BufferSink, Console, ConsoleError, ConsoleSink, LogLevel,
    NullSink,
};
pub use process::{
    ProcessError, ProcessId, ProcessInfo, ProcessScheduler, ProcessState, ProcessType,
    SchedulingAlgorithm,
};
