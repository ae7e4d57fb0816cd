// Process Control Block (PCB) for the cooperative scheduler
use alloc::string::String;
use core::fmt;

use crate::config::MAX_NAME_LEN;

/// Process ID type
pub type ProcessId = u32;

/// Index of a slot in the process table arena
pub type SlotIndex = usize;

/// PID of the built-in idle process
pub const IDLE_PID: ProcessId = 0;

/// Slot occupied by the idle process
pub const IDLE_SLOT: SlotIndex = 0;

/// Opaque process body. Stored and handed back, never called by the core.
pub type ProcessEntry = fn();

/// Process state enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    New,        // Slot never used
    Ready,      // Waiting to be selected
    Running,    // Selected by the last dispatch
    Blocked,    // Linked in the ready queue but not selectable
    Terminated, // Exited, slot reusable
}

impl ProcessState {
    /// A slot in this state may be handed out by `create`.
    pub fn is_free(self) -> bool {
        matches!(self, ProcessState::New | ProcessState::Terminated)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Blocked => "BLOCKED",
            ProcessState::Terminated => "TERMINATED",
        }
    }
}

/// Workload classes known to the burst predictor
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessType {
    Cpu = 0,
    Io = 1,
    Ml = 2,
}

impl ProcessType {
    pub const ALL: [ProcessType; 3] = [ProcessType::Cpu, ProcessType::Io, ProcessType::Ml];

    /// Decode a raw type code; anything outside 0..=2 is unknown.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ProcessType::Cpu),
            1 => Some(ProcessType::Io),
            2 => Some(ProcessType::Ml),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessType::Cpu => "CPU",
            ProcessType::Io => "IO",
            ProcessType::Ml => "ML",
        }
    }
}

impl From<ProcessType> for i32 {
    fn from(ty: ProcessType) -> i32 {
        ty.as_raw()
    }
}

/// Process Control Block
#[derive(Debug, Clone)]
pub struct ProcessControlBlock {
    pub pid: ProcessId,
    pub state: ProcessState,
    pub name: String,
    /// Kept for parity with the process table layout; no policy reads it.
    pub priority: i32,
    /// Kept for parity with the process table layout; no policy reads it.
    pub time_slice: u32,
    pub entry: Option<ProcessEntry>,
    /// Ready queue link. Only meaningful while the record is linked.
    pub(crate) next: SlotIndex,
}

impl ProcessControlBlock {
    /// An unused slot. Its link points at itself.
    pub fn empty(slot: SlotIndex) -> Self {
        Self {
            pid: 0,
            state: ProcessState::New,
            name: String::new(),
            priority: 0,
            time_slice: 0,
            entry: None,
            next: slot,
        }
    }

    pub fn next(&self) -> SlotIndex {
        self.next
    }

    pub fn set_name(&mut self, name: &str) {
        self.name.clear();
        self.name.extend(name.chars().take(MAX_NAME_LEN));
    }

    pub fn is_live(&self) -> bool {
        !matches!(self.state, ProcessState::New | ProcessState::Terminated)
    }
}

/// Read-only view of a process, handed to shell-like callers
#[derive(Debug, Clone)]
pub struct ProcessInfo {
    pub slot: SlotIndex,
    pub pid: ProcessId,
    pub state: ProcessState,
    pub name: String,
    pub priority: i32,
    pub time_slice: u32,
    pub entry: Option<ProcessEntry>,
}

impl ProcessInfo {
    pub fn from_pcb(slot: SlotIndex, pcb: &ProcessControlBlock) -> Self {
        Self {
            slot,
            pid: pcb.pid,
            state: pcb.state,
            name: pcb.name.clone(),
            priority: pcb.priority,
            time_slice: pcb.time_slice,
            entry: pcb.entry,
        }
    }
}

/// Process management errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessError {
    TableFull,
    ProcessNotFound,
    ProcessNotBlocked,
    IdleProcess,
    NoRunnableProcess,
    NotRunning,
    PidsExhausted,
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProcessError::TableFull => write!(f, "Process table full"),
            ProcessError::ProcessNotFound => write!(f, "Process not found"),
            ProcessError::ProcessNotBlocked => write!(f, "Process not blocked"),
            ProcessError::IdleProcess => write!(f, "Operation not permitted on the idle process"),
            ProcessError::NoRunnableProcess => write!(f, "No other process can run"),
            ProcessError::NotRunning => write!(f, "Current process is not running"),
            ProcessError::PidsExhausted => write!(f, "Process IDs exhausted"),
        }
    }
}
