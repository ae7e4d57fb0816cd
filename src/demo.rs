// Demo workload: three process bodies and a harness that runs them
//
// Each body does one slice of "work", logs it and yields through the
// process-wide scheduler. Because yielding never parks the caller, a body
// returns after its yield and the harness picks up whatever is current next.
use alloc::vec::Vec;

use crate::console::global_console;
use crate::kinfo;
use crate::process::pcb::{ProcessEntry, ProcessError, ProcessId, ProcessType};
use crate::services::process_service::{create_process, with_scheduler, yield_process};

pub fn cpu_process() {
    kinfo!(global_console(), "CPU", "Process running");
    yield_process();
}

pub fn io_process() {
    kinfo!(global_console(), "IO", "Process running");
    yield_process();
}

pub fn ml_process() {
    kinfo!(global_console(), "ML", "Process running");
    yield_process();
}

/// Body and display name used for a demo process of `process_type`.
pub fn demo_body(process_type: ProcessType) -> (ProcessEntry, &'static str) {
    match process_type {
        ProcessType::Cpu => (cpu_process as ProcessEntry, "CPU_Process"),
        ProcessType::Io => (io_process as ProcessEntry, "IO_Process"),
        ProcessType::Ml => (ml_process as ProcessEntry, "ML_Process"),
    }
}

/// Start one demo process of the given class.
pub fn spawn(process_type: ProcessType) -> Result<ProcessId, ProcessError> {
    let (entry, name) = demo_body(process_type);
    create_process(entry, name, process_type.as_raw())
}

/// Create the CPU, IO and ML demo processes, in that order.
pub fn spawn_demo_processes() -> Result<[ProcessId; 3], ProcessError> {
    kinfo!(global_console(), "DEMO", "Creating Demo Processes");
    let cpu = spawn(ProcessType::Cpu)?;
    let io = spawn(ProcessType::Io)?;
    let ml = spawn(ProcessType::Ml)?;
    kinfo!(global_console(), "DEMO", "Demo Processes Created");
    Ok([cpu, io, ml])
}

/// Run `steps` slices. Each slice invokes the current process's body, or
/// yields directly when the current process has none (idle). Returns the pid
/// that was current at the start of every slice.
pub fn run_demo(steps: usize) -> Vec<ProcessId> {
    let mut trace = Vec::with_capacity(steps);
    for _ in 0..steps {
        let (pid, entry) = with_scheduler(|s| (s.current_pid(), s.current_entry()));
        trace.push(pid);
        match entry {
            Some(body) => body(),
            None => {
                yield_process();
            }
        }
    }
    trace
}
