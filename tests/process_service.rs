// The process-wide scheduler is shared by every test in this binary, so the
// whole flow lives in one test.
use std::sync::Arc;

use mlos::demo::{run_demo, spawn, spawn_demo_processes};
use mlos::services::process_service::{
    block_process, create_process, current_process, exit_process, feature_table, list_processes,
    print_process_table, print_scheduling_stats, reset, scheduler_stats, set_scheduler_type,
    unblock_process, yield_process,
};
use mlos::{
    install_console, BufferSink, Console, ConsoleError, LogLevel, ProcessState, ProcessType,
    SchedulerConfig, SchedulingAlgorithm,
};

fn noop() {}

#[test]
fn demo_workload_through_process_wide_scheduler() {
    let sink = Arc::new(BufferSink::new(1024));
    install_console(Console::new(sink.clone(), LogLevel::Info)).unwrap();
    assert_eq!(
        install_console(Console::null()),
        Err(ConsoleError::AlreadyInstalled)
    );
    reset(SchedulerConfig::default());

    let [cpu, io, ml] = spawn_demo_processes().unwrap();
    assert_eq!([cpu, io, ml], [1, 2, 3]);
    assert_eq!(list_processes().len(), 4);
    assert_eq!(feature_table().len(), 3);

    set_scheduler_type(SchedulingAlgorithm::PriorityFeatureBased);
    sink.drain();

    // idle yields straight to IO, after which IO and ML hand over to each other
    assert_eq!(run_demo(4), vec![0, io, ml, io]);
    let lines = sink.drain();
    assert!(lines.contains(&"[IO] Process running".to_string()));
    assert!(lines.contains(&"[ML] Process running".to_string()));
    assert!(!lines.contains(&"[CPU] Process running".to_string()));

    // ML is current now; exiting it leaves IO as the best candidate
    assert_eq!(current_process().unwrap().pid, ml);
    assert_eq!(exit_process(), Ok(ml));
    assert_eq!(current_process().unwrap().pid, io);
    let exited = list_processes().into_iter().find(|p| p.pid == ml).unwrap();
    assert_eq!(exited.state, ProcessState::Terminated);
    assert_eq!(feature_table().len(), 3);

    // blocking IO hands over to CPU, the only other scored process
    assert_eq!(block_process(), Ok(io));
    assert_eq!(current_process().unwrap().pid, cpu);
    unblock_process(io).unwrap();
    assert_eq!(yield_process(), Some(io));

    set_scheduler_type(SchedulingAlgorithm::RoundRobin);
    let extra = spawn(ProcessType::Cpu).unwrap();
    assert_eq!(extra, 4);
    let plain = create_process(noop, "plain", 9).unwrap();
    assert_eq!(plain, 5);
    assert_eq!(feature_table().len(), 4);

    let stats = scheduler_stats();
    assert_eq!(stats.algorithm, SchedulingAlgorithm::RoundRobin);
    assert_eq!(stats.current_process, io);
    assert_eq!(stats.live_processes, 5);

    sink.drain();
    print_process_table();
    print_scheduling_stats();
    let report = sink.drain();
    assert!(report.contains(&"=== Process Table ===".to_string()));
    assert!(report.contains(&"=== ML Scheduling Statistics ===".to_string()));
}
