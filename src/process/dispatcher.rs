// Cooperative dispatcher
//
// `yield_now` only moves bookkeeping. The caller keeps executing after it
// returns, whichever record is current by then; no stack or register state is
// saved or restored.
use crate::kinfo;
use crate::process::pcb::{ProcessId, ProcessState, SlotIndex, IDLE_SLOT};
use crate::process::policy::SchedulingAlgorithm;
use crate::process::scheduler::{ProcessScheduler, TAG};

impl ProcessScheduler {
    /// Ask the active policy for the next process and commit the switch.
    /// Returns the pid switched to, or `None` when the current process keeps
    /// running.
    ///
    /// When the current process has just exited or blocked and the policy has
    /// nothing to offer, idle takes over so that exactly one record stays
    /// Running.
    pub fn yield_now(&mut self) -> Option<ProcessId> {
        let selected = self.algorithm.select(&self.table, &self.features, self.current);
        let next = match selected {
            Some(slot) => slot,
            None if !self.current_is_running() => self.idle_fallback()?,
            None => return None,
        };
        if next == self.current {
            return None;
        }
        Some(self.switch_to(next))
    }

    /// Slot that would take over if the current process gave up the CPU now.
    /// `None` means nothing else can run.
    pub(crate) fn successor(&self) -> Option<SlotIndex> {
        self.algorithm
            .select(&self.table, &self.features, self.current)
            .or_else(|| self.idle_fallback())
    }

    fn current_is_running(&self) -> bool {
        self.table
            .get(self.current)
            .map_or(false, |pcb| pcb.state == ProcessState::Running)
    }

    fn idle_fallback(&self) -> Option<SlotIndex> {
        match self.table.get(IDLE_SLOT) {
            Some(idle) if idle.state == ProcessState::Ready => Some(IDLE_SLOT),
            _ => None,
        }
    }

    /// Demote the old current (only if it was Running; an exited or blocked
    /// record keeps its state), promote `next` and move the current pointer.
    fn switch_to(&mut self, next: SlotIndex) -> ProcessId {
        if self.current_is_running() {
            let _ = self.table.set_state(self.current, ProcessState::Ready);
        }
        let _ = self.table.set_state(next, ProcessState::Running);
        self.current = next;

        let (pid, name) = match self.table.get(next) {
            Some(pcb) => (pcb.pid, pcb.name.as_str()),
            None => return 0,
        };
        let feature = self.features.lookup(pid);
        self.stats.record(feature.map(|entry| entry.process_type));

        match (self.algorithm, feature) {
            (SchedulingAlgorithm::PriorityFeatureBased, Some(entry)) => kinfo!(
                self.console,
                "ML",
                "Selected: {} (Burst={}, Priority={:.2})",
                name,
                entry.predicted_burst,
                entry.priority_score
            ),
            (SchedulingAlgorithm::RoundRobin, _) => {
                kinfo!(self.console, "RR", "Switched to: {} (PID: {})", name, pid)
            }
            _ => kinfo!(self.console, TAG, "Switched to: {} (PID: {})", name, pid),
        }
        pid
    }
}
