// Scheduling policies: pick the next ready queue member
use crate::process::features::FeatureStore;
use crate::process::pcb::{ProcessState, SlotIndex};
use crate::process::table::ProcessTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingAlgorithm {
    RoundRobin,
    PriorityFeatureBased,
}

impl SchedulingAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            SchedulingAlgorithm::RoundRobin => "Round Robin",
            SchedulingAlgorithm::PriorityFeatureBased => "ML Based",
        }
    }

    /// Slot that should run after `current`, or `None` to keep it.
    pub fn select(self, table: &ProcessTable, features: &FeatureStore, current: SlotIndex) -> Option<SlotIndex> {
        match self {
            SchedulingAlgorithm::RoundRobin => select_round_robin(table, current),
            SchedulingAlgorithm::PriorityFeatureBased => select_priority(table, features, current),
        }
    }
}

/// Walk from `current`'s successor and take the first Ready record that is
/// not `current` itself. A record that just left the queue still links to
/// its old successor, so the walk covers the whole remaining cycle.
pub fn select_round_robin(table: &ProcessTable, current: SlotIndex) -> Option<SlotIndex> {
    let slots = table.slots();
    let start = slots.get(current)?.next();
    table
        .ready_queue()
        .iter_from(slots, start)
        .find(|&slot| slot != current && slots[slot].state == ProcessState::Ready)
}

/// Scan one cycle from the head and take the Ready record with the highest
/// feature score. Records without a feature entry are skipped; on equal
/// scores the one met first wins.
pub fn select_priority(table: &ProcessTable, features: &FeatureStore, current: SlotIndex) -> Option<SlotIndex> {
    let slots = table.slots();
    let mut best: Option<(SlotIndex, f32)> = None;

    for slot in table.ready_queue().iter(slots) {
        let pcb = &slots[slot];
        if pcb.state != ProcessState::Ready {
            continue;
        }
        let score = match features.lookup(pcb.pid) {
            Some(entry) => entry.priority_score,
            None => continue,
        };
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((slot, score));
        }
    }

    best.map(|(slot, _)| slot).filter(|&slot| slot != current)
}
