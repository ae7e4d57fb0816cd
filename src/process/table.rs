// Process table: fixed-capacity arena of PCBs
use alloc::vec::Vec;

use crate::process::pcb::{
    ProcessControlBlock, ProcessEntry, ProcessError, ProcessId, ProcessInfo, ProcessState,
    SlotIndex, IDLE_PID, IDLE_SLOT,
};
use crate::process::ready_queue::ReadyQueue;

/// Priority stamped on created processes
const DEFAULT_PRIORITY: i32 = 1;

/// Time slice stamped on created processes
const DEFAULT_TIME_SLICE: u32 = 10;

/// Owns every PCB and the ready queue threaded through them.
#[derive(Debug)]
pub struct ProcessTable {
    slots: Vec<ProcessControlBlock>,
    ready: ReadyQueue,
    next_pid: ProcessId,
}

impl ProcessTable {
    /// A table of `capacity` slots (at least one, for idle), initialized.
    pub fn new(capacity: usize, idle_name: &str) -> Self {
        let capacity = capacity.max(1);
        let mut table = Self {
            slots: (0..capacity).map(ProcessControlBlock::empty).collect(),
            ready: ReadyQueue::new(),
            next_pid: 1,
        };
        table.init(idle_name);
        table
    }

    /// Reset every slot to New and install the idle process in slot 0 as the
    /// sole ready queue member. The idle record is left Running.
    pub fn init(&mut self, idle_name: &str) {
        for (slot, pcb) in self.slots.iter_mut().enumerate() {
            *pcb = ProcessControlBlock::empty(slot);
        }
        self.ready.clear();
        self.next_pid = 1;

        let idle = &mut self.slots[IDLE_SLOT];
        idle.pid = IDLE_PID;
        idle.state = ProcessState::Running;
        idle.priority = 0;
        idle.set_name(idle_name);
        self.ready.insert_before_head(&mut self.slots, IDLE_SLOT);
    }

    /// Claim the first free slot after idle, assign the next pid and link the
    /// record at the tail of the ready queue. Pids are never reused, so the
    /// last `u32` value is not handed out.
    pub fn create(&mut self, entry: Option<ProcessEntry>, name: &str) -> Result<(SlotIndex, ProcessId), ProcessError> {
        let slot = (IDLE_SLOT + 1..self.slots.len())
            .find(|&slot| self.slots[slot].state.is_free())
            .ok_or(ProcessError::TableFull)?;

        let pid = self.next_pid;
        self.next_pid = pid.checked_add(1).ok_or(ProcessError::PidsExhausted)?;

        let pcb = &mut self.slots[slot];
        pcb.pid = pid;
        pcb.state = ProcessState::Ready;
        pcb.priority = DEFAULT_PRIORITY;
        pcb.time_slice = DEFAULT_TIME_SLICE;
        pcb.entry = entry;
        pcb.set_name(name);

        self.ready.insert_before_head(&mut self.slots, slot);
        Ok((slot, pid))
    }

    /// Mark `slot` Terminated and unlink it from the ready queue.
    pub fn terminate(&mut self, slot: SlotIndex) -> Result<(), ProcessError> {
        let pcb = self.slots.get_mut(slot).ok_or(ProcessError::ProcessNotFound)?;
        if !pcb.is_live() {
            return Err(ProcessError::ProcessNotFound);
        }
        pcb.state = ProcessState::Terminated;
        self.ready.remove(&mut self.slots, slot);
        Ok(())
    }

    pub fn set_state(&mut self, slot: SlotIndex, state: ProcessState) -> Result<(), ProcessError> {
        let pcb = self.slots.get_mut(slot).ok_or(ProcessError::ProcessNotFound)?;
        pcb.state = state;
        Ok(())
    }

    pub fn get(&self, slot: SlotIndex) -> Option<&ProcessControlBlock> {
        self.slots.get(slot)
    }

    pub fn slots(&self) -> &[ProcessControlBlock] {
        &self.slots
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }

    /// Slot of the live record carrying `pid`.
    pub fn find_slot(&self, pid: ProcessId) -> Option<SlotIndex> {
        self.slots
            .iter()
            .position(|pcb| pcb.is_live() && pcb.pid == pid)
    }

    /// Slots in ready queue order, starting at the head.
    pub fn ready_order(&self) -> Vec<SlotIndex> {
        self.ready.iter(&self.slots).collect()
    }

    /// Every slot that has ever been used.
    pub fn processes(&self) -> Vec<ProcessInfo> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, pcb)| pcb.state != ProcessState::New)
            .map(|(slot, pcb)| ProcessInfo::from_pcb(slot, pcb))
            .collect()
    }

    pub fn count_in(&self, state: ProcessState) -> usize {
        self.slots.iter().filter(|pcb| pcb.state == state).count()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|pcb| pcb.is_live()).count()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Pid the next successful `create` will hand out.
    pub fn next_pid(&self) -> ProcessId {
        self.next_pid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() {}

    #[test]
    fn init_installs_idle_as_sole_member() {
        let table = ProcessTable::new(4, "idle");
        let idle = table.get(IDLE_SLOT).unwrap();
        assert_eq!(idle.pid, IDLE_PID);
        assert_eq!(idle.state, ProcessState::Running);
        assert_eq!(idle.name, "idle");
        assert_eq!(table.ready_order(), vec![IDLE_SLOT]);
        assert_eq!(table.count_in(ProcessState::New), 3);
    }

    #[test]
    fn pids_increase_from_one() {
        let mut table = ProcessTable::new(8, "idle");
        let pids: Vec<_> = (0..5)
            .map(|_| table.create(Some(body), "p").unwrap().1)
            .collect();
        assert_eq!(pids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn create_fails_when_table_full() {
        let mut table = ProcessTable::new(3, "idle");
        table.create(Some(body), "a").unwrap();
        table.create(Some(body), "b").unwrap();
        assert_eq!(table.create(Some(body), "c"), Err(ProcessError::TableFull));
        assert_eq!(table.next_pid(), 3);
    }

    #[test]
    fn pid_counter_does_not_wrap() {
        let mut table = ProcessTable::new(4, "idle");
        table.next_pid = ProcessId::MAX - 1;
        assert_eq!(table.create(Some(body), "a").map(|(_, pid)| pid), Ok(ProcessId::MAX - 1));
        assert_eq!(table.create(Some(body), "b"), Err(ProcessError::PidsExhausted));
        assert_eq!(table.next_pid(), ProcessId::MAX);
        assert_eq!(table.count_in(ProcessState::New), 2);
        assert_eq!(table.ready_order().len(), 2);
    }

    #[test]
    fn terminated_slot_is_reused_with_fresh_pid() {
        let mut table = ProcessTable::new(3, "idle");
        let (slot_a, _) = table.create(Some(body), "a").unwrap();
        table.create(Some(body), "b").unwrap();
        table.terminate(slot_a).unwrap();
        assert!(!table.ready_queue().contains(table.slots(), slot_a));

        let (slot_c, pid_c) = table.create(Some(body), "c").unwrap();
        assert_eq!(slot_c, slot_a);
        assert_eq!(pid_c, 3);
        assert_eq!(table.ready_order(), vec![0, 2, 1]);
    }

    #[test]
    fn terminate_twice_is_rejected() {
        let mut table = ProcessTable::new(3, "idle");
        let (slot, _) = table.create(Some(body), "a").unwrap();
        table.terminate(slot).unwrap();
        assert_eq!(table.terminate(slot), Err(ProcessError::ProcessNotFound));
    }

    #[test]
    fn find_slot_ignores_terminated_records() {
        let mut table = ProcessTable::new(3, "idle");
        let (slot, pid) = table.create(Some(body), "a").unwrap();
        assert_eq!(table.find_slot(pid), Some(slot));
        table.terminate(slot).unwrap();
        assert_eq!(table.find_slot(pid), None);
        assert_eq!(table.processes().len(), 2);
    }

    #[test]
    fn created_records_carry_dormant_fields() {
        let mut table = ProcessTable::new(2, "idle");
        let (slot, _) = table.create(Some(body), "worker").unwrap();
        let pcb = table.get(slot).unwrap();
        assert_eq!(pcb.priority, 1);
        assert_eq!(pcb.time_slice, 10);
        assert_eq!(pcb.state, ProcessState::Ready);
        assert!(pcb.entry.is_some());
    }
}
