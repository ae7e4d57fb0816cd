// Ready queue: circular order threaded through the PCB `next` links
//
// The queue owns no records. It only remembers the head slot; the order lives
// in the process table arena as slot indices. A record that is the sole member
// links to itself.
use crate::process::pcb::{ProcessControlBlock, SlotIndex};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadyQueue {
    head: Option<SlotIndex>,
}

impl ReadyQueue {
    pub const fn new() -> Self {
        Self { head: None }
    }

    pub fn head(&self) -> Option<SlotIndex> {
        self.head
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn clear(&mut self) {
        self.head = None;
    }

    /// Link `slot` immediately before the head, i.e. at the tail of the
    /// traversal order. An empty queue makes `slot` the self-linked head.
    ///
    /// Returns `false` if `slot` is outside the arena.
    pub fn insert_before_head(&mut self, slots: &mut [ProcessControlBlock], slot: SlotIndex) -> bool {
        if slot >= slots.len() {
            return false;
        }
        match self.head {
            None => {
                slots[slot].next = slot;
                self.head = Some(slot);
            }
            Some(head) => {
                let last = self.predecessor(slots, head).unwrap_or(head);
                slots[slot].next = head;
                slots[last].next = slot;
            }
        }
        true
    }

    /// Unlink `slot` by relinking its predecessor around it. When the head is
    /// removed the head moves to its successor. The removed record keeps its
    /// own link so a walk can still resume from where it used to be.
    ///
    /// Returns `false` if `slot` was not linked.
    pub fn remove(&mut self, slots: &mut [ProcessControlBlock], slot: SlotIndex) -> bool {
        let prev = match self.predecessor(slots, slot) {
            Some(prev) => prev,
            None => return false,
        };

        if prev == slot {
            // sole member
            self.head = None;
            return true;
        }

        let succ = slots[slot].next;
        slots[prev].next = succ;
        if self.head == Some(slot) {
            self.head = Some(succ);
        }
        true
    }

    /// Walk one full cycle starting at `start`.
    pub fn iter_from<'a>(&self, slots: &'a [ProcessControlBlock], start: SlotIndex) -> ReadyIter<'a> {
        ReadyIter {
            slots,
            start,
            cursor: if self.head.is_some() { Some(start) } else { None },
            remaining: slots.len(),
        }
    }

    /// Walk one full cycle starting at the head.
    pub fn iter<'a>(&self, slots: &'a [ProcessControlBlock]) -> ReadyIter<'a> {
        match self.head {
            Some(head) => self.iter_from(slots, head),
            None => ReadyIter {
                slots,
                start: 0,
                cursor: None,
                remaining: 0,
            },
        }
    }

    pub fn len(&self, slots: &[ProcessControlBlock]) -> usize {
        self.iter(slots).count()
    }

    pub fn contains(&self, slots: &[ProcessControlBlock], slot: SlotIndex) -> bool {
        self.iter(slots).any(|s| s == slot)
    }

    /// Slot whose link points at `target`, searching from the head.
    fn predecessor(&self, slots: &[ProcessControlBlock], target: SlotIndex) -> Option<SlotIndex> {
        let mut cursor = self.head?;
        for _ in 0..slots.len() {
            let next = slots.get(cursor)?.next;
            if next == target {
                return Some(cursor);
            }
            cursor = next;
        }
        None
    }
}

/// Lazy walk over one cycle of the ready queue. Bounded by the table size, so
/// a start outside the cycle cannot loop forever.
#[derive(Clone)]
pub struct ReadyIter<'a> {
    slots: &'a [ProcessControlBlock],
    start: SlotIndex,
    cursor: Option<SlotIndex>,
    remaining: usize,
}

impl<'a> Iterator for ReadyIter<'a> {
    type Item = SlotIndex;

    fn next(&mut self) -> Option<SlotIndex> {
        let current = self.cursor?;
        if self.remaining == 0 {
            self.cursor = None;
            return None;
        }
        self.remaining -= 1;

        let next = match self.slots.get(current) {
            Some(pcb) => pcb.next,
            None => {
                self.cursor = None;
                return None;
            }
        };
        self.cursor = if next == self.start { None } else { Some(next) };
        Some(current)
    }
}
