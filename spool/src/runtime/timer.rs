//! Deadline queue backing `time::sleep`.

use std::{cmp::Reverse, collections::BinaryHeap, time::Instant};

/// Min-heap of `(deadline, seq, task id)`. `seq` keeps tasks with equal
/// deadlines in registration order.
pub(crate) struct Timers {
    heap: BinaryHeap<Reverse<(Instant, u64, usize)>>,
    seq: u64,
}

impl Timers {
    pub(crate) fn new() -> Self {
        Self { heap: BinaryHeap::new(), seq: 0 }
    }

    pub(crate) fn push(&mut self, deadline: Instant, id: usize) {
        self.heap.push(Reverse((deadline, self.seq, id)));
        self.seq += 1;
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse((deadline, _, _))| *deadline)
    }

    pub(crate) fn contains(&self, id: usize) -> bool {
        self.heap.iter().any(|Reverse((_, _, task))| *task == id)
    }

    /// Remove every timer due at or before `now`, earliest first.
    pub(crate) fn drain_expired(&mut self, now: Instant) -> Vec<usize> {
        let mut fired = Vec::new();
        while let Some(Reverse((deadline, _, id))) = self.heap.peek() {
            if *deadline > now {
                break;
            }
            fired.push(*id);
            self.heap.pop();
        }
        fired
    }
}
