use std::{cell::RefCell, collections::VecDeque};

use thiserror::Error;

use crate::{runtime::{runtime, wake_task, yield_to_base}, task::{packet::Packet, BlockCause}};


struct SemaphoreCore {
    permits: usize,
    waiters: VecDeque<usize>,
}

/// A counting semaphore for tasks of one runtime.
///
/// A released permit goes straight to the oldest waiting task, so a task
/// arriving later can never overtake a parked one.
pub struct Semaphore {
    capacity: usize,
    core: RefCell<SemaphoreCore>,
}

pub struct SemaphorePermit<'a> {
    sem: &'a Semaphore,
    permits: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no permits available")]
pub struct TryAcquireError;

impl Semaphore {
    pub const MAX_PERMITS: usize = 65535;

    pub fn new(permits: usize) -> Self {
        assert!(permits > 0 && permits <= Self::MAX_PERMITS, "Permits must be between 1 and {}", Self::MAX_PERMITS);
        Self {
            capacity: permits,
            core: RefCell::new(SemaphoreCore {
                permits,
                waiters: VecDeque::new(),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available_permits(&self) -> usize {
        self.core.borrow().permits
    }

    /// Number of tasks parked in [`Semaphore::acquire`].
    pub fn waiting(&self) -> usize {
        self.core.borrow().waiters.len()
    }

    /// Take one permit, parking the current task until one is released.
    pub fn acquire(&self) -> SemaphorePermit<'_> {
        let mut core = self.core.borrow_mut();
        if core.permits > 0 {
            core.permits -= 1;
            return SemaphorePermit { sem: self, permits: 1 };
        }
        core.waiters.push_back(runtime().cur_task());
        drop(core);

        yield_to_base(Packet::BlockOn(BlockCause::Semaphore));

        // Only a release wakes us, and it hands its permit over directly.
        SemaphorePermit { sem: self, permits: 1 }
    }

    pub fn try_acquire(&self) -> Result<SemaphorePermit<'_>, TryAcquireError> {
        let mut core = self.core.borrow_mut();
        if core.permits > 0 {
            core.permits -= 1;
            return Ok(SemaphorePermit { sem: self, permits: 1 });
        }
        Err(TryAcquireError)
    }

    fn release(&self, permits: usize) {
        let mut core = self.core.borrow_mut();
        for _ in 0..permits {
            match core.waiters.pop_front() {
                Some(waiter) => wake_task(waiter),
                None => core.permits += 1,
            }
        }
        debug_assert!(core.permits <= self.capacity);
    }
}

impl SemaphorePermit<'_> {
    pub fn num_permits(&self) -> usize {
        self.permits
    }
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        self.sem.release(self.permits);
    }
}
