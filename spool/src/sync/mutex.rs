//! One of the most basic synchronization primitives.

use std::{collections::VecDeque, fmt::Debug, ops::{Deref, DerefMut}};

use crate::{runtime::{runtime, wake_task, yield_to_base}, task::{packet::Packet, BlockCause}, utils::STCell};

/// A mutual exclusion lock whose waiters park as tasks instead of blocking the thread.
///
/// Unlocking with tasks parked hands the lock straight to the oldest of them,
/// so the lock is acquired in arrival order.
pub struct Mutex<T> {
    inner: STCell<MutexInner<T>>,
}

impl<T: Debug> Debug for Mutex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("Mutex");
        match self.try_lock() {
            Some(guard) => d.field("data", &&*guard),
            None => d.field("data", &format_args!("<locked>")),
        };
        d.field("waiters", &self.waiters().len()).finish()
    }
}

impl<T: Default> Default for Mutex<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

struct MutexInner<T> {
    data: T,
    locked: bool,
    waiters: VecDeque<usize>,
}

pub struct MutexGuard<'a, T> {
    mutex: &'a Mutex<T>,
}

impl<T> Mutex<T> {
    pub const fn new(t: T) -> Self {
        let inner = MutexInner {
            data: t,
            locked: false,
            waiters: VecDeque::new(),
        };
        Self { inner: STCell::new(inner) }
    }

    // Field accessors go through the raw pointer so that a guard's borrow of
    // `data` never overlaps a borrow of the bookkeeping fields.
    #[allow(clippy::mut_from_ref)]
    fn locked(&self) -> &mut bool {
        unsafe { &mut (*self.inner.as_ptr()).locked }
    }

    #[allow(clippy::mut_from_ref)]
    fn waiters(&self) -> &mut VecDeque<usize> {
        unsafe { &mut (*self.inner.as_ptr()).waiters }
    }

    /// Lock the mutex, parking the current task while another task holds it.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        if *self.locked() {
            let id = runtime().cur_task();
            self.waiters().push_back(id);
            yield_to_base(Packet::BlockOn(BlockCause::Lock));
            // Woken by an unlock that left the lock held on our behalf.
            debug_assert!(*self.locked());
        } else {
            *self.locked() = true;
        }

        MutexGuard {
            mutex: self,
        }
    }

    /// Lock the mutex only if it is free right now.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        if *self.locked() {
            return None;
        }
        *self.locked() = true;
        Some(MutexGuard { mutex: self })
    }

    pub fn is_locked(&self) -> bool {
        *self.locked()
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().data
    }
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &(*self.mutex.inner.as_ptr()).data }
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut (*self.mutex.inner.as_ptr()).data }
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        match self.mutex.waiters().pop_front() {
            // Ownership passes to the waiter; the lock stays held.
            Some(waiter) => wake_task(waiter),
            None => *self.mutex.locked() = false,
        }
    }
}
