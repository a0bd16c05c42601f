//! Lib-private utilities

use std::cell::UnsafeCell;

/// A single-thread cell. \
/// SAFETY \
/// When yielding control, we have to keep a mutable reference to runtime,
/// which leads to a problem: multiple mutable references to the same data.
/// Every access must be finished before the current fiber switches away,
/// so no reference obtained from the cell is held across a yield.
pub(crate) struct STCell<R> {
    inner: UnsafeCell<R>,
}

impl<R> STCell<R> {
    pub(crate) const fn new(value: R) -> Self {
        Self { inner: UnsafeCell::new(value) }
    }

    pub(crate) fn as_ptr(&self) -> *mut R {
        self.inner.get()
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}
