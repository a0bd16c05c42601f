//! Synchronization primitives

pub(crate) mod mutex;
pub(crate) mod semaphore;

pub use mutex::{
    Mutex,
    MutexGuard,
};
pub use semaphore::{
    Semaphore,
    SemaphorePermit,
    TryAcquireError,
};
