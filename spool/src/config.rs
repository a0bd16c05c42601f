//! Compile-time runtime parameters.

/// Size of each fiber stack in bytes, guard page excluded.
pub const DEFAULT_STACK_SIZE: usize = 512 * 1024;

/// Value handed back by a freshly created fiber once it has parked at its entry point.
pub(crate) const ENTRY_PARKED: usize = 42;
