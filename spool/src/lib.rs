//! Spool is a small stackful fiber runtime.
//! Tasks are multiplexed m:1 onto the calling thread and scheduled cooperatively.
//!
//! ```ignore
//! #[spool::main]
//! fn main() {
//!     let handle = spool::task::spawn(|| 40 + 2);
//!     assert_eq!(handle.join(), 42);
//! }
//! ```

mod utils;
mod config;
pub mod error;
pub mod task;
pub mod sync;
pub mod time;
pub mod runtime;

pub use config::DEFAULT_STACK_SIZE;
pub use error::SpawnError;
pub use spool_macros::main;
