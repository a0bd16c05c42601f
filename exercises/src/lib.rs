//! Two small exercises.
//!
//! - [`highly_divisible`] finds the first triangular number with more than a
//!   given number of divisors.
//! - [`active_pool`] admits workers into a shared registry through a counting
//!   semaphore, so only a bounded number are ever active at once.
//!
//! The two share nothing beyond [`config`] and [`error`].

pub mod active_pool;
pub mod config;
pub mod error;
pub mod highly_divisible;
pub mod number;

pub use active_pool::{run_workers, ActivePool, PoolEvent, PoolReport};
pub use config::{Config, PoolConfig, SearchConfig};
pub use error::{ConfigError, PoolError, SearchError};
pub use highly_divisible::{first_triangle_over, search, SearchOptions, Triangle};
