use std::{io, path::PathBuf};

use spool::SpawnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no triangular number up to index {max_index} has more than {threshold} divisors")]
    Exhausted { threshold: u64, max_index: u64 },
    #[error("triangular numbers overflowed u64 before one had more than {threshold} divisors")]
    Overflow { threshold: u64 },
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool capacity must be between 1 and {max}, got {capacity}")]
    InvalidCapacity { capacity: usize, max: usize },
    #[error("worker {0} is already active")]
    AlreadyActive(String),
    #[error("worker {0} is not active")]
    NotActive(String),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
