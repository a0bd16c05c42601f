use context::stack::StackError;
use thiserror::Error;

/// Errors raised while creating a task.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("failed to allocate a {size} byte fiber stack: {cause:?}")]
    Stack { size: usize, cause: StackError },
}
