//! Task management module

use std::{cell::OnceCell, panic::{self, AssertUnwindSafe}, rc::Rc};

use log::warn;

use crate::{
    error::SpawnError,
    runtime::{runtime, yield_to_base},
    task::{packet::Packet, task::{Job, Task}},
};

pub(crate) mod task;
pub(crate) mod packet;

pub use task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockCause {
    Lock,
    Semaphore,
    Sleep,
    Join,
}

/// Hand control back to the scheduler; the current task goes to the back of the ready queue.
pub fn yield_now() {
    yield_to_base(Packet::Yield);
}

/// Spawn a new task on the current thread's runtime.
///
/// # Panics
///
/// Panics if the fiber stack cannot be allocated. Use [`try_spawn`] to handle that case.
pub fn spawn<F, R>(future: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + 'static,
    R: 'static,
{
    try_spawn(future).unwrap_or_else(|err| panic!("Failed to spawn task: {err}"))
}

pub fn try_spawn<F, R>(future: F) -> Result<JoinHandle<R>, SpawnError>
where
    F: FnOnce() -> R + 'static,
    R: 'static,
{
    let id = runtime().next_id();
    let result = Rc::new(OnceCell::new());

    let slot = result.clone();
    let job: Job = Box::new(move || {
        // A panic must not unwind past the fiber entry point; it is carried
        // to whoever joins the task instead.
        let outcome = panic::catch_unwind(AssertUnwindSafe(future));
        if outcome.is_err() {
            warn!("task {} panicked", id);
        }
        assert!(slot.set(outcome).is_ok(), "Result of task {id} set twice");
    });

    let (task, cx) = Task::new(id, job)?;
    runtime().enqueue(task, cx);

    Ok(JoinHandle { id, result })
}

#[cfg(test)]
mod tests {
    use crate::runtime::block_on;

    use super::*;

    #[test]
    fn test_join_returns_value() {
        let values = block_on(|| {
            let handles: Vec<_> = (0..5).map(|i| spawn(move || i * i)).collect();
            handles.into_iter().map(JoinHandle::join).collect::<Vec<_>>()
        });
        assert_eq!(values, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_nested_spawn() {
        let value = block_on(|| {
            spawn(|| {
                let inner = spawn(|| String::from("inner"));
                yield_now();
                format!("outer+{}", inner.join())
            })
            .join()
        });
        assert_eq!(value, "outer+inner");
    }

    #[test]
    fn test_is_finished() {
        block_on(|| {
            let handle = spawn(|| ());
            assert!(!handle.is_finished());
            yield_now();
            assert!(handle.is_finished());
            handle.join();
        });
    }

    #[test]
    #[should_panic(expected = "worker gave up")]
    fn test_panic_reaches_joiner() {
        block_on(|| {
            let handle = spawn(|| -> u32 { panic!("worker gave up") });
            handle.join()
        });
    }

    #[test]
    fn test_panic_leaves_other_tasks_running() {
        let value = block_on(|| {
            let failing = spawn(|| -> u32 { panic!("ignored") });
            let fine = spawn(|| 5);
            yield_now();
            assert!(failing.is_finished());
            drop(failing);
            fine.join()
        });
        assert_eq!(value, 5);
    }

    #[test]
    fn test_detached_task_still_runs() {
        let flag = std::rc::Rc::new(std::cell::Cell::new(false));
        let seen = flag.clone();
        block_on(move || {
            drop(spawn(move || seen.set(true)));
        });
        assert!(flag.get());
    }
}
