//! Task is our representation of a fiber.

use std::{cell::OnceCell, panic, rc::Rc, thread};

use context::{stack::ProtectedFixedSizeStack, Context, Transfer};

use crate::config::*;
use crate::error::SpawnError;
use crate::runtime::{runtime, task_entry, yield_to_base};
use crate::task::{packet::Packet, BlockCause};

/// Type-erased body of a task. It stores its own result before returning.
pub(crate) type Job = Box<dyn FnOnce() + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TaskState {
    Ready,
    Running,
    BlockOn(BlockCause),
    Finished,
}

pub(crate) struct Task {
    id: usize,
    // Kept alive for as long as the fiber may run.
    _stack: ProtectedFixedSizeStack,
    state: TaskState,
}

impl Task {
    /// Allocate a stack and park a new fiber at its entry point.
    pub(crate) fn new(id: usize, job: Job) -> Result<(Self, Context), SpawnError> {
        let stack = ProtectedFixedSizeStack::new(DEFAULT_STACK_SIZE)
            .map_err(|cause| SpawnError::Stack { size: DEFAULT_STACK_SIZE, cause })?;
        let cx = unsafe { Context::new(&stack, task_entry) };

        let job_ptr = Box::into_raw(Box::new(job)) as usize;
        let to_task = Transfer::new(cx, 0);
        let from_task = unsafe { to_task.context.resume(job_ptr) };
        assert_eq!(from_task.data, ENTRY_PARKED);

        Ok((Self {
            id,
            _stack: stack,
            state: TaskState::Ready,
        }, from_task.context))
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn state(&self) -> TaskState {
        self.state
    }

    pub(crate) fn trans_state(&mut self, new_state: TaskState) {
        self.state = new_state;
    }

    /// Run the fiber until it yields, blocks, or finishes.
    pub(crate) fn resume(&mut self) {
        assert_eq!(self.state, TaskState::Ready, "Task {} resumed while not ready", self.id);
        let cx = runtime().take_cx(self.id)
            .unwrap_or_else(|| panic!("No context for task {}", self.id));

        self.state = TaskState::Running;
        let from_task = unsafe { cx.resume(0) };

        self.state = match Packet::decode(from_task.data) {
            Packet::Finished => TaskState::Finished,
            Packet::Yield => {
                runtime().store_cx(self.id, from_task.context);
                TaskState::Ready
            },
            Packet::BlockOn(cause) => {
                runtime().store_cx(self.id, from_task.context);
                TaskState::BlockOn(cause)
            },
        };
    }
}

pub struct JoinHandle<R: 'static> {
    pub(crate) id: usize,
    pub(crate) result: Rc<OnceCell<thread::Result<R>>>,
}

impl<R: 'static> JoinHandle<R> {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.result.get().is_some()
    }

    /// Wait for the task to finish and take its result.
    /// The calling task stays parked until then.
    ///
    /// # Panics
    ///
    /// Resumes the panic of a task that panicked.
    pub fn join(self) -> R {
        if !self.is_finished() {
            let rt = runtime();
            let id = rt.cur_task();
            rt.add_joiner(self.id, id);
            yield_to_base(Packet::BlockOn(BlockCause::Join));
        }
        let outcome = Rc::try_unwrap(self.result)
            .ok()
            .and_then(OnceCell::into_inner)
            .expect("Task result should be set once the task finished");
        match outcome {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
