use std::{collections::{HashMap, VecDeque}, thread, time::Instant};

use context::Context;
use log::{debug, trace};

use crate::{runtime::timer::Timers, task::{task::{Task, TaskState}, BlockCause}};


/// Scheduler state for one thread.
///
/// SAFETY  Tasks reach the runtime through `runtime()`, so several mutable
/// references to it exist over the lifetime of a fiber. Each method here runs
/// to completion without switching context, which keeps those accesses
/// from overlapping.
pub(crate) struct Runtime {
    base_cx: Option<Context>,
    cxs: HashMap<usize, Context>,
    running_tasks: VecDeque<Task>,
    blocking_tasks: HashMap<usize, Task>,
    timers: Timers,
    joiners: HashMap<usize, Vec<usize>>,
    cur_task: Option<usize>,
    next_id: usize,
}

impl Runtime {
    pub(crate) fn new() -> Self {
        Self {
            base_cx: None,
            cxs: HashMap::new(),
            running_tasks: VecDeque::new(),
            blocking_tasks: HashMap::new(),
            timers: Timers::new(),
            joiners: HashMap::new(),
            cur_task: None,
            next_id: 0,
        }
    }

    pub(crate) fn in_task(&self) -> bool {
        self.cur_task.is_some()
    }

    pub(crate) fn cur_task(&self) -> usize {
        self.cur_task.expect("Not running inside a spool task")
    }

    pub(crate) fn next_id(&mut self) -> usize {
        self.next_id += 1;
        self.next_id - 1
    }

    pub(crate) fn enqueue(&mut self, task: Task, cx: Context) {
        trace!("spawned task {}", task.id());
        assert!(self.cxs.insert(task.id(), cx).is_none());
        self.running_tasks.push_back(task);
    }

    pub(crate) fn wake(&mut self, id: usize) {
        let mut task = self.blocking_tasks.remove(&id)
            .expect("No blocked task found for the given id");
        task.trans_state(TaskState::Ready);
        self.running_tasks.push_back(task);
    }

    pub(crate) fn add_timer(&mut self, deadline: Instant, id: usize) {
        self.timers.push(deadline, id);
    }

    /// Register `waiter` to be woken once task `target` finishes.
    pub(crate) fn add_joiner(&mut self, target: usize, waiter: usize) {
        self.joiners.entry(target).or_default().push(waiter);
    }

    /// Pick the next task to resume, idling the thread while only timers are pending.
    /// Returns `None` once every task has finished.
    pub(crate) fn next_task(&mut self) -> Option<Task> {
        loop {
            for id in self.timers.drain_expired(Instant::now()) {
                trace!("timer fired for task {}", id);
                self.wake(id);
            }

            if let Some(task) = self.running_tasks.pop_front() {
                self.cur_task = Some(task.id());
                return Some(task);
            }

            match self.timers.next_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    debug!("idle, sleeping {:?} until the next timer", wait);
                    thread::sleep(wait);
                }
                None if self.blocking_tasks.is_empty() => return None,
                None => panic!(
                    "Deadlock: {} task(s) blocked with nothing left to wake them",
                    self.blocking_tasks.len()
                ),
            }
        }
    }

    /// File a task away after it handed control back to the scheduler.
    pub(crate) fn settle(&mut self, task: Task) {
        self.cur_task = None;
        match task.state() {
            TaskState::Finished => {
                trace!("task {} finished", task.id());
                for waiter in self.joiners.remove(&task.id()).unwrap_or_default() {
                    self.wake(waiter);
                }
            }
            TaskState::Ready => self.running_tasks.push_back(task),
            TaskState::BlockOn(cause) => {
                trace!("task {} blocked on {:?}", task.id(), cause);
                if cause == BlockCause::Sleep {
                    debug_assert!(self.timers.contains(task.id()));
                }
                assert!(self.blocking_tasks.insert(task.id(), task).is_none());
            }
            TaskState::Running => unreachable!(),
        }
    }

    pub(crate) fn take_cx(&mut self, id: usize) -> Option<Context> {
        self.cxs.remove(&id)
    }

    pub(crate) fn store_cx(&mut self, id: usize, cx: Context) {
        assert!(self.cxs.insert(id, cx).is_none());
    }

    pub(crate) fn set_base_cx(&mut self, cx: Context) {
        assert!(self.base_cx.is_none(), "Base context already set");
        self.base_cx = Some(cx);
    }

    pub(crate) fn take_base_cx(&mut self) -> Option<Context> {
        self.base_cx.take()
    }
}
