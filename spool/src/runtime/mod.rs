// Runtime is the core of the Spool system, handling task management and execution.

pub(crate) mod runtime;
pub(crate) mod timer;

use context::Transfer;
use log::trace;

use crate::{config::ENTRY_PARKED, runtime::runtime::Runtime, task::{packet::Packet, task::Job}, utils::STCell};

thread_local! {
    static RUNTIME: STCell<Runtime> = STCell::new(Runtime::new());
}

/// SAFETY: the returned reference must not be held across a context switch.
/// Every caller re-fetches the runtime after resuming.
pub(crate) fn runtime() -> &'static mut Runtime {
    RUNTIME.with(|cell| unsafe { &mut *cell.as_ptr() })
}

/// Run `future` as the root task on the current thread and drive every task
/// spawned from it to completion.
///
/// # Panics
///
/// Panics when called from inside a task, when the root task panics, or when
/// every remaining task is blocked with no timer left that could wake one of
/// them. A panic in a spawned task reaches the caller through
/// [`JoinHandle::join`](crate::task::JoinHandle::join).
pub fn block_on<F, R>(future: F) -> R
where
    F: FnOnce() -> R + 'static,
    R: 'static,
{
    assert!(!runtime().in_task(), "block_on cannot be nested inside a task");

    let root = crate::task::spawn(future);
    while let Some(mut task) = runtime().next_task() {
        task.resume();
        runtime().settle(task);
    }

    root.join()
}

/// Move a blocked task back to the ready queue.
pub(crate) fn wake_task(id: usize) {
    trace!("waking task {}", id);
    runtime().wake(id);
}

/// Switch from the current task back to the scheduler.
pub(crate) fn yield_to_base(packet: Packet) {
    let base_cx = runtime().take_base_cx().expect("No base context set");
    let from_base = unsafe { base_cx.resume(packet.encode()) };
    runtime().set_base_cx(from_base.context);
}

pub(crate) extern "C" fn task_entry(to_base: Transfer) -> ! {
    let job = unsafe { *Box::from_raw(to_base.data as *mut Job) };

    // Park until the scheduler picks us up for the first time.
    let from_base = unsafe { to_base.context.resume(ENTRY_PARKED) };
    runtime().set_base_cx(from_base.context);

    job();

    let base_cx = runtime().take_base_cx().expect("Base context not set");
    unsafe { base_cx.resume(Packet::Finished.encode()); }

    unreachable!()
}
