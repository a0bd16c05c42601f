//! Timer utilities.

use std::time::{Duration, Instant};

use crate::{runtime::{runtime, yield_to_base}, task::{packet::Packet, BlockCause}};

/// Park the current task for at least `duration`. Other tasks keep running meanwhile.
pub fn sleep(duration: Duration) {
    sleep_until(Instant::now() + duration);
}

pub fn sleep_until(deadline: Instant) {
    let rt = runtime();
    let id = rt.cur_task();
    rt.add_timer(deadline, id);
    yield_to_base(Packet::BlockOn(BlockCause::Sleep));
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{runtime::block_on, task};

    use super::*;

    #[test]
    fn test_sleep_waits_at_least_duration() {
        let elapsed = block_on(|| {
            let start = Instant::now();
            sleep(Duration::from_millis(20));
            start.elapsed()
        });
        assert!(elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn test_wakeups_follow_deadlines() {
        let order = block_on(|| {
            let order = Rc::new(RefCell::new(Vec::new()));
            let handles: Vec<_> = [30u64, 10, 20]
                .into_iter()
                .map(|ms| {
                    let order = order.clone();
                    task::spawn(move || {
                        sleep(Duration::from_millis(ms));
                        order.borrow_mut().push(ms);
                    })
                })
                .collect();
            for handle in handles {
                handle.join();
            }
            let order = order.borrow().clone();
            order
        });
        assert_eq!(order, vec![10, 20, 30]);
    }

    #[test]
    fn test_sleepers_overlap() {
        let elapsed = block_on(|| {
            let start = Instant::now();
            let handles: Vec<_> = (0..5)
                .map(|_| task::spawn(|| sleep(Duration::from_millis(50))))
                .collect();
            for handle in handles {
                handle.join();
            }
            start.elapsed()
        });
        assert!(elapsed >= Duration::from_millis(50));
        assert!(elapsed < Duration::from_millis(250));
    }
}
