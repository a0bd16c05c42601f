use std::{rc::Rc, time::Duration};

use spool::{sync::{Mutex, Semaphore}, task, time};

#[spool::main]
fn sum_in_tasks() -> u64 {
    let handles: Vec<_> = (1..=10u64).map(|i| task::spawn(move || i)).collect();
    handles.into_iter().map(|h| h.join()).sum()
}

#[spool::main]
fn fallible(fail: bool) -> Result<u32, String> {
    let value = task::spawn(move || if fail { Err(String::from("boom")) } else { Ok(7) }).join()?;
    Ok(value * 6)
}

#[spool::main]
fn guarded_counter() -> usize {
    let slots = Rc::new(Semaphore::new(2));
    let counter = Rc::new(Mutex::new(0usize));
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let (slots, counter) = (slots.clone(), counter.clone());
            task::spawn(move || {
                let _slot = slots.acquire();
                time::sleep(Duration::from_millis(1));
                *counter.lock() += 1;
            })
        })
        .collect();
    for handle in handles {
        handle.join();
    }
    let total = *counter.lock();
    total
}

#[test]
fn main_attribute_runs_body_on_runtime() {
    assert_eq!(sum_in_tasks(), 55);
}

#[test]
fn main_attribute_supports_question_mark() {
    assert_eq!(fallible(false), Ok(42));
    assert_eq!(fallible(true), Err(String::from("boom")));
}

#[test]
fn primitives_compose() {
    assert_eq!(guarded_counter(), 6);
}

#[test]
fn try_spawn_succeeds_with_default_stack() {
    let value = spool::runtime::block_on(|| task::try_spawn(|| spool::DEFAULT_STACK_SIZE).map(|h| h.join()));
    assert_eq!(value.unwrap(), spool::DEFAULT_STACK_SIZE);
}
