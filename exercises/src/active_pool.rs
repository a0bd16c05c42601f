//! A pool where only a bounded number of workers are active at once.
//!
//! Think of a connection pool that supports a fixed number of simultaneous
//! connections. Admission is a counting [`Semaphore`]; the list of active
//! workers is a separate registry behind a [`Mutex`].

use std::{cell::Cell, fmt, rc::Rc, time::Duration};

use log::{debug, trace};
use rand::Rng;
use spool::{sync::{Mutex, Semaphore}, task, time};

use crate::{config::PoolConfig, error::PoolError};

#[derive(Default)]
struct Registry {
    names: Vec<String>,
    peak: usize,
}

/// Insertion-ordered names of the workers currently active.
///
/// Every accessor takes the lock for the duration of the call only; the guard
/// releases it on every exit path.
#[derive(Default)]
pub struct ActivePool {
    registry: Mutex<Registry>,
}

impl ActivePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` to the registry. A name can be active only once.
    pub fn make_active(&self, name: impl Into<String>) -> Result<(), PoolError> {
        let name = name.into();
        let mut registry = self.registry.lock();
        if registry.names.contains(&name) {
            return Err(PoolError::AlreadyActive(name));
        }
        registry.names.push(name);
        registry.peak = registry.peak.max(registry.names.len());
        Ok(())
    }

    /// Remove `name`, which must have been made active before.
    pub fn make_inactive(&self, name: &str) -> Result<(), PoolError> {
        let mut registry = self.registry.lock();
        let position = registry
            .names
            .iter()
            .position(|active| active == name)
            .ok_or_else(|| PoolError::NotActive(name.to_owned()))?;
        registry.names.remove(position);
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.registry.lock().names.clone()
    }

    pub fn len(&self) -> usize {
        self.registry.lock().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest number of workers that were ever active together.
    pub fn peak(&self) -> usize {
        self.registry.lock().peak
    }
}

impl fmt::Display for ActivePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.registry.lock().names.join(", "))
    }
}

/// Registry changes reported to the observer of [`run_workers`].
/// `active` is the registry content right after the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    Entered { worker: String, active: Vec<String> },
    Exited { worker: String, active: Vec<String> },
    Joined { worker: String, active: Vec<String> },
}

impl PoolEvent {
    pub fn worker(&self) -> &str {
        match self {
            PoolEvent::Entered { worker, .. }
            | PoolEvent::Exited { worker, .. }
            | PoolEvent::Joined { worker, .. } => worker,
        }
    }

    pub fn active(&self) -> &[String] {
        match self {
            PoolEvent::Entered { active, .. }
            | PoolEvent::Exited { active, .. }
            | PoolEvent::Joined { active, .. } => active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    /// Workers that got a slot.
    pub admitted: usize,
    pub peak: usize,
    /// Registry content after every worker was joined.
    pub remaining: Vec<String>,
}

type Observer = Rc<dyn Fn(&PoolEvent)>;

struct Worker {
    name: String,
    slots: Rc<Semaphore>,
    pool: Rc<ActivePool>,
    admitted: Rc<Cell<usize>>,
    max_hold: Duration,
    observer: Observer,
}

impl Worker {
    fn run(self) -> Result<(), PoolError> {
        let _slot = self.slots.acquire();
        self.admitted.set(self.admitted.get() + 1);

        self.pool.make_active(self.name.as_str())?;
        debug_assert!(self.pool.len() <= self.slots.capacity());
        (self.observer)(&PoolEvent::Entered {
            worker: self.name.clone(),
            active: self.pool.snapshot(),
        });

        let hold = rand::thread_rng().gen_range(Duration::ZERO..=self.max_hold);
        trace!("worker {} holds its slot for {:?}", self.name, hold);
        time::sleep(hold);

        self.pool.make_inactive(&self.name)?;
        (self.observer)(&PoolEvent::Exited {
            worker: self.name,
            active: self.pool.snapshot(),
        });
        Ok(())
    }
}

/// Spawn `config.workers` workers on the current runtime and join them in
/// spawn order, reporting the registry after each join.
///
/// Each worker takes a semaphore slot, registers itself, holds for a random
/// time up to `config.max_hold()`, deregisters and gives the slot back.
/// Must be called from inside a spool task.
pub fn run_workers<F>(config: &PoolConfig, observer: F) -> Result<PoolReport, PoolError>
where
    F: Fn(&PoolEvent) + 'static,
{
    config.validate()?;
    debug!(
        "starting {} workers with {} slots",
        config.workers, config.capacity
    );

    let slots = Rc::new(Semaphore::new(config.capacity));
    let pool = Rc::new(ActivePool::new());
    let admitted = Rc::new(Cell::new(0));
    let observer: Observer = Rc::new(observer);

    let mut handles = Vec::with_capacity(config.workers);
    for i in 0..config.workers {
        let worker = Worker {
            name: i.to_string(),
            slots: slots.clone(),
            pool: pool.clone(),
            admitted: admitted.clone(),
            max_hold: config.max_hold(),
            observer: observer.clone(),
        };
        handles.push((i.to_string(), task::try_spawn(move || worker.run())?));
    }

    for (name, handle) in handles {
        handle.join()?;
        observer(&PoolEvent::Joined {
            worker: name,
            active: pool.snapshot(),
        });
    }

    Ok(PoolReport {
        admitted: admitted.get(),
        peak: pool.peak(),
        remaining: pool.snapshot(),
    })
}
