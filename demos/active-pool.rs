//! Ten workers share a pool that lets at most three of them run at once.

use anyhow::Context;
use clap::Parser;
use exercises::{run_workers, Config, PoolEvent};

#[derive(Parser, Debug)]
#[command(about = "Admit workers into a shared registry through a counting semaphore")]
struct Args {
    /// JSON config file; flags below override it.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[arg(long)]
    workers: Option<usize>,

    /// How many workers may be active at the same time.
    #[arg(long)]
    capacity: Option<usize>,

    /// Longest random hold per worker, in milliseconds.
    #[arg(long)]
    max_hold_ms: Option<u64>,
}

#[spool::main]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut pool = match &args.config {
        Some(path) => Config::load(path)?.pool,
        None => Config::default().pool,
    };
    pool.workers = args.workers.unwrap_or(pool.workers);
    pool.capacity = args.capacity.unwrap_or(pool.capacity);
    pool.max_hold_ms = args.max_hold_ms.unwrap_or(pool.max_hold_ms);

    let report = run_workers(&pool, |event| match event {
        PoolEvent::Entered { active, .. } | PoolEvent::Joined { active, .. } => {
            println!("Now running: [{}]", active.join(", "));
        }
        PoolEvent::Exited { worker, active } => {
            log::debug!("worker {worker} left, active: {active:?}");
        }
    })
    .context("running the pool")?;

    log::info!(
        "{} workers admitted, at most {} active at once",
        report.admitted, report.peak
    );
    Ok(())
}
